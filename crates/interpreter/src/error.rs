use std::fmt;

/// A fatal evaluation failure. Nothing is caught or downgraded inside the
/// interpreter; the first failure ends the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    MissingMainFunction,
    UnknownFunction(String),
    /// A definition whose type is not a `fun(...)` type was called.
    NotAFunctionType(String),
    UndeclaredVariable(String),
    /// A parameter whose type is not `i32`.
    UnsupportedParameterType { function: String, parameter: String },
    /// An `inout` parameter on the callee side.
    UnsupportedDirection { function: String, parameter: String },
    /// An `out` or `inout` argument at a call site.
    UnsupportedArgumentDirection { function: String, argument: String },
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        found: usize,
    },
    MissingArgument { function: String, parameter: String },
    MultipleOutParameters(String),
    /// A statement was used where an `i32` value was required.
    ValueExpected,
    DivisionByZero,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::MissingMainFunction => write!(f, "Missing main function"),
            RuntimeError::UnknownFunction(name) => {
                write!(f, "Unknown function: {}", name)
            }
            RuntimeError::NotAFunctionType(name) => {
                write!(f, "'{}' does not have a function type", name)
            }
            RuntimeError::UndeclaredVariable(name) => {
                write!(f, "Undeclared variable: {}", name)
            }
            RuntimeError::UnsupportedParameterType {
                function,
                parameter,
            } => write!(
                f,
                "Parameter '{}' of '{}' has a type other than i32",
                parameter, function
            ),
            RuntimeError::UnsupportedDirection {
                function,
                parameter,
            } => write!(
                f,
                "Parameter '{}' of '{}' has an unsupported direction",
                parameter, function
            ),
            RuntimeError::UnsupportedArgumentDirection { function, argument } => {
                write!(
                    f,
                    "Argument '{}' in call to '{}' must be passed as 'in'",
                    argument, function
                )
            }
            RuntimeError::ArgumentCountMismatch {
                function,
                expected,
                found,
            } => write!(
                f,
                "Call to '{}' resolved {} arguments, expected {}",
                function, found, expected
            ),
            RuntimeError::MissingArgument {
                function,
                parameter,
            } => write!(
                f,
                "Missing argument for parameter '{}' of '{}'",
                parameter, function
            ),
            RuntimeError::MultipleOutParameters(function) => {
                write!(f, "Function '{}' has more than one out parameter", function)
            }
            RuntimeError::ValueExpected => {
                write!(f, "Expected an i32 value, found a statement")
            }
            RuntimeError::DivisionByZero => write!(f, "Division by zero"),
        }
    }
}

impl std::error::Error for RuntimeError {}
