use std::fmt;
use std::io;

/// A fatal compile failure. The module written so far is abandoned.
#[derive(Debug)]
pub enum EmitError {
    /// The sink failed mid-write.
    Io(io::Error),
    MissingMainFunction,
    /// A parameter type other than `i32`.
    UnsupportedType(String),
    /// An `inout` parameter.
    UnsupportedDirection { parameter: String },
    /// More than one `out` parameter on one function type.
    MultipleOutParameters,
    /// An expression form the emitter does not lower yet.
    UnsupportedExpression(&'static str),
    /// A declared function whose type has no entry in the type section.
    TypeNotRegistered { function: String },
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::Io(err) => write!(f, "Failed to write module: {}", err),
            EmitError::MissingMainFunction => write!(f, "Missing main function"),
            EmitError::UnsupportedType(name) => {
                write!(f, "Type '{}' is not supported by the emitter", name)
            }
            EmitError::UnsupportedDirection { parameter } => write!(
                f,
                "inout parameter '{}' is not supported by the emitter",
                parameter
            ),
            EmitError::MultipleOutParameters => {
                write!(f, "Multiple out parameters are not supported by the emitter")
            }
            EmitError::UnsupportedExpression(what) => {
                write!(f, "Cannot emit code for a {} yet", what)
            }
            EmitError::TypeNotRegistered { function } => {
                write!(f, "Function type of '{}' not found in the type section", function)
            }
        }
    }
}

impl std::error::Error for EmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmitError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for EmitError {
    fn from(err: io::Error) -> Self {
        EmitError::Io(err)
    }
}
