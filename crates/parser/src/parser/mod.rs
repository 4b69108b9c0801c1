mod expr;
mod types;

use std::fmt;

use ast::types::{ParameterDirection, Type};
use ast::{Function, Program, TypeId};

use crate::cursor::Cursor;

/// A located, fatal parse failure. Parsing aborts on the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub source_name: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub(crate) fn at(cursor: Cursor<'_>, message: impl Into<String>) -> Self {
        let location = cursor.location();
        Self {
            source_name: cursor.source_name().to_string(),
            line: location.line,
            column: location.column,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}:{}): {}",
            self.source_name, self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// The uniform result of every parsing routine: whether the routine matched,
/// the unconsumed remainder, and the parsed value when it did.
///
/// `ok == false` means the input did not look like this construct at all and
/// an alternative may be tried from the same cursor; nothing was consumed.
#[derive(Debug)]
pub struct ParseResult<'a, T> {
    pub ok: bool,
    pub remaining: Cursor<'a>,
    pub value: Option<T>,
}

impl<'a, T> ParseResult<'a, T> {
    fn matched(remaining: Cursor<'a>, value: T) -> Self {
        Self {
            ok: true,
            remaining,
            value: Some(value),
        }
    }

    fn no_match(at: Cursor<'a>) -> Self {
        Self {
            ok: false,
            remaining: at,
            value: None,
        }
    }

    /// The remainder and value of a successful match, or `None`.
    pub fn into_match(self) -> Option<(Cursor<'a>, T)> {
        if self.ok {
            self.value.map(|value| (self.remaining, value))
        } else {
            None
        }
    }

    /// Turn a miss into a fatal error located at `at`.
    pub fn or_reject(
        self,
        at: Cursor<'a>,
        message: &str,
    ) -> Result<(Cursor<'a>, T), ParseError> {
        self.into_match().ok_or_else(|| ParseError::at(at, message))
    }
}

/// Match an exact piece of text.
fn literal<'a>(cursor: Cursor<'a>, expected: &str) -> ParseResult<'a, ()> {
    if cursor.rest().starts_with(expected) {
        ParseResult::matched(cursor.advance(expected.len()), ())
    } else {
        ParseResult::no_match(cursor)
    }
}

/// Match a keyword: the exact text followed by a whitespace byte, which is
/// left unconsumed. `defmain` is not `def`, and `inout` is not `in`.
fn keyword<'a>(cursor: Cursor<'a>, expected: &str) -> ParseResult<'a, ()> {
    let result = literal(cursor, expected);
    if !result.ok {
        return result;
    }
    match result.remaining.peek() {
        Some(' ') | Some('\t') | Some('\n') => result,
        _ => ParseResult::no_match(cursor),
    }
}

/// Match an identifier: an ASCII letter followed by letters and digits.
fn identifier(cursor: Cursor<'_>) -> ParseResult<'_, &str> {
    let rest = cursor.rest();
    let bytes = rest.as_bytes();
    match bytes.first() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return ParseResult::no_match(cursor),
    }
    let length = bytes
        .iter()
        .take_while(|byte| byte.is_ascii_alphanumeric())
        .count();
    ParseResult::matched(cursor.advance(length), &rest[..length])
}

/// Match one of the three direction keywords, tried in the order `in`,
/// `out`, `inout`. The keyword-boundary rule keeps `in` from swallowing the
/// front of `inout`.
fn direction(cursor: Cursor<'_>) -> ParseResult<'_, ParameterDirection> {
    let candidates = [
        ("in", ParameterDirection::In),
        ("out", ParameterDirection::Out),
        ("inout", ParameterDirection::Inout),
    ];
    for (text, parsed) in candidates {
        let result = keyword(cursor, text);
        if result.ok {
            return ParseResult::matched(result.remaining, parsed);
        }
    }
    ParseResult::no_match(cursor)
}

/// Parse a complete program: a sequence of definitions, of which exactly one
/// must be a well-formed `main`.
pub fn parse(source: &str, source_name: &str) -> Result<Program, ParseError> {
    let mut program = Program::new();
    let mut cursor = Cursor::new(source, source_name);

    loop {
        cursor = cursor.skip_whitespace();
        if cursor.is_at_end() {
            break;
        }
        cursor = definition(&mut program, cursor)?;
    }

    if program.main_function.is_none() {
        return Err(ParseError::at(cursor, "No main function"));
    }
    Ok(program)
}

/// `"def" ws identifier ws "=" ws type ws func_body ws ";"`
fn definition<'a>(
    program: &mut Program,
    cursor: Cursor<'a>,
) -> Result<Cursor<'a>, ParseError> {
    let (cursor, _) = keyword(cursor, "def").or_reject(cursor, "Expected 'def'")?;
    let cursor = cursor.skip_whitespace();

    let name_at = cursor;
    let (cursor, name) =
        identifier(cursor).or_reject(cursor, "Missing name after 'def'")?;
    let cursor = cursor.skip_whitespace();

    let (cursor, _) =
        literal(cursor, "=").or_reject(cursor, "Missing '=' in definition")?;
    let cursor = cursor.skip_whitespace();

    let type_at = cursor;
    let (cursor, type_id) = types::parse_type(program, cursor)?;
    let cursor = cursor.skip_whitespace();

    let (cursor, body) = expr::func_body(cursor)?;
    let cursor = cursor.skip_whitespace();

    let (cursor, _) =
        literal(cursor, ";").or_reject(cursor, "Missing ';' after definition")?;

    program.functions.push(Function {
        name: name.to_string(),
        source_file: cursor.source_name().to_string(),
        type_id,
        body,
    });

    if name == "main" {
        register_main(program, name_at, type_at)?;
    }

    Ok(cursor)
}

/// Validate a freshly added `main`: its type must be exactly
/// `fun(out exitCode: i32)` and there must not already be one.
fn register_main(
    program: &mut Program,
    name_at: Cursor<'_>,
    type_at: Cursor<'_>,
) -> Result<(), ParseError> {
    let index = program.functions.len() - 1;
    let type_id = program.functions[index].type_id;

    if !is_main_func_type(program, type_id) {
        return Err(ParseError::at(
            type_at,
            "Wrong type for main, expected fun(out exitCode: i32)",
        ));
    }
    if program.main_function.is_some() {
        return Err(ParseError::at(name_at, "Multiple main functions found"));
    }

    program.main_function = Some(index);
    Ok(())
}

fn is_main_func_type(program: &Program, type_id: TypeId) -> bool {
    let Some(Type::Func(func_type)) = program.get_type(type_id) else {
        return false;
    };
    if func_type.parameters.len() != 1 {
        return false;
    }

    let param = &func_type.parameters[0];
    if param.name != "exitCode" || param.direction != ParameterDirection::Out {
        return false;
    }

    matches!(
        program.get_type(param.type_id),
        Some(Type::BuiltIn(built_in)) if built_in.name == "i32"
    )
}
