use ast::expr::{Expr, FuncArgument};
use ast::op::BinOp;
use ast::Spanned;

use super::{direction, identifier, literal, ParseError, ParseResult};
use crate::cursor::Cursor;

/// `func_body := "{" ws expression ws "}"` — exactly one expression.
///
/// The returned span covers the whole brace-delimited body text.
pub(super) fn func_body(
    cursor: Cursor<'_>,
) -> Result<(Cursor<'_>, Spanned<Expr>), ParseError> {
    let body_start = cursor.offset();
    let (cursor, _) = literal(cursor, "{").or_reject(cursor, "Missing function body")?;

    let cursor = cursor.skip_whitespace();
    if cursor.rest().starts_with('}') {
        return Err(ParseError::at(cursor, "Empty function body"));
    }

    let (cursor, body) = expression(cursor)?;
    let cursor = cursor.skip_whitespace();

    match literal(cursor, "}").into_match() {
        Some((end, _)) => Ok((end, Spanned::new(body.node, body_start..end.offset()))),
        None if cursor.is_at_end() => {
            Err(ParseError::at(cursor, "Missing '}' after function body"))
        }
        None => Err(ParseError::at(
            cursor,
            "Only one expression allowed per function body",
        )),
    }
}

/// `expression := identifier ws "=" ws terms ws ";"`
fn expression(cursor: Cursor<'_>) -> Result<(Cursor<'_>, Spanned<Expr>), ParseError> {
    let start = cursor.offset();
    let (cursor, var) = identifier(cursor).or_reject(cursor, "Expected an expression")?;
    let cursor = cursor.skip_whitespace();

    let (cursor, _) =
        literal(cursor, "=").or_reject(cursor, "Expected assignment in expression")?;
    let cursor = cursor.skip_whitespace();

    let (cursor, value) = terms(cursor)?;
    let cursor = cursor.skip_whitespace();

    let (end, _) =
        literal(cursor, ";").or_reject(cursor, "Expression should end with ';'")?;
    Ok((
        end,
        Spanned::new(
            Expr::InitAssign {
                var: var.to_string(),
                value: Box::new(value),
            },
            start..end.offset(),
        ),
    ))
}

/// `terms := term ( ws op ws term )*`
///
/// A strict left fold: every operator has the same precedence, so
/// `1 + 2 * 3` builds `(1 + 2) * 3`.
fn terms(cursor: Cursor<'_>) -> Result<(Cursor<'_>, Spanned<Expr>), ParseError> {
    let start = cursor.offset();
    let (mut cursor, mut head) = term(cursor)?;

    loop {
        let look = cursor.skip_whitespace();
        let Some((after_op, op)) = operator(look).into_match() else {
            break;
        };

        let rhs_at = after_op.skip_whitespace();
        let (after_rhs, rhs) = term(rhs_at)?;
        head = Spanned::new(
            Expr::BinOp {
                op,
                lhs: Box::new(head),
                rhs: Box::new(rhs),
            },
            start..after_rhs.offset(),
        );
        cursor = after_rhs;
    }

    Ok((cursor, head))
}

fn operator(cursor: Cursor<'_>) -> ParseResult<'_, BinOp> {
    let op = match cursor.peek() {
        Some('+') => BinOp::Add,
        Some('-') => BinOp::Sub,
        Some('*') => BinOp::Mul,
        Some('/') => BinOp::Div,
        Some('%') => BinOp::Mod,
        _ => return ParseResult::no_match(cursor),
    };
    ParseResult::matched(cursor.advance(1), op)
}

/// `term := "(" ws terms ws ")" | call | var_ref | number "i32"`
fn term(cursor: Cursor<'_>) -> Result<(Cursor<'_>, Spanned<Expr>), ParseError> {
    let start = cursor.offset();

    if let Some((inner, _)) = literal(cursor, "(").into_match() {
        let inner = inner.skip_whitespace();
        let (after, grouped) = terms(inner)?;
        let after = after.skip_whitespace();
        let (end, _) = literal(after, ")").or_reject(after, "Expected ')'")?;
        return Ok((end, Spanned::new(grouped.node, start..end.offset())));
    }

    if let Some((after_name, name)) = identifier(cursor).into_match() {
        let look = after_name.skip_whitespace();
        if look.rest().starts_with('(') {
            return call(cursor, name, look);
        }
        return Ok((
            after_name,
            Spanned::new(Expr::Name(name.to_string()), start..after_name.offset()),
        ));
    }

    number(cursor)
}

/// `call := identifier ws "(" ws ( arg )? ws ")"`, entered with the callee
/// name already consumed and `open` sitting on the `(`.
fn call<'a>(
    start: Cursor<'a>,
    name: &str,
    open: Cursor<'a>,
) -> Result<(Cursor<'a>, Spanned<Expr>), ParseError> {
    let cursor = open.advance(1).skip_whitespace();

    let mut arguments = Vec::new();
    let cursor = if cursor.rest().starts_with(')') {
        cursor
    } else {
        let (after_arg, parsed) = argument(cursor)?;
        arguments.push(parsed);

        let after_arg = after_arg.skip_whitespace();
        if after_arg.rest().starts_with(',') {
            return Err(ParseError::at(after_arg, "Multiple arguments not implemented"));
        }
        after_arg
    };

    let (end, _) =
        literal(cursor, ")").or_reject(cursor, "Expected ')' to close argument list")?;
    Ok((
        end,
        Spanned::new(
            Expr::Call {
                function: name.to_string(),
                arguments,
            },
            start.offset()..end.offset(),
        ),
    ))
}

/// `arg := direction ws identifier ws ":" ws terms`
fn argument(cursor: Cursor<'_>) -> Result<(Cursor<'_>, FuncArgument), ParseError> {
    let (cursor, parsed_direction) = direction(cursor)
        .or_reject(cursor, "Expected argument direction (in, out or inout)")?;
    let cursor = cursor.skip_whitespace();

    let (cursor, name) = identifier(cursor).or_reject(cursor, "Missing argument name")?;
    let cursor = cursor.skip_whitespace();

    let (cursor, _) =
        literal(cursor, ":").or_reject(cursor, "Expected ':' after argument name")?;
    let cursor = cursor.skip_whitespace();

    let (cursor, value) = terms(cursor)?;
    Ok((
        cursor,
        FuncArgument {
            name: name.to_string(),
            direction: parsed_direction,
            expr: value,
        },
    ))
}

/// `number := "-"? digit+` with the mandatory `i32` suffix. The value must
/// fit in an `i32`; overflow and a missing suffix are reported at the start
/// of the number.
fn number(cursor: Cursor<'_>) -> Result<(Cursor<'_>, Spanned<Expr>), ParseError> {
    let rest = cursor.rest();
    let bytes = rest.as_bytes();

    let mut length = usize::from(bytes.first() == Some(&b'-'));
    let digits = bytes[length..]
        .iter()
        .take_while(|byte| byte.is_ascii_digit())
        .count();
    if digits == 0 {
        return Err(ParseError::at(cursor, "Expected a number term"));
    }
    length += digits;

    let value: i32 = rest[..length].parse().map_err(|_| {
        ParseError::at(
            cursor,
            format!("Number does not fit in i32: {}", &rest[..length]),
        )
    })?;

    let after_digits = cursor.advance(length);
    let (end, _) = literal(after_digits, "i32")
        .or_reject(cursor, "Expected 'i32' suffix after number value")?;
    Ok((
        end,
        Spanned::new(Expr::Literal(value), cursor.offset()..end.offset()),
    ))
}
