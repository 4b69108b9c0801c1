use ast::types::{FuncParameter, FuncType, Type};
use ast::{Program, TypeId};

use super::{direction, identifier, literal, ParseError};
use crate::cursor::Cursor;

/// `type := func_type | "i32"`
///
/// All parsed types go through [`Program::find_or_add_type`], so structurally
/// equal types end up sharing one interned entry.
pub(super) fn parse_type<'a>(
    program: &mut Program,
    cursor: Cursor<'a>,
) -> Result<(Cursor<'a>, TypeId), ParseError> {
    if let Some((after_fun, _)) = literal(cursor, "fun").into_match() {
        return func_type(program, after_fun);
    }
    if let Some((after, _)) = literal(cursor, "i32").into_match() {
        let type_id = program.find_or_add_type(Type::i32());
        return Ok((after, type_id));
    }
    Err(ParseError::at(cursor, "Expected a type"))
}

/// `func_type := "fun" ws "(" ws ( param ( "," ws param )* )? ws ")"`,
/// entered with the `fun` keyword already consumed.
fn func_type<'a>(
    program: &mut Program,
    cursor: Cursor<'a>,
) -> Result<(Cursor<'a>, TypeId), ParseError> {
    let cursor = cursor.skip_whitespace();
    let (cursor, _) = literal(cursor, "(").or_reject(cursor, "Expected '(' after 'fun'")?;

    let mut parameters: Vec<FuncParameter> = Vec::new();
    let mut cursor = cursor.skip_whitespace();
    if !cursor.rest().starts_with(')') {
        loop {
            let param_at = cursor;
            let (after_param, param) = parameter(program, cursor)?;
            if parameters.iter().any(|existing| existing.name == param.name) {
                return Err(ParseError::at(
                    param_at,
                    format!("Duplicate parameter name: {}", param.name),
                ));
            }
            parameters.push(param);

            cursor = after_param.skip_whitespace();
            match literal(cursor, ",").into_match() {
                Some((after_comma, _)) => cursor = after_comma.skip_whitespace(),
                None => break,
            }
        }
    }

    let (cursor, _) =
        literal(cursor, ")").or_reject(cursor, "Expected ')' to close parameter list")?;
    let type_id = program.find_or_add_type(Type::Func(FuncType { parameters }));
    Ok((cursor, type_id))
}

/// `param := direction ws identifier ws ":" ws type`
fn parameter<'a>(
    program: &mut Program,
    cursor: Cursor<'a>,
) -> Result<(Cursor<'a>, FuncParameter), ParseError> {
    let (cursor, parsed_direction) = direction(cursor)
        .or_reject(cursor, "Expected parameter direction (in, out or inout)")?;
    let cursor = cursor.skip_whitespace();

    let (cursor, name) = identifier(cursor).or_reject(cursor, "Missing parameter name")?;
    let cursor = cursor.skip_whitespace();

    let (cursor, _) =
        literal(cursor, ":").or_reject(cursor, "Expected ':' after parameter name")?;
    let cursor = cursor.skip_whitespace();

    let (cursor, type_id) = parse_type(program, cursor)?;
    Ok((
        cursor,
        FuncParameter {
            name: name.to_string(),
            direction: parsed_direction,
            type_id,
        },
    ))
}
