/*
 * Copyright (c) 2026. Mikhail Kulik.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Module assembly: func-type translation, index assignment, the injected
//! `_start` / `proc_exit` pair, and the section-by-section layout.

use std::io::Write;

use ast::expr::Expr;
use ast::op::BinOp;
use ast::types::{FuncType, ParameterDirection, Type};
use ast::{Function, Program, Spanned};

use crate::encoder::{
    write_byte, write_name, write_section, write_sleb128, write_uleb128, write_vector,
    MAGIC, VERSION,
};
use crate::error::EmitError;

const SECTION_TYPE: u8 = 1;
const SECTION_IMPORT: u8 = 2;
const SECTION_FUNCTION: u8 = 3;
const SECTION_MEMORY: u8 = 5;
const SECTION_EXPORT: u8 = 7;
const SECTION_CODE: u8 = 10;

const FUNC_TYPE_TAG: u8 = 0x60;
const VAL_TYPE_I32: u8 = 0x7F;

const IMPORT_KIND_FUNC: u8 = 0x00;
const EXPORT_KIND_FUNC: u8 = 0x00;
const EXPORT_KIND_MEMORY: u8 = 0x02;

const OP_CALL: u8 = 0x10;
const OP_I32_CONST: u8 = 0x41;
const OP_I32_ADD: u8 = 0x6A;
const OP_I32_SUB: u8 = 0x6B;
const OP_I32_MUL: u8 = 0x6C;
const OP_I32_DIV_S: u8 = 0x6D;
const OP_I32_REM_S: u8 = 0x6F;
const OP_END: u8 = 0x0B;

/// A translated function type: value-type bytes for inputs and outputs.
struct WasmFuncType {
    params: Vec<u8>,
    results: Vec<u8>,
}

/// Index assignment for the whole module, computed before any byte is
/// written. Imported functions come first in the function index space, then
/// the declared functions in program order, then the injected `_start`.
struct ModuleLayout {
    wasm_types: Vec<WasmFuncType>,
    /// Program type table index → type section index, for function types.
    type_indices: Vec<Option<u32>>,
    start_type_index: u32,
    proc_exit_type_index: u32,
    proc_exit_func_index: u32,
    main_func_index: u32,
    start_func_index: u32,
}

pub(crate) fn write_module<W: Write>(
    program: &Program,
    out: &mut W,
) -> Result<(), EmitError> {
    let layout = layout(program)?;

    out.write_all(&MAGIC)?;
    out.write_all(&VERSION)?;
    write_type_section(out, &layout)?;
    write_import_section(out, &layout)?;
    write_function_section(out, program, &layout)?;
    write_memory_section(out)?;
    write_export_section(out, &layout)?;
    write_code_section(out, program, &layout)?;
    Ok(())
}

fn layout(program: &Program) -> Result<ModuleLayout, EmitError> {
    let mut wasm_types = Vec::new();
    let mut type_indices = vec![None; program.types.len()];
    for (index, ty) in program.types.iter().enumerate() {
        if let Type::Func(func_type) = ty {
            type_indices[index] = Some(wasm_types.len() as u32);
            wasm_types.push(translate_func_type(program, func_type)?);
        }
    }

    // Injected entries: fun() for _start and fun(in exitCode: i32) for the
    // imported proc_exit.
    let start_type_index = wasm_types.len() as u32;
    wasm_types.push(WasmFuncType {
        params: Vec::new(),
        results: Vec::new(),
    });
    let proc_exit_type_index = wasm_types.len() as u32;
    wasm_types.push(WasmFuncType {
        params: vec![VAL_TYPE_I32],
        results: Vec::new(),
    });

    let num_imports = 1u32;
    let main_index = program
        .main_function
        .ok_or(EmitError::MissingMainFunction)? as u32;

    Ok(ModuleLayout {
        wasm_types,
        type_indices,
        start_type_index,
        proc_exit_type_index,
        proc_exit_func_index: 0,
        main_func_index: num_imports + main_index,
        start_func_index: num_imports + program.functions.len() as u32,
    })
}

fn translate_func_type(
    program: &Program,
    func_type: &FuncType,
) -> Result<WasmFuncType, EmitError> {
    let mut params = Vec::new();
    let mut results = Vec::new();

    for param in &func_type.parameters {
        if param.direction == ParameterDirection::Inout {
            return Err(EmitError::UnsupportedDirection {
                parameter: param.name.clone(),
            });
        }

        let val_type = match program.get_type(param.type_id) {
            Some(Type::BuiltIn(built_in)) if built_in.name == "i32" => VAL_TYPE_I32,
            _ => return Err(EmitError::UnsupportedType(program.type_rep(param.type_id))),
        };
        if param.direction == ParameterDirection::Out {
            results.push(val_type);
        } else {
            params.push(val_type);
        }
    }

    if results.len() > 1 {
        return Err(EmitError::MultipleOutParameters);
    }
    Ok(WasmFuncType { params, results })
}

fn write_type_section<W: Write>(out: &mut W, layout: &ModuleLayout) -> Result<(), EmitError> {
    let mut contents = Vec::new();
    write_uleb128(&mut contents, layout.wasm_types.len() as u32)?;
    for wasm_type in &layout.wasm_types {
        write_byte(&mut contents, FUNC_TYPE_TAG)?;
        write_vector(&mut contents, &wasm_type.params)?;
        write_vector(&mut contents, &wasm_type.results)?;
    }
    write_section(out, SECTION_TYPE, &contents)?;
    Ok(())
}

fn write_import_section<W: Write>(out: &mut W, layout: &ModuleLayout) -> Result<(), EmitError> {
    let mut contents = Vec::new();
    write_uleb128(&mut contents, 1)?;
    write_name(&mut contents, "wasi_snapshot_preview1")?;
    write_name(&mut contents, "proc_exit")?;
    write_byte(&mut contents, IMPORT_KIND_FUNC)?;
    write_uleb128(&mut contents, layout.proc_exit_type_index)?;
    write_section(out, SECTION_IMPORT, &contents)?;
    Ok(())
}

fn write_function_section<W: Write>(
    out: &mut W,
    program: &Program,
    layout: &ModuleLayout,
) -> Result<(), EmitError> {
    let mut contents = Vec::new();
    write_uleb128(&mut contents, program.functions.len() as u32 + 1)?;
    for function in &program.functions {
        let type_index = func_type_index(layout, function)?;
        write_uleb128(&mut contents, type_index)?;
    }
    write_uleb128(&mut contents, layout.start_type_index)?;
    write_section(out, SECTION_FUNCTION, &contents)?;
    Ok(())
}

fn func_type_index(layout: &ModuleLayout, function: &Function) -> Result<u32, EmitError> {
    layout
        .type_indices
        .get(function.type_id.index())
        .copied()
        .flatten()
        .ok_or_else(|| EmitError::TypeNotRegistered {
            function: function.name.clone(),
        })
}

/// One memory with limits `{ min: 0, max: 1024 }`.
fn write_memory_section<W: Write>(out: &mut W) -> Result<(), EmitError> {
    let mut contents = Vec::new();
    write_uleb128(&mut contents, 1)?;
    write_byte(&mut contents, 0x01)?;
    write_uleb128(&mut contents, 0)?;
    write_uleb128(&mut contents, 1024)?;
    write_section(out, SECTION_MEMORY, &contents)?;
    Ok(())
}

fn write_export_section<W: Write>(out: &mut W, layout: &ModuleLayout) -> Result<(), EmitError> {
    let mut contents = Vec::new();
    write_uleb128(&mut contents, 2)?;
    write_name(&mut contents, "_start")?;
    write_byte(&mut contents, EXPORT_KIND_FUNC)?;
    write_uleb128(&mut contents, layout.start_func_index)?;
    write_name(&mut contents, "memory")?;
    write_byte(&mut contents, EXPORT_KIND_MEMORY)?;
    write_uleb128(&mut contents, 0)?;
    write_section(out, SECTION_EXPORT, &contents)?;
    Ok(())
}

fn write_code_section<W: Write>(
    out: &mut W,
    program: &Program,
    layout: &ModuleLayout,
) -> Result<(), EmitError> {
    let mut contents = Vec::new();
    write_uleb128(&mut contents, program.functions.len() as u32 + 1)?;
    for function in &program.functions {
        write_code_entry(&mut contents, |body| emit_expr(body, &function.body))?;
    }
    write_code_entry(&mut contents, |body| {
        write_byte(body, OP_CALL)?;
        write_uleb128(body, layout.main_func_index)?;
        write_byte(body, OP_CALL)?;
        write_uleb128(body, layout.proc_exit_func_index)?;
        Ok(())
    })?;
    write_section(out, SECTION_CODE, &contents)?;
    Ok(())
}

/// A code entry: length-prefixed payload of an empty locals vector, the body
/// opcodes and the `end` terminator.
fn write_code_entry<W, F>(out: &mut W, emit_body: F) -> Result<(), EmitError>
where
    W: Write,
    F: FnOnce(&mut Vec<u8>) -> Result<(), EmitError>,
{
    let mut payload = Vec::new();
    write_vector(&mut payload, &[])?;
    emit_body(&mut payload)?;
    write_byte(&mut payload, OP_END)?;
    write_vector(out, &payload)?;
    Ok(())
}

fn emit_expr(out: &mut Vec<u8>, expr: &Spanned<Expr>) -> Result<(), EmitError> {
    match &expr.node {
        Expr::Literal(value) => {
            write_byte(out, OP_I32_CONST)?;
            write_sleb128(out, *value)?;
            Ok(())
        }

        // The assigned value stays on the stack; it is the function's single
        // out value.
        Expr::InitAssign { value, .. } => emit_expr(out, value),

        Expr::BinOp { op, lhs, rhs } => {
            emit_expr(out, lhs)?;
            emit_expr(out, rhs)?;
            let opcode = match op {
                BinOp::Add => OP_I32_ADD,
                BinOp::Sub => OP_I32_SUB,
                BinOp::Mul => OP_I32_MUL,
                BinOp::Div => OP_I32_DIV_S,
                BinOp::Mod => OP_I32_REM_S,
            };
            write_byte(out, opcode)?;
            Ok(())
        }

        Expr::Name(_) => Err(EmitError::UnsupportedExpression("variable reference")),
        Expr::Call { .. } => Err(EmitError::UnsupportedExpression("function call")),
    }
}
