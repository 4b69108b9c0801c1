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

//! Tree-walking evaluator for parsed programs.
//!
//! [`execute`] runs the entry function and returns the value it wrote into
//! its `exitCode` parameter. Values flow between frames by name: `in`
//! arguments are copied into the callee's frame on entry, `out` locals are
//! copied back to the caller's slots on exit.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::RuntimeError;

use ast::expr::{Expr, FuncArgument};
use ast::op::BinOp;
use ast::types::{ParameterDirection, Type};
use ast::{Function, Program, Spanned};

/// A named `i32` slot. Doubles as a frame local and as the value of a named
/// argument handed across a call.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Local {
    name: String,
    value: i32,
}

/// One function activation: its locals, in parameter declaration order.
struct Frame {
    locals: Vec<Local>,
}

impl Frame {
    fn get(&self, name: &str) -> Option<i32> {
        self.locals
            .iter()
            .find(|local| local.name == name)
            .map(|local| local.value)
    }

    fn set(&mut self, name: &str, value: i32) {
        if let Some(local) = self.locals.iter_mut().find(|local| local.name == name) {
            local.value = value;
        }
    }
}

/// What an expression evaluates to: an `i32`, or nothing for statements
/// (assignments and calls without an `out` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value {
    I32(i32),
    Void,
}

impl Value {
    fn as_i32(self) -> Result<i32, RuntimeError> {
        match self {
            Value::I32(value) => Ok(value),
            Value::Void => Err(RuntimeError::ValueExpected),
        }
    }
}

/// Run the entry function and return its exit code.
pub fn execute(program: &Program) -> Result<i32, RuntimeError> {
    let main = program.main().ok_or(RuntimeError::MissingMainFunction)?;

    let mut outputs = vec![Local {
        name: String::from("exitCode"),
        value: 0,
    }];
    call_function(program, main, &[], &mut outputs)?;
    Ok(outputs[0].value)
}

/// Invoke `func`: build its frame from the named `in` arguments and
/// zero-initialised `out` slots, evaluate the body, then copy `out` locals
/// back into the caller's slots of the same name.
fn call_function(
    program: &Program,
    func: &Function,
    inputs: &[Local],
    outputs: &mut [Local],
) -> Result<(), RuntimeError> {
    let Some(Type::Func(func_type)) = program.get_type(func.type_id) else {
        return Err(RuntimeError::NotAFunctionType(func.name.clone()));
    };

    for param in &func_type.parameters {
        match program.get_type(param.type_id) {
            Some(Type::BuiltIn(built_in)) if built_in.name == "i32" => {}
            _ => {
                return Err(RuntimeError::UnsupportedParameterType {
                    function: func.name.clone(),
                    parameter: param.name.clone(),
                })
            }
        }
        if param.direction == ParameterDirection::Inout {
            return Err(RuntimeError::UnsupportedDirection {
                function: func.name.clone(),
                parameter: param.name.clone(),
            });
        }
    }

    let resolved = inputs.len() + outputs.len();
    if func_type.parameters.len() != resolved {
        return Err(RuntimeError::ArgumentCountMismatch {
            function: func.name.clone(),
            expected: func_type.parameters.len(),
            found: resolved,
        });
    }

    let mut frame = Frame {
        locals: Vec::with_capacity(func_type.parameters.len()),
    };
    for param in &func_type.parameters {
        let value = if param.direction == ParameterDirection::In {
            inputs
                .iter()
                .find(|input| input.name == param.name)
                .map(|input| input.value)
                .ok_or_else(|| RuntimeError::MissingArgument {
                    function: func.name.clone(),
                    parameter: param.name.clone(),
                })?
        } else {
            0
        };
        frame.locals.push(Local {
            name: param.name.clone(),
            value,
        });
    }

    eval(program, &mut frame, &func.body)?;

    for param in &func_type.parameters {
        if param.direction != ParameterDirection::Out {
            continue;
        }
        if let Some(value) = frame.get(&param.name) {
            if let Some(slot) = outputs.iter_mut().find(|slot| slot.name == param.name) {
                slot.value = value;
            }
        }
    }
    Ok(())
}

fn eval(
    program: &Program,
    frame: &mut Frame,
    expr: &Spanned<Expr>,
) -> Result<Value, RuntimeError> {
    match &expr.node {
        Expr::Literal(value) => Ok(Value::I32(*value)),

        Expr::Name(name) => frame
            .get(name)
            .map(Value::I32)
            .ok_or_else(|| RuntimeError::UndeclaredVariable(name.clone())),

        Expr::BinOp { op, lhs, rhs } => {
            // lhs strictly first: the leftmost trap wins.
            let lhs_value = eval(program, frame, lhs)?.as_i32()?;
            let rhs_value = eval(program, frame, rhs)?.as_i32()?;
            apply(*op, lhs_value, rhs_value).map(Value::I32)
        }

        Expr::InitAssign { var, value } => {
            if frame.get(var).is_none() {
                return Err(RuntimeError::UndeclaredVariable(var.clone()));
            }
            let assigned = eval(program, frame, value)?.as_i32()?;
            frame.set(var, assigned);
            Ok(Value::Void)
        }

        Expr::Call {
            function,
            arguments,
        } => eval_call(program, frame, function, arguments),
    }
}

/// Wrapping two's-complement arithmetic; division and remainder truncate
/// towards zero and trap on a zero divisor.
fn apply(op: BinOp, lhs: i32, rhs: i32) -> Result<i32, RuntimeError> {
    match op {
        BinOp::Add => Ok(lhs.wrapping_add(rhs)),
        BinOp::Sub => Ok(lhs.wrapping_sub(rhs)),
        BinOp::Mul => Ok(lhs.wrapping_mul(rhs)),
        BinOp::Div if rhs == 0 => Err(RuntimeError::DivisionByZero),
        BinOp::Div => Ok(lhs.wrapping_div(rhs)),
        BinOp::Mod if rhs == 0 => Err(RuntimeError::DivisionByZero),
        BinOp::Mod => Ok(lhs.wrapping_rem(rhs)),
    }
}

fn eval_call(
    program: &Program,
    frame: &mut Frame,
    function: &str,
    arguments: &[FuncArgument],
) -> Result<Value, RuntimeError> {
    let callee = program
        .find_function(function)
        .ok_or_else(|| RuntimeError::UnknownFunction(function.to_string()))?;

    let mut inputs = Vec::with_capacity(arguments.len());
    for argument in arguments {
        if argument.direction != ParameterDirection::In {
            return Err(RuntimeError::UnsupportedArgumentDirection {
                function: function.to_string(),
                argument: argument.name.clone(),
            });
        }
        let value = eval(program, frame, &argument.expr)?.as_i32()?;
        inputs.push(Local {
            name: argument.name.clone(),
            value,
        });
    }

    let Some(Type::Func(callee_type)) = program.get_type(callee.type_id) else {
        return Err(RuntimeError::NotAFunctionType(function.to_string()));
    };
    let mut outputs: Vec<Local> = callee_type
        .parameters
        .iter()
        .filter(|param| param.direction == ParameterDirection::Out)
        .map(|param| Local {
            name: param.name.clone(),
            value: 0,
        })
        .collect();
    if outputs.len() > 1 {
        return Err(RuntimeError::MultipleOutParameters(function.to_string()));
    }

    call_function(program, callee, &inputs, &mut outputs)?;

    match outputs.first() {
        Some(slot) => Ok(Value::I32(slot.value)),
        None => Ok(Value::Void),
    }
}
