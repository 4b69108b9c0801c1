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

//! Shared AST for the defun language.
//!
//! The parser produces a [`Program`]; the interpreter and the WASM emitter
//! consume it. Nodes are built once during parsing and never mutated
//! afterwards. Types are interned in [`Program::types`] and referenced by
//! [`TypeId`] handles, so every occurrence of a structurally equal type
//! shares a single entry.

pub mod expr;
pub mod op;
pub mod types;

#[cfg(test)]
mod tests;

use std::fmt::Write as _;
use std::ops::Range;

use expr::Expr;
use types::Type;

/// Byte range into the original source text.
pub type Span = Range<usize>;

/// Every expression node carries a source span, both for error reporting and
/// for recovering the textual form of the node.
#[derive(Debug, Clone)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Stable handle to an interned [`Type`] in [`Program::types`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeId(usize);

impl TypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single top-level function definition.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    /// Name of the file the definition was parsed from.
    pub source_file: String,
    pub type_id: TypeId,
    /// The one expression making up the body. The span covers the whole
    /// brace-delimited body text.
    pub body: Spanned<Expr>,
}

/// A parsed program: the interned type table, the function definitions in
/// source order, and the entry function.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub types: Vec<Type>,
    pub functions: Vec<Function>,
    /// Index into `functions` of the function named `main`, once validated.
    pub main_function: Option<usize>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a type: return the handle of a structurally equal existing
    /// entry, or append `ty` and return the new handle. Entries keep their
    /// insertion order, so handles stay stable.
    pub fn find_or_add_type(&mut self, ty: Type) -> TypeId {
        if let Some(index) = self.types.iter().position(|existing| *existing == ty) {
            TypeId(index)
        } else {
            self.types.push(ty);
            TypeId(self.types.len() - 1)
        }
    }

    pub fn get_type(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.0)
    }

    /// Handles of all interned types, in insertion order.
    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.types.len()).map(TypeId)
    }

    pub fn main(&self) -> Option<&Function> {
        self.main_function.and_then(|index| self.functions.get(index))
    }

    /// First function with the given name, in definition order.
    pub fn find_function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Source-level rendering of an interned type, e.g. `i32` or
    /// `fun(out exitCode: i32)`.
    pub fn type_rep(&self, id: TypeId) -> String {
        match self.get_type(id) {
            Some(Type::BuiltIn(built_in)) => built_in.name.clone(),
            Some(Type::Func(func_type)) => {
                let mut rep = String::from("fun(");
                for (i, param) in func_type.parameters.iter().enumerate() {
                    if i > 0 {
                        rep.push_str(", ");
                    }
                    let _ = write!(
                        rep,
                        "{} {}: {}",
                        param.direction,
                        param.name,
                        self.type_rep(param.type_id)
                    );
                }
                rep.push(')');
                rep
            }
            None => String::from("<unknown type>"),
        }
    }
}
