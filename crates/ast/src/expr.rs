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

use crate::op::BinOp;
use crate::types::ParameterDirection;
use crate::Spanned;

/// A call-site argument: `in x: 5i32`. The name must match a parameter of
/// the callee, and the direction states how the value flows.
#[derive(Debug, Clone)]
pub struct FuncArgument {
    pub name: String,
    pub direction: ParameterDirection,
    pub expr: Spanned<Expr>,
}

#[derive(Debug, Clone)]
pub enum Expr {
    /// Integer literal with the mandatory type suffix: `42i32`
    Literal(i32),

    /// Variable reference: `x`
    Name(String),

    /// Function call with named, directed arguments: `id(in x: 5i32)`
    Call {
        function: String,
        arguments: Vec<FuncArgument>,
    },

    /// Binary operation. All five operators share a single precedence level
    /// and associate to the left, so `1 + 2 * 3` is `(1 + 2) * 3`.
    BinOp {
        op: BinOp,
        lhs: Box<Spanned<Expr>>,
        rhs: Box<Spanned<Expr>>,
    },

    /// `var = value;` — writes a local of the enclosing function and
    /// produces no value.
    InitAssign {
        var: String,
        value: Box<Spanned<Expr>>,
    },
}
