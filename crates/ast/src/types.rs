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

use std::fmt;

use crate::TypeId;

/// Direction of data flow through a function parameter or call argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterDirection {
    In,
    Out,
    Inout,
}

impl fmt::Display for ParameterDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            ParameterDirection::In => "in",
            ParameterDirection::Out => "out",
            ParameterDirection::Inout => "inout",
        };
        f.write_str(keyword)
    }
}

/// A named primitive type. `i32` is the only one the language recognises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltInType {
    pub name: String,
}

/// One parameter of a function type: `out exitCode: i32`.
///
/// Parameter names are unique within a function type. The referenced type is
/// interned, so comparing handles compares the types structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncParameter {
    pub name: String,
    pub direction: ParameterDirection,
    pub type_id: TypeId,
}

/// A function type: the ordered parameter list of `fun(...)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncType {
    pub parameters: Vec<FuncParameter>,
}

/// The closed type algebra. Structural equality drives interning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    BuiltIn(BuiltInType),
    Func(FuncType),
}

impl Type {
    /// Shorthand for the `i32` built-in.
    pub fn i32() -> Self {
        Type::BuiltIn(BuiltInType {
            name: String::from("i32"),
        })
    }
}
