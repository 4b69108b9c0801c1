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

//! Binary WebAssembly emitter.
//!
//! [`compile`] assembles a WebAssembly 1.0 module byte by byte: LEB128
//! integers, length-prefixed vectors and the canonical section layout. The
//! produced module is a WASI command: it exports `_start` and `memory` and
//! imports `wasi_snapshot_preview1.proc_exit`, which `_start` calls with the
//! entry function's result.

mod compiler;
pub mod encoder;
pub mod error;

#[cfg(test)]
mod tests;

pub use error::EmitError;

use std::io::Write;

use ast::Program;

/// Compile `program` into a WebAssembly module written to `out`.
///
/// Fails on constructs the emitter does not support (non-`i32` types,
/// `inout` parameters, more than one `out` parameter, variable references
/// and function calls in bodies) and on sink write failures.
pub fn compile<W: Write>(program: &Program, out: &mut W) -> Result<(), EmitError> {
    compiler::write_module(program, out)
}
