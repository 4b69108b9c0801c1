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

//! Hand-written recursive-descent parser for the defun language.
//!
//! Parsing works directly on the source text through a forward-only
//! [`cursor::Cursor`]. Every parsing routine follows one discipline: a
//! structural miss (an alternative that can still be tried) comes back as a
//! [`ParseResult`] with `ok == false` and nothing consumed, while an
//! unrecoverable failure propagates as a [`ParseError`] carrying the line
//! and column where parsing stopped.

pub mod cursor;
mod parser;

#[cfg(test)]
mod tests;

pub use parser::{parse, ParseError, ParseResult};
