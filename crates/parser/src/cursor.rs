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

/// Position inside the original input, 1-based as humans read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    /// Bytes between the start of the input and this position.
    pub offset: usize,
}

/// A forward-only view into the source text.
///
/// `current` is always a suffix of `full`; advancing shrinks it from the
/// front. The cursor is `Copy`, so alternatives are tried by handing out
/// copies rather than by rewinding shared state.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    current: &'a str,
    full: &'a str,
    source_name: &'a str,
}

impl<'a> Cursor<'a> {
    pub fn new(full: &'a str, source_name: &'a str) -> Self {
        Self {
            current: full,
            full,
            source_name,
        }
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        self.current
    }

    pub fn source_name(&self) -> &'a str {
        self.source_name
    }

    pub fn is_at_end(&self) -> bool {
        self.current.is_empty()
    }

    /// Byte offset of this cursor within the original input.
    pub fn offset(&self) -> usize {
        self.full.len() - self.current.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.current.chars().next()
    }

    /// Consume `bytes` bytes. Callers only advance past text they have
    /// already matched, so the boundary is always valid.
    pub fn advance(self, bytes: usize) -> Cursor<'a> {
        Cursor {
            current: &self.current[bytes..],
            ..self
        }
    }

    /// Skip over spaces, tabs and newlines.
    pub fn skip_whitespace(self) -> Cursor<'a> {
        let trimmed = self
            .current
            .trim_start_matches(|c| c == ' ' || c == '\t' || c == '\n');
        self.advance(self.current.len() - trimmed.len())
    }

    /// Resolve this cursor to a line and column in the original input.
    ///
    /// Lines are counted from 1 by the newlines strictly before the cursor.
    /// The column is the byte distance from the last preceding newline, or
    /// `offset + 1` on the first line.
    pub fn location(&self) -> SourceLocation {
        let offset = self.offset();
        let before = &self.full[..offset];
        let line = 1 + before.bytes().filter(|b| *b == b'\n').count();
        let column = match before.rfind('\n') {
            Some(newline_offset) => offset - newline_offset,
            None => offset + 1,
        };
        SourceLocation {
            line,
            column,
            offset,
        }
    }
}
