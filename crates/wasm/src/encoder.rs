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

//! Low-level binary building blocks: LEB128 integers, length-prefixed
//! vectors, names and section frames.

use std::io::{self, Write};

pub const MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];
pub const VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

pub fn write_byte<W: Write>(out: &mut W, byte: u8) -> io::Result<()> {
    out.write_all(&[byte])
}

/// Unsigned LEB128: 7-bit groups, little-endian, continuation bit on every
/// byte but the last.
pub fn write_uleb128<W: Write>(out: &mut W, mut value: u32) -> io::Result<()> {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            return write_byte(out, byte);
        }
        write_byte(out, byte | 0x80)?;
    }
}

/// Signed LEB128: two's complement, sign-extended. The encoding ends on a
/// byte whose bit 6 agrees with the sign of the remaining value.
pub fn write_sleb128<W: Write>(out: &mut W, mut value: i32) -> io::Result<()> {
    loop {
        let byte = (value as u8) & 0x7F;
        value >>= 7;
        let sign_bit_clear = byte & 0x40 == 0;
        if (value == 0 && sign_bit_clear) || (value == -1 && !sign_bit_clear) {
            return write_byte(out, byte);
        }
        write_byte(out, byte | 0x80)?;
    }
}

/// A byte vector: ULEB128 length followed by the contents.
pub fn write_vector<W: Write>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    let length = u32::try_from(bytes.len()).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "vector too long for a module")
    })?;
    write_uleb128(out, length)?;
    out.write_all(bytes)
}

/// A name: its UTF-8 bytes as a vector.
pub fn write_name<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    write_vector(out, name.as_bytes())
}

/// A section frame: the section id followed by the contents as a vector.
pub fn write_section<W: Write>(out: &mut W, id: u8, contents: &[u8]) -> io::Result<()> {
    write_byte(out, id)?;
    write_vector(out, contents)
}
