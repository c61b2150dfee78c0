/*
 * Copyright 2024 Google LLC
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

//! Opaque storage for fields a message does not declare.

use bytes::{Buf, BufMut};
use prost::{
    encoding::{self, WireType},
    DecodeError,
};

/// Maximum group nesting accepted inside an unknown field, matches the
/// recursion limit `prost` applies to known messages.
const RECURSION_LIMIT: u32 = 100;

/// The raw key/value bytes of every field a message did not recognise while
/// decoding, kept in the order they arrived so they can be written back out
/// unchanged.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct UnknownFields {
    raw: Vec<u8>,
}

impl UnknownFields {
    pub const fn new() -> Self {
        Self { raw: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The retained fields, exactly as they will be re-encoded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Returns the field numbers held in the store, in arrival order.
    pub fn field_numbers(&self) -> Vec<u32> {
        let mut numbers = Vec::new();
        let mut buf = self.raw.as_slice();

        while buf.has_remaining() {
            // The store only ever contains well-formed fields.
            let Ok((tag, wire_type)) = encoding::decode_key(&mut buf) else {
                break;
            };
            if encoding::skip_field(wire_type, tag, &mut buf, Default::default()).is_err() {
                break;
            }
            numbers.push(tag);
        }

        numbers
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    pub fn encoded_len(&self) -> usize {
        self.raw.len()
    }

    pub fn encode_raw<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.raw);
    }

    /// Consumes the value of a field whose key has already been read and
    /// stores the complete field. On failure the store is left untouched.
    pub fn merge<B: Buf>(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut B,
    ) -> Result<(), DecodeError> {
        let start = self.raw.len();
        encoding::encode_key(tag, wire_type, &mut self.raw);

        match self.copy_value(tag, wire_type, buf, RECURSION_LIMIT) {
            Ok(()) => {
                tracing::trace!(tag, ?wire_type, "retaining unknown field");
                Ok(())
            }
            Err(error) => {
                self.raw.truncate(start);
                Err(error)
            }
        }
    }

    fn copy_value<B: Buf>(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut B,
        depth: u32,
    ) -> Result<(), DecodeError> {
        match wire_type {
            WireType::Varint => {
                self.copy_varint(buf)?;
            }
            WireType::SixtyFourBit => self.copy_exact(buf, 8)?,
            WireType::ThirtyTwoBit => self.copy_exact(buf, 4)?,
            WireType::LengthDelimited => {
                let len = self.copy_varint(buf)?;
                if len > buf.remaining() as u64 {
                    return Err(DecodeError::new("buffer underflow"));
                }
                self.copy_exact(buf, len as usize)?;
            }
            WireType::StartGroup => {
                if depth == 0 {
                    return Err(DecodeError::new("recursion limit reached"));
                }

                loop {
                    let (inner_tag, inner_wire_type) = self.copy_key(buf)?;

                    if inner_wire_type == WireType::EndGroup {
                        if inner_tag != tag {
                            return Err(DecodeError::new("unexpected end group tag"));
                        }
                        break;
                    }

                    self.copy_value(inner_tag, inner_wire_type, buf, depth - 1)?;
                }
            }
            WireType::EndGroup => return Err(DecodeError::new("unexpected end group tag")),
        }

        Ok(())
    }

    /// Copies one varint byte for byte, so non-canonical encodings survive a
    /// round trip, and returns its value.
    fn copy_varint<B: Buf>(&mut self, buf: &mut B) -> Result<u64, DecodeError> {
        let mut value = 0;
        for count in 0..10 {
            if !buf.has_remaining() {
                return Err(DecodeError::new("invalid varint"));
            }
            let byte = buf.get_u8();
            // The tenth byte may only carry the top bit of a u64.
            if count == 9 && byte > 1 {
                return Err(DecodeError::new("invalid varint"));
            }
            self.raw.push(byte);
            value |= u64::from(byte & 0x7f) << (count * 7);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }

        Err(DecodeError::new("invalid varint"))
    }

    fn copy_key<B: Buf>(&mut self, buf: &mut B) -> Result<(u32, WireType), DecodeError> {
        let key = self.copy_varint(buf)?;
        if key > u64::from(u32::MAX) {
            return Err(DecodeError::new(format!("invalid key value: {key}")));
        }
        let wire_type = WireType::try_from(key & 0x07)?;
        let tag = key as u32 >> 3;
        if tag < encoding::MIN_TAG {
            return Err(DecodeError::new("invalid tag value: 0"));
        }

        Ok((tag, wire_type))
    }

    fn copy_exact<B: Buf>(&mut self, buf: &mut B, len: usize) -> Result<(), DecodeError> {
        if buf.remaining() < len {
            return Err(DecodeError::new("buffer underflow"));
        }

        let start = self.raw.len();
        self.raw.resize(start + len, 0);
        buf.copy_to_slice(&mut self.raw[start..]);
        Ok(())
    }
}

impl std::fmt::Debug for UnknownFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnknownFields")
            .field("fields", &self.field_numbers())
            .field("len", &self.raw.len())
            .finish()
    }
}
