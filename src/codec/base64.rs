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

//! Base64 transport form of the binary encoding.

use ::base64::Engine;

use super::Error;

#[inline]
pub fn encode<M: ::prost::Message>(message: &M) -> String {
    ::base64::engine::general_purpose::STANDARD.encode(super::encode(message))
}

/// Decodes a message from base64 text, surrounding whitespace is ignored.
#[inline]
pub fn decode<M: ::prost::Message + Default, A: AsRef<[u8]>>(input: A) -> Result<M, Error> {
    let bytes = ::base64::engine::general_purpose::STANDARD.decode(trim(input.as_ref()))?;
    super::decode(&bytes)
}

fn trim(input: &[u8]) -> &[u8] {
    let start = input
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(input.len());
    let end = input
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &input[start..end]
}
