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

//! Proto3 implicit-presence wrappers over `prost::encoding`, shared by the
//! hand written `Message` impls.

use bytes::BufMut;
use prost::{encoding, DecodeError, Message};

pub fn string<B: BufMut>(tag: u32, value: &String, buf: &mut B) {
    if !value.is_empty() {
        encoding::string::encode(tag, value, buf);
    }
}

pub fn string_len(tag: u32, value: &String) -> usize {
    if value.is_empty() {
        0
    } else {
        encoding::string::encoded_len(tag, value)
    }
}

pub fn boolean<B: BufMut>(tag: u32, value: bool, buf: &mut B) {
    if value {
        encoding::bool::encode(tag, &value, buf);
    }
}

pub fn boolean_len(tag: u32, value: bool) -> usize {
    if value {
        encoding::bool::encoded_len(tag, &value)
    } else {
        0
    }
}

pub fn message<M: Message, B: BufMut>(tag: u32, value: &Option<M>, buf: &mut B) {
    if let Some(value) = value {
        encoding::message::encode(tag, value, buf);
    }
}

pub fn message_len<M: Message>(tag: u32, value: &Option<M>) -> usize {
    value
        .as_ref()
        .map_or(0, |value| encoding::message::encoded_len(tag, value))
}

/// Records which message and field a decode error happened in.
pub fn context(
    message: &'static str,
    field: &'static str,
) -> impl FnOnce(DecodeError) -> DecodeError {
    move |mut error| {
        error.push(message, field);
        error
    }
}
