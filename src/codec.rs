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

//! Wire encoding and decoding of the configuration messages.

pub mod base64;
pub(crate) mod field;
pub mod prost;
mod unknown;

pub use self::unknown::UnknownFields;

/// Failure to turn bytes (or an envelope) back into a message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input does not follow the protobuf wire grammar, or a nested
    /// message failed to decode.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] ::prost::DecodeError),
    #[error("expected message type `{expected}`, found `{found}`")]
    TypeMismatch { expected: String, found: String },
    #[error("invalid base64: {0}")]
    Base64(#[from] ::base64::DecodeError),
}

/// Encodes `message` into its proto3 binary form.
pub fn encode<M: ::prost::Message>(message: &M) -> Vec<u8> {
    message.encode_to_vec()
}

/// Decodes a message of type `M` from its proto3 binary form.
pub fn decode<M: ::prost::Message + Default>(bytes: &[u8]) -> Result<M, Error> {
    M::decode(bytes).map_err(|error| {
        tracing::debug!(%error, len = bytes.len(), "failed to decode message");
        Error::MalformedInput(error)
    })
}
