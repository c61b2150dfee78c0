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

//! Extensions to `prost` and related crates.

use ::prost::Name;
use prost_types::Any;

use super::Error;

/// The prefix used for the type URL of every message in this crate.
pub const TYPE_URL_PREFIX: &str = "type.googleapis.com";

/// Packs `message` into a `google.protobuf.Any` envelope.
pub fn to_any<M: Name>(message: &M) -> Any {
    Any {
        type_url: M::type_url(),
        value: super::encode(message),
    }
}

/// Unpacks a `google.protobuf.Any` envelope holding an `M`.
pub fn from_any<M: Name + Default>(any: &Any) -> Result<M, Error> {
    let expected = M::type_url();
    if full_name(&any.type_url) != M::full_name() {
        return Err(Error::TypeMismatch {
            expected,
            found: any.type_url.clone(),
        });
    }

    super::decode(&any.value)
}

/// Strips the host portion of a type URL, leaving the fully qualified
/// message name.
fn full_name(type_url: &str) -> &str {
    type_url
        .rsplit_once('/')
        .map_or(type_url, |(_, name)| name)
}
