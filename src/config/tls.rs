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

use bytes::{Buf, BufMut};
use prost::{
    encoding::{self, DecodeContext, WireType},
    DecodeError, Message,
};
use serde::{Deserialize, Serialize};

use super::is_false;
use crate::codec::{field, UnknownFields};

/// Outgoing TLS settings.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct Tls {
    #[serde(rename = "VerifyOutgoing", skip_serializing_if = "is_false")]
    pub verify_outgoing: bool,
    #[serde(rename = "VerifyServerHostname", skip_serializing_if = "is_false")]
    pub verify_server_hostname: bool,
    #[serde(rename = "CipherSuites", skip_serializing_if = "String::is_empty")]
    pub cipher_suites: String,
    #[serde(rename = "MinVersion", skip_serializing_if = "String::is_empty")]
    pub min_version: String,
    /// No longer populated and should be ignored by clients.
    #[serde(
        rename = "Deprecated_PreferServerCipherSuites",
        alias = "DeprecatedPreferServerCipherSuites",
        skip_serializing_if = "is_false"
    )]
    pub deprecated_prefer_server_cipher_suites: bool,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl Tls {
    pub(crate) const EMPTY: Self = Self {
        verify_outgoing: false,
        verify_server_hostname: false,
        cipher_suites: String::new(),
        min_version: String::new(),
        deprecated_prefer_server_cipher_suites: false,
        unknown_fields: UnknownFields::new(),
    };
}

impl Message for Tls {
    fn encode_raw<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        field::boolean(1, self.verify_outgoing, buf);
        field::boolean(2, self.verify_server_hostname, buf);
        field::string(3, &self.cipher_suites, buf);
        field::string(4, &self.min_version, buf);
        field::boolean(5, self.deprecated_prefer_server_cipher_suites, buf);
        self.unknown_fields.encode_raw(buf);
    }

    fn merge_field<B>(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError>
    where
        B: Buf,
    {
        const NAME: &str = "TLS";
        match tag {
            1 => encoding::bool::merge(wire_type, &mut self.verify_outgoing, buf, ctx)
                .map_err(field::context(NAME, "verify_outgoing")),
            2 => encoding::bool::merge(wire_type, &mut self.verify_server_hostname, buf, ctx)
                .map_err(field::context(NAME, "verify_server_hostname")),
            3 => encoding::string::merge(wire_type, &mut self.cipher_suites, buf, ctx)
                .map_err(field::context(NAME, "cipher_suites")),
            4 => encoding::string::merge(wire_type, &mut self.min_version, buf, ctx)
                .map_err(field::context(NAME, "min_version")),
            5 => encoding::bool::merge(
                wire_type,
                &mut self.deprecated_prefer_server_cipher_suites,
                buf,
                ctx,
            )
            .map_err(field::context(NAME, "deprecated_prefer_server_cipher_suites")),
            _ => self.unknown_fields.merge(tag, wire_type, buf),
        }
    }

    fn encoded_len(&self) -> usize {
        field::boolean_len(1, self.verify_outgoing)
            + field::boolean_len(2, self.verify_server_hostname)
            + field::string_len(3, &self.cipher_suites)
            + field::string_len(4, &self.min_version)
            + field::boolean_len(5, self.deprecated_prefer_server_cipher_suites)
            + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn deprecated_prefer_server_cipher_suites_is_carried() {
        let tls = Tls {
            min_version: "tls12".into(),
            deprecated_prefer_server_cipher_suites: true,
            ..<_>::default()
        };

        let bytes = tls.encode_to_vec();
        assert_eq!(bytes, b"\x22\x05tls12\x28\x01");
        assert_eq!(Tls::decode(&*bytes).unwrap(), tls);
    }

    #[test]
    fn non_canonical_bool_decodes_as_true() {
        // VerifyOutgoing encoded with a two byte varint of value 2.
        let tls = Tls::decode(&[0x08, 0x82, 0x00][..]).unwrap();
        assert!(tls.verify_outgoing);
        assert_eq!(tls.encode_to_vec(), [0x08, 0x01]);
    }

    #[test]
    fn protojson_alias_for_deprecated_field() {
        let tls: Tls =
            serde_yaml::from_str("DeprecatedPreferServerCipherSuites: true\nMinVersion: tls13")
                .unwrap();

        assert!(tls.deprecated_prefer_server_cipher_suites);
        assert_eq!(tls.min_version, "tls13");
    }
}
