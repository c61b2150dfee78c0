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

/// Automatic distribution of client certificates.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct AutoEncrypt {
    #[serde(rename = "TLS", skip_serializing_if = "is_false")]
    pub tls: bool,
    #[serde(rename = "DNSSAN", skip_serializing_if = "Vec::is_empty")]
    pub dns_san: Vec<String>,
    #[serde(rename = "IPSAN", skip_serializing_if = "Vec::is_empty")]
    pub ip_san: Vec<String>,
    #[serde(rename = "AllowTLS", skip_serializing_if = "is_false")]
    pub allow_tls: bool,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl AutoEncrypt {
    pub(crate) const EMPTY: Self = Self {
        tls: false,
        dns_san: Vec::new(),
        ip_san: Vec::new(),
        allow_tls: false,
        unknown_fields: UnknownFields::new(),
    };
}

impl Message for AutoEncrypt {
    fn encode_raw<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        field::boolean(1, self.tls, buf);
        encoding::string::encode_repeated(2, &self.dns_san, buf);
        encoding::string::encode_repeated(3, &self.ip_san, buf);
        field::boolean(4, self.allow_tls, buf);
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
        const NAME: &str = "AutoEncrypt";
        match tag {
            1 => encoding::bool::merge(wire_type, &mut self.tls, buf, ctx)
                .map_err(field::context(NAME, "tls")),
            2 => encoding::string::merge_repeated(wire_type, &mut self.dns_san, buf, ctx)
                .map_err(field::context(NAME, "dns_san")),
            3 => encoding::string::merge_repeated(wire_type, &mut self.ip_san, buf, ctx)
                .map_err(field::context(NAME, "ip_san")),
            4 => encoding::bool::merge(wire_type, &mut self.allow_tls, buf, ctx)
                .map_err(field::context(NAME, "allow_tls")),
            _ => self.unknown_fields.merge(tag, wire_type, buf),
        }
    }

    fn encoded_len(&self) -> usize {
        field::boolean_len(1, self.tls)
            + encoding::string::encoded_len_repeated(2, &self.dns_san)
            + encoding::string::encoded_len_repeated(3, &self.ip_san)
            + field::boolean_len(4, self.allow_tls)
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
    fn interleaved_sans_keep_per_field_order() {
        // DNSSAN and IPSAN entries interleaved on the wire.
        let bytes = b"\x12\x01a\x1a\x011\x12\x01b\x1a\x012\x12\x01c";
        let auto_encrypt = AutoEncrypt::decode(&bytes[..]).unwrap();

        assert_eq!(auto_encrypt.dns_san, ["a", "b", "c"]);
        assert_eq!(auto_encrypt.ip_san, ["1", "2"]);
        assert_eq!(
            auto_encrypt.encode_to_vec(),
            b"\x12\x01a\x12\x01b\x12\x01c\x1a\x011\x1a\x012"
        );
    }

    #[test]
    fn flags() {
        let auto_encrypt = AutoEncrypt {
            tls: true,
            allow_tls: true,
            ..<_>::default()
        };

        assert_eq!(auto_encrypt.encode_to_vec(), [0x08, 0x01, 0x20, 0x01]);
        assert_eq!(
            serde_json::to_value(&auto_encrypt).unwrap(),
            serde_json::json!({ "TLS": true, "AllowTLS": true })
        );
    }
}
