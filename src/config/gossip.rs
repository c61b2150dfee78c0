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

/// LAN gossip pool settings.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct Gossip {
    #[serde(rename = "Encryption", skip_serializing_if = "Option::is_none")]
    pub encryption: Option<GossipEncryption>,
    /// Addresses to join on start, tried in order.
    #[serde(rename = "RetryJoinLAN", skip_serializing_if = "Vec::is_empty")]
    pub retry_join_lan: Vec<String>,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl Gossip {
    pub(crate) const EMPTY: Self = Self {
        encryption: None,
        retry_join_lan: Vec::new(),
        unknown_fields: UnknownFields::new(),
    };

    pub fn encryption(&self) -> &GossipEncryption {
        static EMPTY: GossipEncryption = GossipEncryption::EMPTY;
        self.encryption.as_ref().unwrap_or(&EMPTY)
    }
}

impl Message for Gossip {
    fn encode_raw<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        field::message(1, &self.encryption, buf);
        encoding::string::encode_repeated(2, &self.retry_join_lan, buf);
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
        const NAME: &str = "Gossip";
        match tag {
            1 => encoding::message::merge(
                wire_type,
                self.encryption.get_or_insert_with(Default::default),
                buf,
                ctx,
            )
            .map_err(field::context(NAME, "encryption")),
            2 => encoding::string::merge_repeated(wire_type, &mut self.retry_join_lan, buf, ctx)
                .map_err(field::context(NAME, "retry_join_lan")),
            _ => self.unknown_fields.merge(tag, wire_type, buf),
        }
    }

    fn encoded_len(&self) -> usize {
        field::message_len(1, &self.encryption)
            + encoding::string::encoded_len_repeated(2, &self.retry_join_lan)
            + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Gossip encryption key and verification mode.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct GossipEncryption {
    #[serde(rename = "Key", skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(rename = "VerifyIncoming", skip_serializing_if = "is_false")]
    pub verify_incoming: bool,
    #[serde(rename = "VerifyOutgoing", skip_serializing_if = "is_false")]
    pub verify_outgoing: bool,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl GossipEncryption {
    pub(crate) const EMPTY: Self = Self {
        key: String::new(),
        verify_incoming: false,
        verify_outgoing: false,
        unknown_fields: UnknownFields::new(),
    };
}

impl Message for GossipEncryption {
    fn encode_raw<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        field::string(1, &self.key, buf);
        field::boolean(2, self.verify_incoming, buf);
        field::boolean(3, self.verify_outgoing, buf);
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
        const NAME: &str = "GossipEncryption";
        match tag {
            1 => encoding::string::merge(wire_type, &mut self.key, buf, ctx)
                .map_err(field::context(NAME, "key")),
            2 => encoding::bool::merge(wire_type, &mut self.verify_incoming, buf, ctx)
                .map_err(field::context(NAME, "verify_incoming")),
            3 => encoding::bool::merge(wire_type, &mut self.verify_outgoing, buf, ctx)
                .map_err(field::context(NAME, "verify_outgoing")),
            _ => self.unknown_fields.merge(tag, wire_type, buf),
        }
    }

    fn encoded_len(&self) -> usize {
        field::string_len(1, &self.key)
            + field::boolean_len(2, self.verify_incoming)
            + field::boolean_len(3, self.verify_outgoing)
            + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}
