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

//! The `hashicorp.consul.internal.config` message set.
//!
//! Every type mirrors one message of `proto/private/pbconfig/config.proto`.
//! Field numbers are the compatibility contract with other producers and
//! consumers and must never be reused. Scalars have implicit presence, so a
//! zero value is never written to the wire, while singular message fields are
//! `Option`s and are only written when set.

mod acl;
mod auto_encrypt;
mod gossip;
mod tls;

use std::io;

use bytes::{Buf, BufMut};
use prost::{
    encoding::{self, DecodeContext, WireType},
    DecodeError, Message,
};
use serde::{Deserialize, Serialize};

use crate::codec::{field, UnknownFields};

pub use self::{
    acl::{Acl, AclServiceProviderToken, AclTokens},
    auto_encrypt::AutoEncrypt,
    gossip::{Gossip, GossipEncryption},
    tls::Tls,
};

/// The protobuf package every message in this module belongs to.
pub const PACKAGE: &str = "hashicorp.consul.internal.config";

macro_rules! impl_name {
    ($($ty:ty => $name:literal),+ $(,)?) => {
        $(
            impl ::prost::Name for $ty {
                const NAME: &'static str = $name;
                const PACKAGE: &'static str = $crate::config::PACKAGE;

                fn type_url() -> String {
                    format!(
                        "{}/{}",
                        $crate::codec::prost::TYPE_URL_PREFIX,
                        <Self as ::prost::Name>::full_name()
                    )
                }
            }
        )+
    };
}

impl_name! {
    Config => "Config",
    Gossip => "Gossip",
    GossipEncryption => "GossipEncryption",
    Tls => "TLS",
    Acl => "ACL",
    AclTokens => "ACLTokens",
    AclServiceProviderToken => "ACLServiceProviderToken",
    AutoEncrypt => "AutoEncrypt",
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Agent configuration distributed to cluster members.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "Datacenter", skip_serializing_if = "String::is_empty")]
    pub datacenter: String,
    #[serde(rename = "PrimaryDatacenter", skip_serializing_if = "String::is_empty")]
    pub primary_datacenter: String,
    #[serde(rename = "NodeName", skip_serializing_if = "String::is_empty")]
    pub node_name: String,
    #[serde(rename = "SegmentName", skip_serializing_if = "String::is_empty")]
    pub segment_name: String,
    #[serde(rename = "Partition", skip_serializing_if = "String::is_empty")]
    pub partition: String,
    #[serde(rename = "ACL", skip_serializing_if = "Option::is_none")]
    pub acl: Option<Acl>,
    #[serde(rename = "AutoEncrypt", skip_serializing_if = "Option::is_none")]
    pub auto_encrypt: Option<AutoEncrypt>,
    #[serde(rename = "Gossip", skip_serializing_if = "Option::is_none")]
    pub gossip: Option<Gossip>,
    #[serde(rename = "TLS", skip_serializing_if = "Option::is_none")]
    pub tls: Option<Tls>,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl Config {
    /// Returns the ACL settings, or an empty `Acl` when unset.
    pub fn acl(&self) -> &Acl {
        static EMPTY: Acl = Acl::EMPTY;
        self.acl.as_ref().unwrap_or(&EMPTY)
    }

    /// Returns the auto-encrypt settings, or an empty `AutoEncrypt` when unset.
    pub fn auto_encrypt(&self) -> &AutoEncrypt {
        static EMPTY: AutoEncrypt = AutoEncrypt::EMPTY;
        self.auto_encrypt.as_ref().unwrap_or(&EMPTY)
    }

    /// Returns the gossip settings, or an empty `Gossip` when unset.
    pub fn gossip(&self) -> &Gossip {
        static EMPTY: Gossip = Gossip::EMPTY;
        self.gossip.as_ref().unwrap_or(&EMPTY)
    }

    /// Returns the TLS settings, or an empty `Tls` when unset.
    pub fn tls(&self) -> &Tls {
        static EMPTY: Tls = Tls::EMPTY;
        self.tls.as_ref().unwrap_or(&EMPTY)
    }

    /// Reads the YAML text form of a `Config`. JSON input is accepted as
    /// well, being a subset of YAML.
    pub fn from_reader<R: io::Read>(input: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(input)
    }
}

impl Message for Config {
    fn encode_raw<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        field::string(1, &self.datacenter, buf);
        field::string(2, &self.primary_datacenter, buf);
        field::string(3, &self.node_name, buf);
        field::string(4, &self.segment_name, buf);
        field::message(5, &self.acl, buf);
        field::message(6, &self.auto_encrypt, buf);
        field::message(7, &self.gossip, buf);
        field::message(8, &self.tls, buf);
        field::string(9, &self.partition, buf);
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
        const NAME: &str = "Config";
        match tag {
            1 => encoding::string::merge(wire_type, &mut self.datacenter, buf, ctx)
                .map_err(field::context(NAME, "datacenter")),
            2 => encoding::string::merge(wire_type, &mut self.primary_datacenter, buf, ctx)
                .map_err(field::context(NAME, "primary_datacenter")),
            3 => encoding::string::merge(wire_type, &mut self.node_name, buf, ctx)
                .map_err(field::context(NAME, "node_name")),
            4 => encoding::string::merge(wire_type, &mut self.segment_name, buf, ctx)
                .map_err(field::context(NAME, "segment_name")),
            5 => encoding::message::merge(
                wire_type,
                self.acl.get_or_insert_with(Default::default),
                buf,
                ctx,
            )
            .map_err(field::context(NAME, "acl")),
            6 => encoding::message::merge(
                wire_type,
                self.auto_encrypt.get_or_insert_with(Default::default),
                buf,
                ctx,
            )
            .map_err(field::context(NAME, "auto_encrypt")),
            7 => encoding::message::merge(
                wire_type,
                self.gossip.get_or_insert_with(Default::default),
                buf,
                ctx,
            )
            .map_err(field::context(NAME, "gossip")),
            8 => encoding::message::merge(
                wire_type,
                self.tls.get_or_insert_with(Default::default),
                buf,
                ctx,
            )
            .map_err(field::context(NAME, "tls")),
            9 => encoding::string::merge(wire_type, &mut self.partition, buf, ctx)
                .map_err(field::context(NAME, "partition")),
            _ => self.unknown_fields.merge(tag, wire_type, buf),
        }
    }

    fn encoded_len(&self) -> usize {
        field::string_len(1, &self.datacenter)
            + field::string_len(2, &self.primary_datacenter)
            + field::string_len(3, &self.node_name)
            + field::string_len(4, &self.segment_name)
            + field::message_len(5, &self.acl)
            + field::message_len(6, &self.auto_encrypt)
            + field::message_len(7, &self.gossip)
            + field::message_len(8, &self.tls)
            + field::string_len(9, &self.partition)
            + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}
