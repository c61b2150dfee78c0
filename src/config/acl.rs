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

/// Access control settings.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct Acl {
    #[serde(rename = "Enabled", skip_serializing_if = "is_false")]
    pub enabled: bool,
    #[serde(rename = "PolicyTTL", skip_serializing_if = "String::is_empty")]
    pub policy_ttl: String,
    #[serde(rename = "RoleTTL", skip_serializing_if = "String::is_empty")]
    pub role_ttl: String,
    #[serde(rename = "TokenTTL", skip_serializing_if = "String::is_empty")]
    pub token_ttl: String,
    #[serde(rename = "DownPolicy", skip_serializing_if = "String::is_empty")]
    pub down_policy: String,
    #[serde(rename = "DefaultPolicy", skip_serializing_if = "String::is_empty")]
    pub default_policy: String,
    #[serde(rename = "EnableKeyListPolicy", skip_serializing_if = "is_false")]
    pub enable_key_list_policy: bool,
    #[serde(rename = "Tokens", skip_serializing_if = "Option::is_none")]
    pub tokens: Option<AclTokens>,
    /// No longer populated and should be ignored by clients. Kept so that
    /// field 9 is still carried through for older peers.
    #[serde(
        rename = "Deprecated_DisabledTTL",
        alias = "DeprecatedDisabledTTL",
        skip_serializing_if = "String::is_empty"
    )]
    pub deprecated_disabled_ttl: String,
    #[serde(rename = "EnableTokenPersistence", skip_serializing_if = "is_false")]
    pub enable_token_persistence: bool,
    #[serde(rename = "MSPDisableBootstrap", skip_serializing_if = "is_false")]
    pub msp_disable_bootstrap: bool,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl Acl {
    pub(crate) const EMPTY: Self = Self {
        enabled: false,
        policy_ttl: String::new(),
        role_ttl: String::new(),
        token_ttl: String::new(),
        down_policy: String::new(),
        default_policy: String::new(),
        enable_key_list_policy: false,
        tokens: None,
        deprecated_disabled_ttl: String::new(),
        enable_token_persistence: false,
        msp_disable_bootstrap: false,
        unknown_fields: UnknownFields::new(),
    };

    /// Returns the configured tokens, or an empty `AclTokens` when unset.
    pub fn tokens(&self) -> &AclTokens {
        static EMPTY: AclTokens = AclTokens::EMPTY;
        self.tokens.as_ref().unwrap_or(&EMPTY)
    }
}

impl Message for Acl {
    fn encode_raw<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        field::boolean(1, self.enabled, buf);
        field::string(2, &self.policy_ttl, buf);
        field::string(3, &self.role_ttl, buf);
        field::string(4, &self.token_ttl, buf);
        field::string(5, &self.down_policy, buf);
        field::string(6, &self.default_policy, buf);
        field::boolean(7, self.enable_key_list_policy, buf);
        field::message(8, &self.tokens, buf);
        field::string(9, &self.deprecated_disabled_ttl, buf);
        field::boolean(10, self.enable_token_persistence, buf);
        field::boolean(11, self.msp_disable_bootstrap, buf);
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
        const NAME: &str = "ACL";
        match tag {
            1 => encoding::bool::merge(wire_type, &mut self.enabled, buf, ctx)
                .map_err(field::context(NAME, "enabled")),
            2 => encoding::string::merge(wire_type, &mut self.policy_ttl, buf, ctx)
                .map_err(field::context(NAME, "policy_ttl")),
            3 => encoding::string::merge(wire_type, &mut self.role_ttl, buf, ctx)
                .map_err(field::context(NAME, "role_ttl")),
            4 => encoding::string::merge(wire_type, &mut self.token_ttl, buf, ctx)
                .map_err(field::context(NAME, "token_ttl")),
            5 => encoding::string::merge(wire_type, &mut self.down_policy, buf, ctx)
                .map_err(field::context(NAME, "down_policy")),
            6 => encoding::string::merge(wire_type, &mut self.default_policy, buf, ctx)
                .map_err(field::context(NAME, "default_policy")),
            7 => encoding::bool::merge(wire_type, &mut self.enable_key_list_policy, buf, ctx)
                .map_err(field::context(NAME, "enable_key_list_policy")),
            8 => encoding::message::merge(
                wire_type,
                self.tokens.get_or_insert_with(Default::default),
                buf,
                ctx,
            )
            .map_err(field::context(NAME, "tokens")),
            9 => encoding::string::merge(wire_type, &mut self.deprecated_disabled_ttl, buf, ctx)
                .map_err(field::context(NAME, "deprecated_disabled_ttl")),
            10 => encoding::bool::merge(wire_type, &mut self.enable_token_persistence, buf, ctx)
                .map_err(field::context(NAME, "enable_token_persistence")),
            11 => encoding::bool::merge(wire_type, &mut self.msp_disable_bootstrap, buf, ctx)
                .map_err(field::context(NAME, "msp_disable_bootstrap")),
            _ => self.unknown_fields.merge(tag, wire_type, buf),
        }
    }

    fn encoded_len(&self) -> usize {
        field::boolean_len(1, self.enabled)
            + field::string_len(2, &self.policy_ttl)
            + field::string_len(3, &self.role_ttl)
            + field::string_len(4, &self.token_ttl)
            + field::string_len(5, &self.down_policy)
            + field::string_len(6, &self.default_policy)
            + field::boolean_len(7, self.enable_key_list_policy)
            + field::message_len(8, &self.tokens)
            + field::string_len(9, &self.deprecated_disabled_ttl)
            + field::boolean_len(10, self.enable_token_persistence)
            + field::boolean_len(11, self.msp_disable_bootstrap)
            + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The well known tokens an agent is configured with.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct AclTokens {
    #[serde(rename = "InitialManagement", skip_serializing_if = "String::is_empty")]
    pub initial_management: String,
    #[serde(rename = "Replication", skip_serializing_if = "String::is_empty")]
    pub replication: String,
    #[serde(rename = "AgentRecovery", skip_serializing_if = "String::is_empty")]
    pub agent_recovery: String,
    #[serde(rename = "Default", skip_serializing_if = "String::is_empty")]
    pub default: String,
    #[serde(rename = "Agent", skip_serializing_if = "String::is_empty")]
    pub agent: String,
    #[serde(rename = "ManagedServiceProvider", skip_serializing_if = "Vec::is_empty")]
    pub managed_service_provider: Vec<AclServiceProviderToken>,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl AclTokens {
    pub(crate) const EMPTY: Self = Self {
        initial_management: String::new(),
        replication: String::new(),
        agent_recovery: String::new(),
        default: String::new(),
        agent: String::new(),
        managed_service_provider: Vec::new(),
        unknown_fields: UnknownFields::new(),
    };
}

impl Message for AclTokens {
    fn encode_raw<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        field::string(1, &self.initial_management, buf);
        field::string(2, &self.replication, buf);
        field::string(3, &self.agent_recovery, buf);
        field::string(4, &self.default, buf);
        field::string(5, &self.agent, buf);
        encoding::message::encode_repeated(6, &self.managed_service_provider, buf);
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
        const NAME: &str = "ACLTokens";
        match tag {
            1 => encoding::string::merge(wire_type, &mut self.initial_management, buf, ctx)
                .map_err(field::context(NAME, "initial_management")),
            2 => encoding::string::merge(wire_type, &mut self.replication, buf, ctx)
                .map_err(field::context(NAME, "replication")),
            3 => encoding::string::merge(wire_type, &mut self.agent_recovery, buf, ctx)
                .map_err(field::context(NAME, "agent_recovery")),
            4 => encoding::string::merge(wire_type, &mut self.default, buf, ctx)
                .map_err(field::context(NAME, "default")),
            5 => encoding::string::merge(wire_type, &mut self.agent, buf, ctx)
                .map_err(field::context(NAME, "agent")),
            6 => encoding::message::merge_repeated(
                wire_type,
                &mut self.managed_service_provider,
                buf,
                ctx,
            )
            .map_err(field::context(NAME, "managed_service_provider")),
            _ => self.unknown_fields.merge(tag, wire_type, buf),
        }
    }

    fn encoded_len(&self) -> usize {
        field::string_len(1, &self.initial_management)
            + field::string_len(2, &self.replication)
            + field::string_len(3, &self.agent_recovery)
            + field::string_len(4, &self.default)
            + field::string_len(5, &self.agent)
            + encoding::message::encoded_len_repeated(6, &self.managed_service_provider)
            + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A token pair handed to a managed service provider.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct AclServiceProviderToken {
    #[serde(rename = "AccessorID", skip_serializing_if = "String::is_empty")]
    pub accessor_id: String,
    #[serde(rename = "SecretID", skip_serializing_if = "String::is_empty")]
    pub secret_id: String,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl Message for AclServiceProviderToken {
    fn encode_raw<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        field::string(1, &self.accessor_id, buf);
        field::string(2, &self.secret_id, buf);
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
        const NAME: &str = "ACLServiceProviderToken";
        match tag {
            1 => encoding::string::merge(wire_type, &mut self.accessor_id, buf, ctx)
                .map_err(field::context(NAME, "accessor_id")),
            2 => encoding::string::merge(wire_type, &mut self.secret_id, buf, ctx)
                .map_err(field::context(NAME, "secret_id")),
            _ => self.unknown_fields.merge(tag, wire_type, buf),
        }
    }

    fn encoded_len(&self) -> usize {
        field::string_len(1, &self.accessor_id)
            + field::string_len(2, &self.secret_id)
            + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}
