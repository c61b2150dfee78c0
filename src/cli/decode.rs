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

use std::path::PathBuf;

use super::Format;
use crate::{codec, Config, UnknownFields};

/// Decodes a binary `Config` into its JSON or YAML text form.
#[derive(Clone, clap::Args)]
pub struct Decode {
    /// The file holding the encoded configuration, `-` for stdin.
    #[clap(short, long, default_value = super::STDIO)]
    pub input: PathBuf,
    /// The file to write the text form to, `-` for stdout.
    #[clap(short, long, default_value = super::STDIO)]
    pub output: PathBuf,
    #[clap(short, long, env = "PBCONFIG_FORMAT", value_enum, default_value_t)]
    pub format: Format,
    /// Whether the input is base64 text rather than raw bytes.
    #[clap(long, env = "PBCONFIG_BASE64")]
    pub base64: bool,
}

impl Decode {
    pub fn decode(&self) -> crate::Result<()> {
        let input = super::read_input(&self.input)?;
        let config: Config = if self.base64 {
            codec::base64::decode(&input)?
        } else {
            codec::decode(&input)?
        };

        for (path, fields) in unknown_fields(&config) {
            tracing::warn!(
                %path,
                ?fields,
                "unknown fields have no text form and were dropped"
            );
        }

        tracing::info!(len = input.len(), "decoded configuration");
        super::write_output(&self.output, &self.format.serialize(&config)?)?;
        Ok(())
    }
}

/// Lists the unknown field numbers retained anywhere in `config`, keyed by
/// the path of the message holding them.
fn unknown_fields(config: &Config) -> Vec<(String, Vec<u32>)> {
    fn note(found: &mut Vec<(String, Vec<u32>)>, path: &str, fields: &UnknownFields) {
        if !fields.is_empty() {
            found.push((path.to_owned(), fields.field_numbers()));
        }
    }

    let mut found = Vec::new();
    note(&mut found, "Config", &config.unknown_fields);

    if let Some(acl) = &config.acl {
        note(&mut found, "Config.ACL", &acl.unknown_fields);
        if let Some(tokens) = &acl.tokens {
            note(&mut found, "Config.ACL.Tokens", &tokens.unknown_fields);
            for (index, provider) in tokens.managed_service_provider.iter().enumerate() {
                note(
                    &mut found,
                    &format!("Config.ACL.Tokens.ManagedServiceProvider[{index}]"),
                    &provider.unknown_fields,
                );
            }
        }
    }
    if let Some(auto_encrypt) = &config.auto_encrypt {
        note(&mut found, "Config.AutoEncrypt", &auto_encrypt.unknown_fields);
    }
    if let Some(gossip) = &config.gossip {
        note(&mut found, "Config.Gossip", &gossip.unknown_fields);
        if let Some(encryption) = &gossip.encryption {
            note(&mut found, "Config.Gossip.Encryption", &encryption.unknown_fields);
        }
    }
    if let Some(tls) = &config.tls {
        note(&mut found, "Config.TLS", &tls.unknown_fields);
    }

    found
}
