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
use crate::codec;

/// Encodes the JSON or YAML text form of a `Config` into its binary form.
#[derive(Clone, clap::Args)]
pub struct Encode {
    /// The file holding the text form, `-` for stdin.
    #[clap(short, long, default_value = super::STDIO)]
    pub input: PathBuf,
    /// The file to write the encoded configuration to, `-` for stdout.
    #[clap(short, long, default_value = super::STDIO)]
    pub output: PathBuf,
    #[clap(short, long, env = "PBCONFIG_FORMAT", value_enum, default_value_t)]
    pub format: Format,
    /// Write base64 text rather than raw bytes.
    #[clap(long, env = "PBCONFIG_BASE64")]
    pub base64: bool,
}

impl Encode {
    pub fn encode(&self) -> crate::Result<()> {
        let input = super::read_input(&self.input)?;
        let config = self.format.deserialize(&input)?;

        let output = if self.base64 {
            let mut text = codec::base64::encode(&config);
            text.push('\n');
            text.into_bytes()
        } else {
            codec::encode(&config)
        };

        tracing::info!(len = output.len(), "encoded configuration");
        super::write_output(&self.output, &output)?;
        Ok(())
    }
}
