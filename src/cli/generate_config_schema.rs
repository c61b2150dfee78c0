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

use crate::Config;

const FILE_NAME: &str = "config.json";

/// Generates the JSON schema of the `Config` text form.
#[derive(Clone, clap::Args)]
pub struct GenerateConfigSchema {
    /// The directory to write the schema to.
    #[clap(short, long, default_value = ".")]
    pub output_directory: std::path::PathBuf,
}

impl GenerateConfigSchema {
    pub fn generate_config_schema(&self) -> crate::Result<()> {
        let schema = schemars::schema_for!(Config);
        let path = self.output_directory.join(FILE_NAME);

        tracing::info!("Writing config schema to {}", path.display());

        std::fs::write(path, serde_json::to_string_pretty(&schema)?)?;

        Ok(())
    }
}
