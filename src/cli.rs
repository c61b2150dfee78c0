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

mod decode;
mod encode;
mod generate_config_schema;

use std::{
    io::{self, Read, Write},
    path::Path,
};

use crate::Config;

pub use self::{decode::Decode, encode::Encode, generate_config_schema::GenerateConfigSchema};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const STDIO: &str = "-";

/// The Command-Line Interface for pbconfig.
#[derive(clap::Parser)]
#[clap(version, about)]
#[non_exhaustive]
pub struct Cli {
    /// Whether pbconfig will report any logs to stderr.
    #[clap(short, long, env = "PBCONFIG_QUIET")]
    pub quiet: bool,
    #[clap(subcommand)]
    pub command: Commands,
}

/// The various pbconfig commands.
#[derive(Clone, clap::Subcommand)]
pub enum Commands {
    Decode(Decode),
    Encode(Encode),
    GenerateConfigSchema(GenerateConfigSchema),
}

/// The text form a `Config` is read from or written as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    pub fn serialize(self, config: &Config) -> crate::Result<Vec<u8>> {
        Ok(match self {
            Self::Json => {
                let mut json = serde_json::to_vec_pretty(config)?;
                json.push(b'\n');
                json
            }
            Self::Yaml => serde_yaml::to_string(config)?.into_bytes(),
        })
    }

    pub fn deserialize(self, input: &[u8]) -> crate::Result<Config> {
        Ok(match self {
            Self::Json => serde_json::from_slice(input)?,
            Self::Yaml => Config::from_reader(input)?,
        })
    }
}

impl Cli {
    /// Runs the selected command using the command line arguments.
    pub fn drive(self) -> crate::Result<()> {
        if !self.quiet {
            let env_filter = tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy();
            // Another subscriber may already be installed when driven from
            // within a larger program, in which case we log through it.
            tracing_subscriber::fmt()
                .json()
                .with_file(true)
                .with_writer(io::stderr)
                .with_env_filter(env_filter)
                .try_init()
                .ok();
        }

        tracing::debug!(version = VERSION, "starting pbconfig");

        match self.command {
            Commands::Decode(decode) => decode.decode(),
            Commands::Encode(encode) => encode.encode(),
            Commands::GenerateConfigSchema(generator) => generator.generate_config_schema(),
        }
    }
}

/// Reads all of `path`, or of stdin when `path` is `-`.
fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if path == Path::new(STDIO) {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        tracing::trace!(path = %path.display(), "reading file");
        std::fs::read(path)
    }
}

/// Writes `bytes` to `path`, or to stdout when `path` is `-`.
fn write_output(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if path == Path::new(STDIO) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()
    } else {
        tracing::trace!(path = %path.display(), "writing file");
        std::fs::write(path, bytes)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parse_decode() {
        let cli = Cli::try_parse_from([
            "pbconfig", "-q", "decode", "-i", "in.bin", "--format", "json", "--base64",
        ])
        .unwrap();

        assert!(cli.quiet);
        let Commands::Decode(decode) = cli.command else {
            panic!("expected the decode command");
        };
        assert_eq!(decode.input, Path::new("in.bin"));
        assert_eq!(decode.output, Path::new(STDIO));
        assert_eq!(decode.format, Format::Json);
        assert!(decode.base64);
    }

    #[test]
    fn parse_encode_defaults() {
        let cli = Cli::try_parse_from(["pbconfig", "encode"]).unwrap();

        assert!(!cli.quiet);
        let Commands::Encode(encode) = cli.command else {
            panic!("expected the encode command");
        };
        assert_eq!(encode.input, Path::new(STDIO));
        assert_eq!(encode.format, Format::Yaml);
        assert!(!encode.base64);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["pbconfig", "decode", "--format", "toml"]).is_err());
    }

    #[test]
    fn yaml_format_reads_json_text() {
        let config = Format::Yaml
            .deserialize(br#"{"Datacenter": "dc1", "TLS": {"MinVersion": "tls12"}}"#)
            .unwrap();

        assert_eq!(config.datacenter, "dc1");
        assert_eq!(config.tls().min_version, "tls12");
    }

    #[test]
    fn formats_round_trip() {
        let config = Config {
            datacenter: "dc1".into(),
            ..<_>::default()
        };

        for format in [Format::Json, Format::Yaml] {
            let text = format.serialize(&config).unwrap();
            assert_eq!(format.deserialize(&text).unwrap(), config);
        }
    }
}
