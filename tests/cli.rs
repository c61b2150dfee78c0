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

use std::path::Path;

use clap::Parser;
use pbconfig::{codec, Cli, Config};
use pretty_assertions::assert_eq;

const CONFIG_YAML: &str = "
Datacenter: dc1
NodeName: node-1
ACL:
  Enabled: true
  DefaultPolicy: deny
  Tokens:
    Agent: agent-token
    ManagedServiceProvider:
      - AccessorID: a1
        SecretID: s1
Gossip:
  RetryJoinLAN: [10.0.0.1, 10.0.0.2]
TLS:
  MinVersion: tls12
  Deprecated_PreferServerCipherSuites: true
";

fn run(args: &[&str]) {
    let mut argv = vec!["pbconfig", "--quiet"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().drive().unwrap();
}

fn path(dir: &Path, name: &str) -> String {
    dir.join(name).display().to_string()
}

#[test]
fn encode_then_decode() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = path(dir.path(), "config.yaml");
    let binary = path(dir.path(), "config.bin");
    let json = path(dir.path(), "config.json");
    std::fs::write(&yaml, CONFIG_YAML).unwrap();

    run(&["encode", "-i", yaml.as_str(), "-o", binary.as_str()]);
    run(&["decode", "-i", binary.as_str(), "-o", json.as_str(), "--format", "json"]);

    let expected = Config::from_reader(CONFIG_YAML.as_bytes()).unwrap();
    let encoded = codec::decode::<Config>(&std::fs::read(&binary).unwrap()).unwrap();
    let decoded: Config = serde_json::from_slice(&std::fs::read(&json).unwrap()).unwrap();

    assert_eq!(encoded, expected);
    assert_eq!(decoded, expected);
    assert_eq!(decoded.acl().tokens().managed_service_provider[0].secret_id, "s1");
    assert!(decoded.tls().deprecated_prefer_server_cipher_suites);
}

#[test]
fn base64_transport() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = path(dir.path(), "config.yaml");
    let text = path(dir.path(), "config.b64");
    let output = path(dir.path(), "output.yaml");
    std::fs::write(&yaml, "Datacenter: dc1\n").unwrap();

    run(&["encode", "-i", yaml.as_str(), "-o", text.as_str(), "--base64"]);
    assert_eq!(std::fs::read_to_string(&text).unwrap(), "CgNkYzE=\n");

    run(&["decode", "-i", text.as_str(), "-o", output.as_str(), "--base64"]);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Datacenter: dc1\n");
}

#[test]
fn decode_rejects_malformed_input() {
    let dir = tempfile::tempdir().unwrap();
    let binary = path(dir.path(), "config.bin");
    let output = path(dir.path(), "config.yaml");
    std::fs::write(&binary, b"\x0a\x05dc1").unwrap();

    let error = Cli::try_parse_from([
        "pbconfig",
        "-q",
        "decode",
        "-i",
        binary.as_str(),
        "-o",
        output.as_str(),
    ])
    .unwrap()
    .drive()
    .unwrap_err();

    assert!(matches!(
        error.downcast_ref::<codec::Error>(),
        Some(codec::Error::MalformedInput(_))
    ));
    assert!(!Path::new(&output).exists());
}

#[test]
fn generate_config_schema() {
    let dir = tempfile::tempdir().unwrap();
    let output_directory = dir.path().display().to_string();

    run(&["generate-config-schema", "-o", output_directory.as_str()]);

    let schema: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("config.json")).unwrap()).unwrap();
    let properties = schema["properties"].as_object().unwrap();

    for key in ["Datacenter", "Partition", "ACL", "AutoEncrypt", "Gossip", "TLS"] {
        assert!(properties.contains_key(key), "missing {key}");
    }
    assert!(!properties.contains_key("unknown_fields"));

    let gossip = schema["definitions"]["Gossip"]["properties"]
        .as_object()
        .unwrap();
    assert!(gossip.contains_key("RetryJoinLAN"));
}
