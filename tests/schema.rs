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

//! Checks the message types against `proto/private/pbconfig/config.proto`,
//! so the two cannot drift apart.

use std::collections::BTreeSet;

use pbconfig::config::{
    self, Acl, AclServiceProviderToken, AclTokens, AutoEncrypt, Config, Gossip, GossipEncryption,
    Tls,
};
use pretty_assertions::assert_eq;
use prost::{
    encoding::{self, WireType},
    Message, Name,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

const SCHEMA: &str = include_str!("../proto/private/pbconfig/config.proto");

#[derive(Debug)]
struct Field {
    repeated: bool,
    kind: String,
    name: String,
    number: u32,
}

/// Reads the package name and each message's fields out of the schema.
fn parse_schema() -> (String, Vec<(String, Vec<Field>)>) {
    let mut package = String::new();
    let mut messages: Vec<(String, Vec<Field>)> = Vec::new();

    for line in SCHEMA.lines().map(str::trim) {
        if line.is_empty() || line.starts_with("//") || line == "}" {
            continue;
        }
        if let Some(name) = line.strip_prefix("package ") {
            package = name.trim_end_matches(';').to_owned();
        } else if let Some(name) = line.strip_prefix("message ") {
            messages.push((name.trim_end_matches('{').trim().to_owned(), Vec::new()));
        } else if let Some((decl, number)) = line.split_once('=') {
            let number = number
                .split(|c: char| !c.is_ascii_digit())
                .find(|digits| !digits.is_empty())
                .unwrap()
                .parse()
                .unwrap();
            let words: Vec<_> = decl.split_whitespace().collect();
            let (repeated, words) = match words.as_slice() {
                ["repeated", rest @ ..] => (true, rest),
                rest => (false, rest),
            };
            let [kind, name] = words else {
                panic!("unexpected field declaration: {line}");
            };
            messages.last_mut().unwrap().1.push(Field {
                repeated,
                kind: kind.to_string(),
                name: name.to_string(),
                number,
            });
        }
    }

    (package, messages)
}

/// Sets the field to a value that is always written to the wire.
fn non_zero(field: &Field) -> Value {
    let value = match field.kind.as_str() {
        "string" => json!("x"),
        "bool" => json!(true),
        _ => json!({}),
    };

    if field.repeated {
        json!([value])
    } else {
        value
    }
}

fn properties<M: schemars::JsonSchema>() -> BTreeSet<String> {
    schemars::schema_for!(M)
        .schema
        .object
        .map(|object| object.properties.into_keys().collect())
        .unwrap_or_default()
}

fn encode_from_text<M: Message + DeserializeOwned>(text: Value) -> Vec<u8> {
    serde_json::from_value::<M>(text).unwrap().encode_to_vec()
}

/// Returns `(full name, schema property names, encoder)` for a message name.
fn binding(message: &str) -> (String, BTreeSet<String>, fn(Value) -> Vec<u8>) {
    macro_rules! binding {
        ($ty:ty) => {
            (
                <$ty>::full_name(),
                properties::<$ty>(),
                encode_from_text::<$ty> as fn(Value) -> Vec<u8>,
            )
        };
    }

    match message {
        "Config" => binding!(Config),
        "Gossip" => binding!(Gossip),
        "GossipEncryption" => binding!(GossipEncryption),
        "TLS" => binding!(Tls),
        "ACL" => binding!(Acl),
        "ACLTokens" => binding!(AclTokens),
        "ACLServiceProviderToken" => binding!(AclServiceProviderToken),
        "AutoEncrypt" => binding!(AutoEncrypt),
        other => panic!("no type for message {other}"),
    }
}

#[test]
fn package_matches() {
    let (package, _) = parse_schema();
    assert_eq!(package, config::PACKAGE);
}

#[test]
fn every_message_has_a_type() {
    let (package, messages) = parse_schema();
    assert_eq!(messages.len(), 8);

    for (message, _) in &messages {
        let (full_name, _, _) = binding(message);
        assert_eq!(full_name, format!("{package}.{message}"));
    }
}

#[test]
fn field_names_match() {
    let (_, messages) = parse_schema();

    for (message, fields) in &messages {
        let (_, properties, _) = binding(message);
        let declared: BTreeSet<_> = fields.iter().map(|field| field.name.clone()).collect();
        assert_eq!(properties, declared, "fields of {message}");
    }
}

#[test]
fn field_numbers_and_wire_types_match() {
    let (_, messages) = parse_schema();

    for (message, fields) in &messages {
        let (_, _, encode) = binding(message);

        for field in fields {
            let text = Map::from_iter([(field.name.clone(), non_zero(field))]);
            let bytes = encode(Value::Object(text));
            let mut buf = bytes.as_slice();
            let (tag, wire_type) = encoding::decode_key(&mut buf).unwrap();
            let expected = if field.kind == "bool" {
                WireType::Varint
            } else {
                WireType::LengthDelimited
            };

            assert_eq!(tag, field.number, "number of {message}.{}", field.name);
            assert_eq!(wire_type, expected, "wire type of {message}.{}", field.name);

            encoding::skip_field(wire_type, tag, &mut buf, Default::default()).unwrap();
            assert!(buf.is_empty(), "{message}.{} wrote extra fields", field.name);
        }
    }
}
