// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Subcommand;
use metadata_tx::{
    AnyTransaction, EmbeddedTransactionHeader, Entity, Header,
    MetadataUpdate, TransactionHeader,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::codec::CodecConfig;

#[derive(PartialEq, Eq, Clone, Subcommand, Debug)]
pub enum Command {
    /// Encode a JSON transaction into hex
    Encode {
        /// JSON file to read, stdin if absent
        #[clap(short, long, value_parser)]
        input: Option<PathBuf>,

        /// Use the embedded form
        #[clap(long)]
        embedded: bool,

        /// Prepend the entity size
        #[clap(long)]
        size_prefixed: bool,
    },

    /// Decode a hex transaction into JSON
    Decode {
        /// Hex encoded transaction
        hex: String,

        /// Use the embedded form
        #[clap(long)]
        embedded: bool,

        /// Expect the entity size before the transaction
        #[clap(long)]
        size_prefixed: bool,
    },

    /// Compute the delta and value replacing a stored metadata value
    ValueUpdate {
        /// Currently stored value, as UTF-8 text
        #[clap(long, default_value = "")]
        old: String,

        /// New value, as UTF-8 text
        #[clap(long)]
        new: String,
    },
}

#[derive(Serialize)]
struct ValueUpdateOutput {
    value_size_delta: i16,
    value: String,
}

impl Command {
    /// Runs the command, returning what should be printed on stdout.
    pub fn run(self, codec: &CodecConfig) -> anyhow::Result<String> {
        match self {
            Command::Encode { input, .. } => {
                let json = match input {
                    Some(path) => std::fs::read_to_string(&path)
                        .with_context(|| {
                            format!("cannot read {}", path.display())
                        })?,
                    None => {
                        let mut json = String::new();
                        io::stdin().read_to_string(&mut json)?;
                        json
                    }
                };

                if codec.embedded() {
                    encode::<EmbeddedTransactionHeader>(&json, codec)
                } else {
                    encode::<TransactionHeader>(&json, codec)
                }
            }
            Command::Decode { hex, .. } => {
                let bytes =
                    hex::decode(hex.trim()).context("invalid hex input")?;

                if codec.embedded() {
                    decode::<EmbeddedTransactionHeader>(&bytes, codec)
                } else {
                    decode::<TransactionHeader>(&bytes, codec)
                }
            }
            Command::ValueUpdate { old, new } => {
                let update =
                    MetadataUpdate::new(old.as_bytes(), new.as_bytes())?;
                let output = ValueUpdateOutput {
                    value_size_delta: update.value_size_delta,
                    value: hex::encode(&update.value),
                };
                Ok(serde_json::to_string_pretty(&output)?)
            }
        }
    }
}

fn encode<H>(json: &str, codec: &CodecConfig) -> anyhow::Result<String>
where
    H: Header + Serialize + DeserializeOwned,
{
    let tx: AnyTransaction<H> =
        serde_json::from_str(json).context("invalid transaction json")?;

    let mut bytes = Vec::with_capacity(tx.size() + metadata_tx::SIZE_PREFIX);
    if codec.size_prefixed() {
        tx.write_size_prefixed(&mut bytes)?;
    } else {
        tx.write(&mut bytes)?;
    }
    info!(
        kind = ?tx.transaction_type(),
        size = bytes.len(),
        "transaction encoded"
    );

    Ok(hex::encode(bytes))
}

fn decode<H>(bytes: &[u8], codec: &CodecConfig) -> anyhow::Result<String>
where
    H: Header + Serialize + DeserializeOwned,
{
    let tx = if codec.size_prefixed() {
        let mut r = bytes;
        let tx = AnyTransaction::<H>::read_size_prefixed(&mut r)?;
        if !r.is_empty() {
            bail!("{} trailing bytes after the transaction", r.len());
        }
        tx
    } else {
        AnyTransaction::<H>::from_slice(bytes)?
    };
    debug!(kind = ?tx.transaction_type(), size = tx.size(), "decoded");

    Ok(serde_json::to_string_pretty(&tx)?)
}

#[cfg(test)]
mod tests {
    use metadata_tx::{
        AccountMetadataBody, AccountMetadataTransaction, Address,
        AnyFullTransaction, NetworkType, PublicKey, Signature,
    };

    use super::*;

    fn codec(toml: &str) -> CodecConfig {
        toml::from_str(toml).expect("valid codec config")
    }

    fn sample() -> AccountMetadataTransaction {
        let mut address = [0x10u8; 24];
        address[0] = NetworkType::MainNet as u8;
        AccountMetadataTransaction::new(
            Signature([1; 64]),
            PublicKey([2; 32]),
            NetworkType::MainNet,
            5,
            6,
            AccountMetadataBody::new(
                Address::from_bytes(address).expect("valid address").into(),
                42,
                3,
                vec![1, 2, 3],
            ),
        )
    }

    #[test]
    fn test_decode_then_encode() {
        let tx = sample();
        let hex = tx.to_hex().expect("should be writable");

        let json = Command::Decode {
            hex: hex.clone(),
            embedded: false,
            size_prefixed: false,
        }
        .run(&CodecConfig::default())
        .expect("should decode");
        let decoded: AnyFullTransaction =
            serde_json::from_str(&json).expect("valid json");
        assert_eq!(decoded, AnyTransaction::from(tx));

        let encoded =
            encode::<TransactionHeader>(&json, &CodecConfig::default())
                .expect("should encode");
        assert_eq!(encoded, hex);
    }

    #[test]
    fn test_encode_from_file() {
        let tx = sample();
        let json = serde_json::to_string(&AnyTransaction::from(tx.clone()))
            .expect("should serialize");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        std::io::Write::write_all(&mut file, json.as_bytes())
            .expect("writable");

        let encoded = Command::Encode {
            input: Some(file.path().to_path_buf()),
            embedded: false,
            size_prefixed: false,
        }
        .run(&CodecConfig::default())
        .expect("should encode");
        assert_eq!(encoded, tx.to_hex().expect("should be writable"));

        let missing = Command::Encode {
            input: Some(file.path().with_extension("missing")),
            embedded: false,
            size_prefixed: false,
        }
        .run(&CodecConfig::default())
        .unwrap_err();
        assert!(missing.to_string().starts_with("cannot read"));
    }

    #[test]
    fn test_size_prefixed_embedded() {
        let tx = sample().embed();
        let codec = codec("embedded = true\nsize_prefixed = true");

        let mut framed = vec![];
        tx.write_size_prefixed(&mut framed).expect("should be writable");
        let json = decode::<EmbeddedTransactionHeader>(&framed, &codec)
            .expect("should decode");
        let encoded = encode::<EmbeddedTransactionHeader>(&json, &codec)
            .expect("should encode");

        assert_eq!(encoded, hex::encode(&framed));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let codec = codec("size_prefixed = true");
        let mut framed = vec![];
        sample()
            .write_size_prefixed(&mut framed)
            .expect("should be writable");
        framed.push(0);

        assert!(decode::<TransactionHeader>(&framed, &codec).is_err());
    }

    #[test]
    fn test_value_update() {
        let out = Command::ValueUpdate {
            old: "abc".into(),
            new: "abd".into(),
        }
        .run(&CodecConfig::default())
        .expect("should compute");
        let out: serde_json::Value =
            serde_json::from_str(&out).expect("valid json");

        assert_eq!(out["value_size_delta"], 0);
        assert_eq!(out["value"], "000007");
    }
}
