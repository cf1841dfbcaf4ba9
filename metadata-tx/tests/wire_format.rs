// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use metadata_tx::{
    AccountMetadataBody, AccountMetadataTransaction, Address,
    AnyFullTransaction, AnyTransaction, DecodeError,
    EmbeddedAccountMetadataTransaction,
    EmbeddedNamespaceMetadataTransaction, EmbeddedTransactionHeader, Entity,
    Error, MetadataUpdate, NamespaceId, NamespaceMetadataBody, NetworkType,
    PublicKey, Serializable, Signature, TransactionHeader, TransactionType,
    UnresolvedAddress,
};

const SIGNATURE: [u8; 64] = [0xA1; 64];
const SIGNER: [u8; 32] = [0xB2; 32];

fn target_address() -> Address {
    let mut bytes = [0u8; 24];
    bytes[0] = NetworkType::TestNet as u8;
    for (i, b) in bytes.iter_mut().enumerate().skip(1) {
        *b = i as u8;
    }
    Address::from_bytes(bytes).expect("valid address")
}

fn account_tx(value: &[u8], delta: i16) -> AccountMetadataTransaction {
    AccountMetadataTransaction::new(
        Signature(SIGNATURE),
        PublicKey(SIGNER),
        NetworkType::TestNet,
        0x1000,
        0x2000,
        AccountMetadataBody::new(
            target_address().into(),
            42,
            delta,
            value.to_vec(),
        ),
    )
}

fn expected_header() -> String {
    let mut header = String::new();
    header.push_str(&hex::encode(SIGNATURE));
    header.push_str(&hex::encode(SIGNER));
    // version, network, type
    header.push_str("01984441");
    // fee, deadline
    header.push_str("0010000000000000");
    header.push_str("0020000000000000");
    header
}

#[test]
fn account_metadata_is_byte_exact() {
    let tx = account_tx(&[0x01, 0x02, 0x03], 3);

    let expected = format!(
        "{}{}{}{}{}",
        expected_header(),
        hex::encode(target_address().as_bytes()),
        "2a00000000000000",
        "0300",
        "010203"
    );

    assert_eq!(tx.to_hex().expect("should be writable"), expected);
    assert_eq!(tx.size(), expected.len() / 2);
}

#[test]
fn embedded_never_carries_signature_fee_deadline() {
    let tx = account_tx(b"v", 1);
    let embedded = EmbeddedAccountMetadataTransaction::new(
        PublicKey(SIGNER),
        NetworkType::TestNet,
        tx.body().clone(),
    );
    let bytes = embedded.to_bytes().expect("should be writable");

    let expected = format!(
        "{}{}{}{}{}",
        hex::encode(SIGNER),
        "01984441",
        hex::encode(target_address().as_bytes()),
        "2a000000000000000100",
        "76"
    );
    assert_eq!(hex::encode(&bytes), expected);
    assert_eq!(bytes.len(), EmbeddedTransactionHeader::SIZE + 24 + 8 + 2 + 1);
    assert_eq!(embedded, tx.embed());
}

#[test]
fn full_always_carries_signature_fee_deadline() {
    let tx = account_tx(&[], 0);
    let bytes = tx.to_bytes().expect("should be writable");

    assert_eq!(bytes.len(), TransactionHeader::SIZE + 24 + 8 + 2);
    assert_eq!(&bytes[..64], &SIGNATURE);
    assert_eq!(&bytes[100..108], &0x1000u64.to_le_bytes());
    assert_eq!(&bytes[108..116], &0x2000u64.to_le_bytes());
}

#[test]
fn zero_length_value_round_trips() {
    let tx = account_tx(&[], 0);
    let bytes = tx.to_bytes().expect("should be writable");

    let decoded =
        AccountMetadataTransaction::from_slice(&bytes).expect("should read");
    assert_eq!(decoded, tx);
    assert!(decoded.value().is_empty());
}

#[test]
fn negative_delta_is_twos_complement() {
    let update = MetadataUpdate::new(b"longer", b"abc").expect("fits");
    let body = NamespaceMetadataBody::builder()
        .target(NamespaceId::new(0xC000_0000_0000_0001).expect("valid id"))
        .scoped_metadata_key(-42)
        .update(update)
        .build()
        .expect("all fields are set");
    let tx = EmbeddedNamespaceMetadataTransaction::new(
        PublicKey(SIGNER),
        NetworkType::MainNet,
        body,
    );
    let bytes = tx.to_bytes().expect("should be writable");

    let delta_at = EmbeddedTransactionHeader::SIZE + 8 + 8;
    assert_eq!(&bytes[delta_at..delta_at + 2], &[0xFD, 0xFF]);
    assert_eq!(
        &bytes[delta_at - 8..delta_at],
        &(-42i64).to_le_bytes()
    );

    let decoded = EmbeddedNamespaceMetadataTransaction::from_slice(&bytes)
        .expect("should read");
    assert_eq!(decoded.value_size_delta(), -3);
    assert_eq!(decoded, tx);
}

#[test]
fn truncated_value_is_malformed() {
    let tx = account_tx(&[0x01, 0x02, 0x03], 3);

    let mut framed = vec![];
    tx.write_size_prefixed(&mut framed).expect("should be writable");
    framed.truncate(framed.len() - 3);

    let err = AccountMetadataTransaction::read_size_prefixed(&mut &framed[..])
        .unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedInput(DecodeError::Truncated {
            expected: 3,
            found: 0
        })
    ));
}

#[test]
fn truncation_needs_a_known_size() {
    let tx = account_tx(&[0x01, 0x02, 0x03], 3);
    let bytes = tx.to_bytes().expect("should be writable");
    let cut = &bytes[..bytes.len() - 3];

    let inferred =
        AccountMetadataTransaction::from_slice(cut).expect("should read");
    assert!(inferred.value().is_empty());
    assert_eq!(inferred.value_size_delta(), 3);

    let err = AccountMetadataTransaction::read(&mut &cut[..], tx.size())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedInput(DecodeError::Truncated {
            expected: 3,
            found: 0
        })
    ));
}

#[test]
fn truncated_header_is_malformed() {
    let tx = account_tx(&[0x01], 1);
    let bytes = tx.to_bytes().expect("should be writable");

    let err =
        AccountMetadataTransaction::read(&mut &bytes[..50], bytes.len())
            .unwrap_err();
    match err {
        Error::MalformedInput(DecodeError::Io(e)) => {
            assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof)
        }
        e => panic!("unexpected error {e}"),
    }
}

#[test]
fn invalid_network_is_malformed() {
    let mut bytes = account_tx(&[], 0).to_bytes().expect("should be writable");
    bytes[97] = 0x01;

    let err = AnyFullTransaction::from_slice(&bytes).unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedInput(DecodeError::InvalidDiscriminant {
            field: "network",
            value: 0x01
        })
    ));
}

#[test]
fn unknown_transaction_type_is_malformed() {
    let mut bytes = account_tx(&[], 0).to_bytes().expect("should be writable");
    bytes[98..100].copy_from_slice(&0x414Du16.to_le_bytes());

    let err = AnyFullTransaction::from_slice(&bytes).unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedInput(DecodeError::InvalidDiscriminant {
            field: "transaction type",
            value: 0x414D
        })
    ));
}

#[test]
fn alias_target_round_trips_through_dispatch() {
    let alias = UnresolvedAddress::Alias {
        network: NetworkType::TestNet,
        namespace_id: NamespaceId::new(0x8000_0000_DEAD_BEEF)
            .expect("valid id"),
    };
    let tx = AccountMetadataTransaction::new(
        Signature::default(),
        PublicKey(SIGNER),
        NetworkType::TestNet,
        0,
        0,
        AccountMetadataBody::new(alias, 1, 2, b"hi".to_vec()),
    );
    let hex = tx.to_hex().expect("should be writable");

    match AnyFullTransaction::from_hex(&hex).expect("should read") {
        AnyTransaction::AccountMetadata(decoded) => {
            assert_eq!(decoded.target(), &alias);
            assert_eq!(
                decoded.transaction_type(),
                TransactionType::AccountMetadata
            );
        }
        other => panic!("unexpected kind {:?}", other.transaction_type()),
    }
}

#[test]
fn invalid_argument_reports_missing_field() {
    let err = AccountMetadataBody::builder()
        .target(target_address().into())
        .value_utf8("v")
        .build()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid argument `scoped_metadata_key`: missing"
    );
}
