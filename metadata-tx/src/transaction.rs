// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{DecodeError, Error};
use crate::header::{EmbeddedTransactionHeader, Header, TransactionHeader};
use crate::metadata::{
    AccountMetadataBody, MetadataBody, MetadataTarget, MosaicMetadataBody,
    NamespaceMetadataBody,
};
use crate::types::{NetworkType, PublicKey, Signature, TransactionType};
use crate::Entity;

/// Kind-specific payload of a transaction.
pub trait Body: Entity + Clone + std::fmt::Debug + PartialEq {
    const TRANSACTION_TYPE: TransactionType;
    const VERSION: u8;
}

/// A header composed with the body it describes.
///
/// The header type and version always match the body kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Parts<H, B>",
    bound(deserialize = "H: Header + Deserialize<'de>, \
                         B: Body + Deserialize<'de>")
)]
pub struct Transaction<H, B> {
    header: H,
    body: B,
}

pub type FullTransaction<B> = Transaction<TransactionHeader, B>;
pub type EmbeddedTransaction<B> = Transaction<EmbeddedTransactionHeader, B>;

pub type AccountMetadataTransaction = FullTransaction<AccountMetadataBody>;
pub type MosaicMetadataTransaction = FullTransaction<MosaicMetadataBody>;
pub type NamespaceMetadataTransaction = FullTransaction<NamespaceMetadataBody>;

pub type EmbeddedAccountMetadataTransaction =
    EmbeddedTransaction<AccountMetadataBody>;
pub type EmbeddedMosaicMetadataTransaction =
    EmbeddedTransaction<MosaicMetadataBody>;
pub type EmbeddedNamespaceMetadataTransaction =
    EmbeddedTransaction<NamespaceMetadataBody>;

#[derive(Deserialize)]
struct Parts<H, B> {
    header: H,
    body: B,
}

impl<H: Header, B: Body> TryFrom<Parts<H, B>> for Transaction<H, B> {
    type Error = Error;

    fn try_from(value: Parts<H, B>) -> Result<Self, Self::Error> {
        Self::from_parts(value.header, value.body)
    }
}

impl<B: Body> Transaction<TransactionHeader, B> {
    pub fn new(
        signature: Signature,
        signer_public_key: PublicKey,
        network: NetworkType,
        fee: u64,
        deadline: u64,
        body: B,
    ) -> Self {
        let header = TransactionHeader {
            signature,
            signer_public_key,
            version: B::VERSION,
            network,
            transaction_type: B::TRANSACTION_TYPE,
            fee,
            deadline,
        };
        Self { header, body }
    }

    pub fn signature(&self) -> &Signature {
        &self.header.signature
    }

    pub fn fee(&self) -> u64 {
        self.header.fee
    }

    pub fn deadline(&self) -> u64 {
        self.header.deadline
    }

    /// Converts into the form nested in aggregates, dropping signature, fee
    /// and deadline.
    pub fn embed(self) -> EmbeddedTransaction<B> {
        Transaction {
            header: EmbeddedTransactionHeader::from(&self.header),
            body: self.body,
        }
    }
}

impl<B: Body> Transaction<EmbeddedTransactionHeader, B> {
    pub fn new(
        signer_public_key: PublicKey,
        network: NetworkType,
        body: B,
    ) -> Self {
        let header = EmbeddedTransactionHeader {
            signer_public_key,
            version: B::VERSION,
            network,
            transaction_type: B::TRANSACTION_TYPE,
        };
        Self { header, body }
    }
}

impl<H: Header, B: Body> Transaction<H, B> {
    /// Composes a decoded header with a body, rejecting a header that
    /// announces another kind.
    pub fn from_parts(header: H, body: B) -> Result<Self, Error> {
        check_type::<B>(&header)?;
        Ok(Self { header, body })
    }

    pub fn header(&self) -> &H {
        &self.header
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn into_body(self) -> B {
        self.body
    }

    pub fn signer_public_key(&self) -> &PublicKey {
        self.header.signer_public_key()
    }

    pub fn version(&self) -> u8 {
        self.header.version()
    }

    pub fn network(&self) -> NetworkType {
        self.header.network()
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.header.transaction_type()
    }
}

impl<H: Header, T: MetadataTarget> Transaction<H, MetadataBody<T>> {
    pub fn target(&self) -> &T {
        self.body.target()
    }

    pub fn scoped_metadata_key(&self) -> i64 {
        self.body.scoped_metadata_key()
    }

    pub fn value_size_delta(&self) -> i16 {
        self.body.value_size_delta()
    }

    pub fn value(&self) -> &[u8] {
        self.body.value()
    }

    pub fn value_utf8(&self) -> Option<&str> {
        self.body.value_utf8()
    }
}

impl<H: Header, B: Body> Entity for Transaction<H, B> {
    fn size(&self) -> usize {
        H::SIZE + self.body.size()
    }

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.header.write(w)?;
        self.body.write(w)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R, size: usize) -> Result<Self, Error> {
        let body_size = body_size::<H>(size)?;
        let header = H::read(r)?;
        check_type::<B>(&header).inspect_err(|_| {
            debug!(
                found = ?header.transaction_type(),
                expected = ?B::TRANSACTION_TYPE,
                "type mismatch"
            )
        })?;
        let body = B::read(r, body_size)?;

        Ok(Self { header, body })
    }
}

/// Rejects a header announcing another kind than `B`.
fn check_type<B: Body>(header: &impl Header) -> Result<(), Error> {
    let found = header.transaction_type();
    if found != B::TRANSACTION_TYPE {
        return Err(DecodeError::UnexpectedType {
            expected: B::TRANSACTION_TYPE,
            found,
        }
        .into());
    }
    Ok(())
}

fn body_size<H: Header>(size: usize) -> Result<usize, Error> {
    let body_size = size.checked_sub(H::SIZE).ok_or(
        DecodeError::SizeTooSmall {
            size,
            min: H::SIZE,
        },
    )?;
    Ok(body_size)
}

/// Any metadata transaction, dispatched on the header type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
#[serde(bound(
    serialize = "H: Serialize",
    deserialize = "H: Header + Deserialize<'de>"
))]
pub enum AnyTransaction<H> {
    AccountMetadata(Transaction<H, AccountMetadataBody>),
    MosaicMetadata(Transaction<H, MosaicMetadataBody>),
    NamespaceMetadata(Transaction<H, NamespaceMetadataBody>),
}

pub type AnyFullTransaction = AnyTransaction<TransactionHeader>;
pub type AnyEmbeddedTransaction = AnyTransaction<EmbeddedTransactionHeader>;

impl<H: Header> AnyTransaction<H> {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            AnyTransaction::AccountMetadata(tx) => tx.transaction_type(),
            AnyTransaction::MosaicMetadata(tx) => tx.transaction_type(),
            AnyTransaction::NamespaceMetadata(tx) => tx.transaction_type(),
        }
    }

    pub fn header(&self) -> &H {
        match self {
            AnyTransaction::AccountMetadata(tx) => tx.header(),
            AnyTransaction::MosaicMetadata(tx) => tx.header(),
            AnyTransaction::NamespaceMetadata(tx) => tx.header(),
        }
    }
}

impl<H: Header> Entity for AnyTransaction<H> {
    fn size(&self) -> usize {
        match self {
            AnyTransaction::AccountMetadata(tx) => tx.size(),
            AnyTransaction::MosaicMetadata(tx) => tx.size(),
            AnyTransaction::NamespaceMetadata(tx) => tx.size(),
        }
    }

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        match self {
            AnyTransaction::AccountMetadata(tx) => tx.write(w),
            AnyTransaction::MosaicMetadata(tx) => tx.write(w),
            AnyTransaction::NamespaceMetadata(tx) => tx.write(w),
        }
    }

    fn read<R: Read>(r: &mut R, size: usize) -> Result<Self, Error> {
        let body_size = body_size::<H>(size)?;
        let header = H::read(r)?;
        let transaction_type = header.transaction_type();
        trace!(?transaction_type, size, "reading transaction");

        let tx = match transaction_type {
            TransactionType::AccountMetadata => {
                let body = AccountMetadataBody::read(r, body_size)?;
                AnyTransaction::AccountMetadata(Transaction { header, body })
            }
            TransactionType::MosaicMetadata => {
                let body = MosaicMetadataBody::read(r, body_size)?;
                AnyTransaction::MosaicMetadata(Transaction { header, body })
            }
            TransactionType::NamespaceMetadata => {
                let body = NamespaceMetadataBody::read(r, body_size)?;
                AnyTransaction::NamespaceMetadata(Transaction { header, body })
            }
        };

        Ok(tx)
    }
}

impl<H> From<Transaction<H, AccountMetadataBody>> for AnyTransaction<H> {
    fn from(value: Transaction<H, AccountMetadataBody>) -> Self {
        AnyTransaction::AccountMetadata(value)
    }
}

impl<H> From<Transaction<H, MosaicMetadataBody>> for AnyTransaction<H> {
    fn from(value: Transaction<H, MosaicMetadataBody>) -> Self {
        AnyTransaction::MosaicMetadata(value)
    }
}

impl<H> From<Transaction<H, NamespaceMetadataBody>> for AnyTransaction<H> {
    fn from(value: Transaction<H, NamespaceMetadataBody>) -> Self {
        AnyTransaction::NamespaceMetadata(value)
    }
}

#[cfg(any(feature = "faker", test))]
pub mod faker {
    use fake::{Dummy, Fake, Faker};
    use rand::Rng;

    use super::*;

    impl<B: Body + Dummy<Faker>> Dummy<Faker> for FullTransaction<B> {
        fn dummy_with_rng<R: Rng + ?Sized>(
            config: &Faker,
            rng: &mut R,
        ) -> Self {
            FullTransaction::new(
                config.fake_with_rng(rng),
                config.fake_with_rng(rng),
                config.fake_with_rng(rng),
                config.fake_with_rng(rng),
                config.fake_with_rng(rng),
                config.fake_with_rng(rng),
            )
        }
    }

    impl<B: Body + Dummy<Faker>> Dummy<Faker> for EmbeddedTransaction<B> {
        fn dummy_with_rng<R: Rng + ?Sized>(
            config: &Faker,
            rng: &mut R,
        ) -> Self {
            EmbeddedTransaction::new(
                config.fake_with_rng(rng),
                config.fake_with_rng(rng),
                config.fake_with_rng(rng),
            )
        }
    }

    impl<H> Dummy<Faker> for AnyTransaction<H>
    where
        Transaction<H, AccountMetadataBody>: Dummy<Faker>,
        Transaction<H, MosaicMetadataBody>: Dummy<Faker>,
        Transaction<H, NamespaceMetadataBody>: Dummy<Faker>,
    {
        fn dummy_with_rng<R: Rng + ?Sized>(
            config: &Faker,
            rng: &mut R,
        ) -> Self {
            match rng.gen_range(0..3) {
                0 => {
                    AnyTransaction::AccountMetadata(config.fake_with_rng(rng))
                }
                1 => {
                    AnyTransaction::MosaicMetadata(config.fake_with_rng(rng))
                }
                _ => {
                    AnyTransaction::NamespaceMetadata(config.fake_with_rng(rng))
                }
            }
        }
    }
}
