// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::fmt::Debug;
use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{NetworkType, PublicKey, Signature, TransactionType};
use crate::Serializable;

/// Fields common to the full and the embedded transaction headers.
pub trait Header: Serializable + Clone + Debug + PartialEq {
    fn signer_public_key(&self) -> &PublicKey;
    fn version(&self) -> u8;
    fn network(&self) -> NetworkType;
    fn transaction_type(&self) -> TransactionType;
}

/// Header of a top-level transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(any(feature = "faker", test), derive(fake::Dummy))]
pub struct TransactionHeader {
    pub signature: Signature,
    pub signer_public_key: PublicKey,
    pub version: u8,
    pub network: NetworkType,
    pub transaction_type: TransactionType,
    /// Maximum fee, in absolute units.
    pub fee: u64,
    pub deadline: u64,
}

/// Header of a transaction nested in an aggregate.
///
/// Signature, fee and deadline belong to the enclosing aggregate and are
/// never part of this header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(any(feature = "faker", test), derive(fake::Dummy))]
pub struct EmbeddedTransactionHeader {
    pub signer_public_key: PublicKey,
    pub version: u8,
    pub network: NetworkType,
    pub transaction_type: TransactionType,
}

impl Header for TransactionHeader {
    fn signer_public_key(&self) -> &PublicKey {
        &self.signer_public_key
    }

    fn version(&self) -> u8 {
        self.version
    }

    fn network(&self) -> NetworkType {
        self.network
    }

    fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }
}

impl Header for EmbeddedTransactionHeader {
    fn signer_public_key(&self) -> &PublicKey {
        &self.signer_public_key
    }

    fn version(&self) -> u8 {
        self.version
    }

    fn network(&self) -> NetworkType {
        self.network
    }

    fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }
}

impl From<&TransactionHeader> for EmbeddedTransactionHeader {
    fn from(value: &TransactionHeader) -> Self {
        Self {
            signer_public_key: value.signer_public_key,
            version: value.version,
            network: value.network,
            transaction_type: value.transaction_type,
        }
    }
}

impl Serializable for TransactionHeader {
    const SIZE: usize = Signature::SIZE
        + PublicKey::SIZE
        + u8::SIZE
        + NetworkType::SIZE
        + TransactionType::SIZE
        + u64::SIZE
        + u64::SIZE;

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.signature.write(w)?;
        self.signer_public_key.write(w)?;
        self.version.write(w)?;
        self.network.write(w)?;
        self.transaction_type.write(w)?;
        self.fee.write(w)?;
        self.deadline.write(w)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        let signature = Signature::read(r)?;
        let signer_public_key = PublicKey::read(r)?;
        let version = u8::read(r)?;
        let network = NetworkType::read(r)?;
        let transaction_type = TransactionType::read(r)?;
        let fee = u64::read(r)?;
        let deadline = u64::read(r)?;

        Ok(Self {
            signature,
            signer_public_key,
            version,
            network,
            transaction_type,
            fee,
            deadline,
        })
    }
}

impl Serializable for EmbeddedTransactionHeader {
    const SIZE: usize = PublicKey::SIZE
        + u8::SIZE
        + NetworkType::SIZE
        + TransactionType::SIZE;

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.signer_public_key.write(w)?;
        self.version.write(w)?;
        self.network.write(w)?;
        self.transaction_type.write(w)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        let signer_public_key = PublicKey::read(r)?;
        let version = u8::read(r)?;
        let network = NetworkType::read(r)?;
        let transaction_type = TransactionType::read(r)?;

        Ok(Self {
            signer_public_key,
            version,
            network,
            transaction_type,
        })
    }
}
