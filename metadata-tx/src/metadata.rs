// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Bodies of the account, mosaic and namespace metadata transactions.

use std::fmt::Debug;
use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};
use serde_with::hex::Hex;
use serde_with::serde_as;
use tracing::trace;

use crate::error::{DecodeError, Error};
use crate::transaction::Body;
use crate::types::{
    NamespaceId, TransactionType, UnresolvedAddress, UnresolvedMosaicId,
};
use crate::{Entity, Serializable};

/// Version of every metadata transaction body.
pub const METADATA_VERSION: u8 = 1;

/// Entity a metadata entry is attached to.
pub trait MetadataTarget: Serializable + Copy + Debug + Eq {
    const TRANSACTION_TYPE: TransactionType;
}

impl MetadataTarget for UnresolvedAddress {
    const TRANSACTION_TYPE: TransactionType = TransactionType::AccountMetadata;
}

impl MetadataTarget for UnresolvedMosaicId {
    const TRANSACTION_TYPE: TransactionType = TransactionType::MosaicMetadata;
}

impl MetadataTarget for NamespaceId {
    const TRANSACTION_TYPE: TransactionType =
        TransactionType::NamespaceMetadata;
}

pub type AccountMetadataBody = MetadataBody<UnresolvedAddress>;
pub type MosaicMetadataBody = MetadataBody<UnresolvedMosaicId>;
pub type NamespaceMetadataBody = MetadataBody<NamespaceId>;

/// Payload of a metadata transaction.
///
/// The value is the trailing field of the body and is not length-prefixed:
/// `value_size_delta` is the change in size of the stored entry, not the
/// length of `value`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataBody<T> {
    target: T,
    scoped_metadata_key: i64,
    value_size_delta: i16,
    #[serde_as(as = "Hex")]
    value: Vec<u8>,
}

impl<T: MetadataTarget> MetadataBody<T> {
    /// Size of every field but the value.
    pub const FIXED_SIZE: usize = T::SIZE + i64::SIZE + i16::SIZE;

    pub fn new(
        target: T,
        scoped_metadata_key: i64,
        value_size_delta: i16,
        value: Vec<u8>,
    ) -> Self {
        Self {
            target,
            scoped_metadata_key,
            value_size_delta,
            value,
        }
    }

    pub fn builder() -> MetadataBuilder<T> {
        MetadataBuilder::default()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn scoped_metadata_key(&self) -> i64 {
        self.scoped_metadata_key
    }

    pub fn value_size_delta(&self) -> i16 {
        self.value_size_delta
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// The value as UTF-8 text, if it is valid UTF-8.
    pub fn value_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }
}

impl<T: MetadataTarget> Entity for MetadataBody<T> {
    fn size(&self) -> usize {
        Self::FIXED_SIZE + self.value.len()
    }

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.target.write(w)?;
        self.scoped_metadata_key.write(w)?;
        self.value_size_delta.write(w)?;
        w.write_all(&self.value)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R, size: usize) -> Result<Self, Error> {
        let value_len = size.checked_sub(Self::FIXED_SIZE).ok_or(
            DecodeError::SizeTooSmall {
                size,
                min: Self::FIXED_SIZE,
            },
        )?;
        trace!(
            kind = ?T::TRANSACTION_TYPE,
            size,
            value_len,
            "reading metadata body"
        );

        let target = T::read(r)?;
        let scoped_metadata_key = i64::read(r)?;
        let value_size_delta = i16::read(r)?;
        let value = Self::read_var_bytes(r, value_len)?;

        Ok(Self {
            target,
            scoped_metadata_key,
            value_size_delta,
            value,
        })
    }
}

impl<T: MetadataTarget> Body for MetadataBody<T> {
    const TRANSACTION_TYPE: TransactionType = T::TRANSACTION_TYPE;
    const VERSION: u8 = METADATA_VERSION;
}

/// Collects the fields of a [`MetadataBody`], checking that every required
/// one was provided.
#[derive(Debug, Clone)]
pub struct MetadataBuilder<T> {
    target: Option<T>,
    scoped_metadata_key: Option<i64>,
    value_size_delta: Option<i16>,
    value: Option<Vec<u8>>,
}

impl<T> Default for MetadataBuilder<T> {
    fn default() -> Self {
        Self {
            target: None,
            scoped_metadata_key: None,
            value_size_delta: None,
            value: None,
        }
    }
}

impl<T: MetadataTarget> MetadataBuilder<T> {
    pub fn target(mut self, target: T) -> Self {
        self.target = Some(target);
        self
    }

    pub fn scoped_metadata_key(mut self, key: i64) -> Self {
        self.scoped_metadata_key = Some(key);
        self
    }

    pub fn value_size_delta(mut self, delta: i16) -> Self {
        self.value_size_delta = Some(delta);
        self
    }

    pub fn value(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn value_utf8(self, value: &str) -> Self {
        self.value(value.as_bytes())
    }

    /// Sets both the delta and the value from an update.
    pub fn update(mut self, update: MetadataUpdate) -> Self {
        self.value_size_delta = Some(update.value_size_delta);
        self.value = Some(update.value);
        self
    }

    /// Builds the body.
    ///
    /// Without an explicit delta, the value is assumed to create a new
    /// entry and the delta is its length.
    pub fn build(self) -> Result<MetadataBody<T>, Error> {
        let target = self
            .target
            .ok_or_else(|| Error::invalid_argument("target", "missing"))?;
        let scoped_metadata_key = self.scoped_metadata_key.ok_or_else(|| {
            Error::invalid_argument("scoped_metadata_key", "missing")
        })?;
        let value = self
            .value
            .ok_or_else(|| Error::invalid_argument("value", "missing"))?;
        let value_size_delta = match self.value_size_delta {
            Some(delta) => delta,
            None => i16::try_from(value.len()).map_err(|_| {
                Error::invalid_argument(
                    "value",
                    format!("{} bytes do not fit a size delta", value.len()),
                )
            })?,
        };

        Ok(MetadataBody::new(
            target,
            scoped_metadata_key,
            value_size_delta,
            value,
        ))
    }
}

/// Delta and value to submit when replacing a stored metadata value.
///
/// The submitted value is the byte-wise XOR of the old and new values, the
/// shorter one padded with zeros, so that applying it to the stored entry
/// yields the new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataUpdate {
    pub value_size_delta: i16,
    pub value: Vec<u8>,
}

impl MetadataUpdate {
    pub fn new(old: &[u8], new: &[u8]) -> Result<Self, Error> {
        let delta = new.len() as i64 - old.len() as i64;
        let value_size_delta = i16::try_from(delta).map_err(|_| {
            Error::invalid_argument(
                "value",
                format!("size delta {delta} does not fit 16 bits"),
            )
        })?;

        let len = old.len().max(new.len());
        let value = (0..len)
            .map(|i| {
                old.get(i).copied().unwrap_or_default()
                    ^ new.get(i).copied().unwrap_or_default()
            })
            .collect();

        Ok(Self {
            value_size_delta,
            value,
        })
    }

    /// Applies an update value to a stored one, returning the new value.
    pub fn apply(&self, old: &[u8]) -> Vec<u8> {
        let mut value: Vec<u8> = (0..self.value.len().max(old.len()))
            .map(|i| {
                old.get(i).copied().unwrap_or_default()
                    ^ self.value.get(i).copied().unwrap_or_default()
            })
            .collect();
        let new_len = old.len() as i64 + i64::from(self.value_size_delta);
        value.truncate(new_len.max(0) as usize);
        value
    }
}

#[cfg(any(feature = "faker", test))]
pub mod faker {
    use fake::{Dummy, Fake, Faker};
    use rand::Rng;

    use super::*;

    impl<T: MetadataTarget + Dummy<Faker>> Dummy<Faker> for MetadataBody<T> {
        fn dummy_with_rng<R: Rng + ?Sized>(
            config: &Faker,
            rng: &mut R,
        ) -> Self {
            let len = rng.gen_range(0..64);
            MetadataBody::new(
                config.fake_with_rng(rng),
                config.fake_with_rng(rng),
                config.fake_with_rng(rng),
                (0..len).map(|_| rng.r#gen()).collect(),
            )
        }
    }
}
