// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Identifiers and enumerations shared by every transaction kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::hex::Hex;
use serde_with::serde_as;

use crate::error::{DecodeError, Error};

/// Raw size of an address, network byte included.
pub const ADDRESS_SIZE: usize = 24;

/// Bit of the first address byte marking an alias.
const ALIAS_FLAG: u8 = 0x01;

/// Bit of a 64-bit identifier marking a namespace.
const NAMESPACE_FLAG: u64 = 1 << 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(any(feature = "faker", test), derive(fake::Dummy))]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum NetworkType {
    MainNet = 0x68,
    TestNet = 0x98,
    PrivateNet = 0x60,
    PrivateTestNet = 0x90,
}

impl TryFrom<u8> for NetworkType {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x68 => Ok(NetworkType::MainNet),
            0x98 => Ok(NetworkType::TestNet),
            0x60 => Ok(NetworkType::PrivateNet),
            0x90 => Ok(NetworkType::PrivateTestNet),
            _ => Err(DecodeError::InvalidDiscriminant {
                field: "network",
                value: value.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(any(feature = "faker", test), derive(fake::Dummy))]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum TransactionType {
    AccountMetadata = 0x4144,
    MosaicMetadata = 0x4244,
    NamespaceMetadata = 0x4344,
}

impl TryFrom<u16> for TransactionType {
    type Error = DecodeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0x4144 => Ok(TransactionType::AccountMetadata),
            0x4244 => Ok(TransactionType::MosaicMetadata),
            0x4344 => Ok(TransactionType::NamespaceMetadata),
            _ => Err(DecodeError::InvalidDiscriminant {
                field: "transaction type",
                value: value.into(),
            }),
        }
    }
}

#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(any(feature = "faker", test), derive(fake::Dummy))]
#[serde(transparent)]
pub struct PublicKey(#[serde_as(as = "Hex")] pub [u8; 32]);

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.0))
    }
}

#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(any(feature = "faker", test), derive(fake::Dummy))]
#[serde(transparent)]
pub struct Signature(#[serde_as(as = "Hex")] pub [u8; 64]);

impl Default for Signature {
    fn default() -> Self {
        Self([0u8; 64])
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(self.0))
    }
}

/// Resolved account address.
///
/// The first byte is the network byte, which always has its lowest bit
/// clear. The remaining bytes are opaque.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    pub fn from_bytes(bytes: [u8; ADDRESS_SIZE]) -> Result<Self, Error> {
        if bytes[0] & ALIAS_FLAG != 0 {
            return Err(Error::invalid_argument(
                "address",
                "network byte has the alias flag set",
            ));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// Network this address belongs to, if the network byte is known.
    pub fn network(&self) -> Option<NetworkType> {
        NetworkType::try_from(self.0[0]).ok()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; ADDRESS_SIZE];
        hex::decode_to_slice(s, &mut bytes)?;
        Self::from_bytes(bytes)
    }
}

impl TryFrom<String> for Address {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}

/// Mosaic identifier. The high bit is always clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct MosaicId(u64);

impl MosaicId {
    pub fn new(id: u64) -> Result<Self, Error> {
        if id & NAMESPACE_FLAG != 0 {
            return Err(Error::invalid_argument(
                "mosaic id",
                format!("{id:#018x} has the namespace flag set"),
            ));
        }
        Ok(Self(id))
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for MosaicId {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MosaicId> for u64 {
    fn from(value: MosaicId) -> Self {
        value.0
    }
}

/// Namespace identifier. The high bit is always set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct NamespaceId(u64);

impl NamespaceId {
    pub fn new(id: u64) -> Result<Self, Error> {
        if id & NAMESPACE_FLAG == 0 {
            return Err(Error::invalid_argument(
                "namespace id",
                format!("{id:#018x} lacks the namespace flag"),
            ));
        }
        Ok(Self(id))
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for NamespaceId {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NamespaceId> for u64 {
    fn from(value: NamespaceId) -> Self {
        value.0
    }
}

/// An address, or a namespace aliasing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedAddress {
    Address(Address),
    Alias {
        network: NetworkType,
        namespace_id: NamespaceId,
    },
}

impl UnresolvedAddress {
    pub(crate) fn to_raw(self) -> [u8; ADDRESS_SIZE] {
        match self {
            UnresolvedAddress::Address(address) => address.0,
            UnresolvedAddress::Alias {
                network,
                namespace_id,
            } => {
                let mut raw = [0u8; ADDRESS_SIZE];
                raw[0] = network as u8 | ALIAS_FLAG;
                raw[1..9].copy_from_slice(&namespace_id.0.to_le_bytes());
                raw
            }
        }
    }

    pub(crate) fn from_raw(raw: [u8; ADDRESS_SIZE]) -> Result<Self, Error> {
        if raw[0] & ALIAS_FLAG == 0 {
            return Ok(UnresolvedAddress::Address(Address(raw)));
        }

        let network = NetworkType::try_from(raw[0] & !ALIAS_FLAG)?;
        let mut id = [0u8; 8];
        id.copy_from_slice(&raw[1..9]);
        let namespace_id = NamespaceId::new(u64::from_le_bytes(id))
            .map_err(|_| DecodeError::InvalidData("alias namespace id"))?;
        if raw[9..].iter().any(|b| *b != 0) {
            return Err(DecodeError::InvalidData("alias padding").into());
        }

        Ok(UnresolvedAddress::Alias {
            network,
            namespace_id,
        })
    }
}

impl From<Address> for UnresolvedAddress {
    fn from(value: Address) -> Self {
        UnresolvedAddress::Address(value)
    }
}

/// A mosaic, or a namespace aliasing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedMosaicId {
    Mosaic(MosaicId),
    Alias(NamespaceId),
}

impl UnresolvedMosaicId {
    pub(crate) fn to_raw(self) -> u64 {
        match self {
            UnresolvedMosaicId::Mosaic(id) => id.0,
            UnresolvedMosaicId::Alias(id) => id.0,
        }
    }

    pub(crate) fn from_raw(raw: u64) -> Self {
        if raw & NAMESPACE_FLAG == 0 {
            UnresolvedMosaicId::Mosaic(MosaicId(raw))
        } else {
            UnresolvedMosaicId::Alias(NamespaceId(raw))
        }
    }
}

impl From<MosaicId> for UnresolvedMosaicId {
    fn from(value: MosaicId) -> Self {
        UnresolvedMosaicId::Mosaic(value)
    }
}

impl From<NamespaceId> for UnresolvedMosaicId {
    fn from(value: NamespaceId) -> Self {
        UnresolvedMosaicId::Alias(value)
    }
}

#[cfg(any(feature = "faker", test))]
pub mod faker {
    use fake::{Dummy, Fake, Faker};
    use rand::Rng;

    use super::*;

    impl Dummy<Faker> for Address {
        fn dummy_with_rng<R: Rng + ?Sized>(
            config: &Faker,
            rng: &mut R,
        ) -> Self {
            let mut bytes: [u8; ADDRESS_SIZE] = config.fake_with_rng(rng);
            bytes[0] = config.fake_with_rng::<NetworkType, _>(rng) as u8;
            Address(bytes)
        }
    }

    impl Dummy<Faker> for MosaicId {
        fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
            MosaicId(rng.r#gen::<u64>() & !NAMESPACE_FLAG)
        }
    }

    impl Dummy<Faker> for NamespaceId {
        fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
            NamespaceId(rng.r#gen::<u64>() | NAMESPACE_FLAG)
        }
    }

    impl Dummy<Faker> for UnresolvedAddress {
        fn dummy_with_rng<R: Rng + ?Sized>(
            config: &Faker,
            rng: &mut R,
        ) -> Self {
            if rng.r#gen::<bool>() {
                UnresolvedAddress::Address(config.fake_with_rng(rng))
            } else {
                UnresolvedAddress::Alias {
                    network: config.fake_with_rng(rng),
                    namespace_id: config.fake_with_rng(rng),
                }
            }
        }
    }

    impl Dummy<Faker> for UnresolvedMosaicId {
        fn dummy_with_rng<R: Rng + ?Sized>(
            config: &Faker,
            rng: &mut R,
        ) -> Self {
            if rng.r#gen::<bool>() {
                UnresolvedMosaicId::Mosaic(config.fake_with_rng(rng))
            } else {
                UnresolvedMosaicId::Alias(config.fake_with_rng(rng))
            }
        }
    }
}
