// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Binary wire codec for metadata transactions.
//!
//! Every transaction is a header followed by a kind-specific body. Fixed
//! width fields are little-endian, and the trailing metadata value is not
//! length-prefixed: its length is derived from the total entity size that
//! the caller passes to [`Entity::read`].

pub mod encoding;
pub mod error;
pub mod header;
pub mod metadata;
pub mod transaction;
pub mod types;

use std::io::{self, Read, Write};

pub use error::{DecodeError, Error};
pub use header::{EmbeddedTransactionHeader, Header, TransactionHeader};
pub use metadata::{
    AccountMetadataBody, MetadataBody, MetadataBuilder, MetadataTarget,
    MetadataUpdate, MosaicMetadataBody, NamespaceMetadataBody,
};
pub use transaction::{
    AccountMetadataTransaction, AnyEmbeddedTransaction, AnyFullTransaction,
    AnyTransaction, Body, EmbeddedAccountMetadataTransaction,
    EmbeddedMosaicMetadataTransaction, EmbeddedNamespaceMetadataTransaction,
    EmbeddedTransaction, FullTransaction, MosaicMetadataTransaction,
    NamespaceMetadataTransaction, Transaction,
};
pub use types::{
    Address, MosaicId, NamespaceId, NetworkType, PublicKey, Signature,
    TransactionType, UnresolvedAddress, UnresolvedMosaicId,
};

/// Size in bytes of the size prefix written by
/// [`Entity::write_size_prefixed`].
pub const SIZE_PREFIX: usize = 4;

/// A fixed-width field.
pub trait Serializable {
    /// Number of bytes the field occupies on the wire.
    const SIZE: usize;

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()>;
    fn read<R: Read>(r: &mut R) -> Result<Self, Error>
    where
        Self: Sized;

    fn read_bytes<R: Read, const N: usize>(
        r: &mut R,
    ) -> Result<[u8; N], Error> {
        let mut buffer = [0u8; N];
        r.read_exact(&mut buffer)?;
        Ok(buffer)
    }
}

/// A record whose wire size depends on its content.
///
/// The size is never self-described: decoding requires the total number of
/// bytes the entity occupies, typically taken from an enclosing size prefix.
pub trait Entity {
    /// Exact number of bytes [`Entity::write`] produces.
    fn size(&self) -> usize;

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()>;

    /// Reads an entity occupying exactly `size` bytes of `r`.
    fn read<R: Read>(r: &mut R, size: usize) -> Result<Self, Error>
    where
        Self: Sized;

    fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.size());
        self.write(&mut buf)?;
        Ok(buf)
    }

    fn to_hex(&self) -> io::Result<String> {
        Ok(hex::encode(self.to_bytes()?))
    }

    /// Decodes an entity spanning the whole slice.
    ///
    /// The slice length is taken as the entity size, so a buffer missing
    /// trailing value bytes decodes as a shorter value. Only
    /// [`Entity::read_size_prefixed`] or [`Entity::read`] with a known size
    /// can detect that truncation.
    fn from_slice(buf: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let mut r = buf;
        Self::read(&mut r, buf.len())
    }

    /// Decodes an entity from hex, with the same size inference as
    /// [`Entity::from_slice`].
    fn from_hex(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let buf = hex::decode(s.trim())?;
        Self::from_slice(&buf)
    }

    /// Writes the entity preceded by its `u32` size, the prefix included.
    fn write_size_prefixed<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let size = u32::try_from(self.size() + SIZE_PREFIX).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "entity too large")
        })?;
        w.write_all(&size.to_le_bytes())?;
        self.write(w)
    }

    /// Reads an entity preceded by its `u32` size, the prefix included.
    fn read_size_prefixed<R: Read>(r: &mut R) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let size = u32::read(r)? as usize;
        let size = size.checked_sub(SIZE_PREFIX).ok_or(
            DecodeError::SizeTooSmall {
                size,
                min: SIZE_PREFIX,
            },
        )?;
        Self::read(r, size)
    }

    /// Reads exactly `len` bytes of a field that carries no length prefix.
    fn read_var_bytes<R: Read>(
        r: &mut R,
        len: usize,
    ) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        r.by_ref().take(len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            return Err(DecodeError::Truncated {
                expected: len,
                found: buf.len(),
            }
            .into());
        }
        Ok(buf)
    }
}
