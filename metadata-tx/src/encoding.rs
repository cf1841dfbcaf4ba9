// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::io::{self, Read, Write};

use crate::error::{DecodeError, Error};
use crate::types::*;
use crate::Serializable;

macro_rules! le_serializable {
    ($($t:ty),* $(,)?) => {
        $(
            impl Serializable for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
                    w.write_all(&self.to_le_bytes())
                }

                fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
                    Ok(<$t>::from_le_bytes(Self::read_bytes(r)?))
                }
            }
        )*
    };
}

le_serializable!(u8, u16, u32, u64, i16, i64);

impl<const N: usize> Serializable for [u8; N] {
    const SIZE: usize = N;

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self[..])
    }

    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        Self::read_bytes(r)
    }
}

impl Serializable for NetworkType {
    const SIZE: usize = 1;

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        (*self as u8).write(w)
    }

    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        Ok(NetworkType::try_from(u8::read(r)?)?)
    }
}

impl Serializable for TransactionType {
    const SIZE: usize = 2;

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        (*self as u16).write(w)
    }

    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        Ok(TransactionType::try_from(u16::read(r)?)?)
    }
}

impl Serializable for PublicKey {
    const SIZE: usize = 32;

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.0.write(w)
    }

    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        Ok(PublicKey(Self::read_bytes(r)?))
    }
}

impl Serializable for Signature {
    const SIZE: usize = 64;

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.0.write(w)
    }

    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        Ok(Signature(Self::read_bytes(r)?))
    }
}

impl Serializable for Address {
    const SIZE: usize = ADDRESS_SIZE;

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.as_bytes().write(w)
    }

    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        Address::from_bytes(Self::read_bytes(r)?).map_err(|_| {
            DecodeError::InvalidData("address network byte").into()
        })
    }
}

impl Serializable for UnresolvedAddress {
    const SIZE: usize = ADDRESS_SIZE;

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.to_raw().write(w)
    }

    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        UnresolvedAddress::from_raw(Self::read_bytes(r)?)
    }
}

impl Serializable for MosaicId {
    const SIZE: usize = 8;

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.id().write(w)
    }

    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        MosaicId::new(u64::read(r)?)
            .map_err(|_| DecodeError::InvalidData("mosaic id").into())
    }
}

impl Serializable for NamespaceId {
    const SIZE: usize = 8;

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.id().write(w)
    }

    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        NamespaceId::new(u64::read(r)?)
            .map_err(|_| DecodeError::InvalidData("namespace id").into())
    }
}

impl Serializable for UnresolvedMosaicId {
    const SIZE: usize = 8;

    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.to_raw().write(w)
    }

    fn read<R: Read>(r: &mut R) -> Result<Self, Error> {
        Ok(UnresolvedMosaicId::from_raw(u64::read(r)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{EmbeddedTransactionHeader, TransactionHeader};
    use fake::{Dummy, Fake, Faker};

    /// Asserts if encoding/decoding of a serializable type runs properly.
    fn assert_serializable<
        S: Dummy<Faker> + Eq + std::fmt::Debug + Serializable,
    >() {
        let obj: S = Faker.fake();
        let mut buf = vec![];
        obj.write(&mut buf).expect("should be writable");

        assert_eq!(buf.len(), S::SIZE);
        assert_eq!(obj, S::read(&mut &buf[..]).expect("should be readable"));
    }

    #[test]
    fn test_encoding_network_type() {
        assert_serializable::<NetworkType>();
    }

    #[test]
    fn test_encoding_transaction_type() {
        assert_serializable::<TransactionType>();
    }

    #[test]
    fn test_encoding_keys() {
        assert_serializable::<PublicKey>();
        assert_serializable::<Signature>();
    }

    #[test]
    fn test_encoding_address() {
        assert_serializable::<Address>();
        assert_serializable::<UnresolvedAddress>();
    }

    #[test]
    fn test_encoding_ids() {
        assert_serializable::<MosaicId>();
        assert_serializable::<NamespaceId>();
        assert_serializable::<UnresolvedMosaicId>();
    }

    #[test]
    fn test_encoding_headers() {
        assert_serializable::<TransactionHeader>();
        assert_serializable::<EmbeddedTransactionHeader>();
    }

    #[test]
    fn test_signed_little_endian() {
        let mut buf = vec![];
        (-2i16).write(&mut buf).expect("should be writable");
        42i64.write(&mut buf).expect("should be writable");

        assert_eq!(hex::encode(&buf), "feff2a00000000000000");
    }

    #[test]
    fn test_truncated_field() {
        let err = u64::read(&mut &[1u8, 2, 3][..]).unwrap_err();
        match err.decode_error() {
            Some(DecodeError::Io(e)) => {
                assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof)
            }
            e => panic!("unexpected error {e:?}"),
        }
    }

    #[test]
    fn test_invalid_transaction_type() {
        let err = TransactionType::read(&mut &[0x44u8, 0x45][..]).unwrap_err();
        assert!(matches!(
            err.decode_error(),
            Some(DecodeError::InvalidDiscriminant {
                field: "transaction type",
                value: 0x4544,
            })
        ));
    }

    #[test]
    fn test_namespace_id_requires_flag() {
        let err = NamespaceId::read(&mut &[1u8, 0, 0, 0, 0, 0, 0, 0][..])
            .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }
}
