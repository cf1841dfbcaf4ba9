// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Error-type for metadata-tx.

use std::io;

use thiserror::Error;

use crate::types::TransactionType;

/// The metadata-tx error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A construction parameter is missing or outside of its domain.
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: String,
    },
    /// The input does not represent a valid entity of the requested type.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] DecodeError),
}

/// Cause of a [`Error::MalformedInput`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Reading from the underlying stream failed, usually on a premature
    /// end of input.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A variable-length field ended before its declared length.
    #[error("truncated field: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("invalid {field} value {value:#x}")]
    InvalidDiscriminant { field: &'static str, value: u64 },
    /// The header announces a different kind than the one being decoded.
    #[error("unexpected transaction type {found:?}, expected {expected:?}")]
    UnexpectedType {
        expected: TransactionType,
        found: TransactionType,
    },
    /// The entity size cannot hold the fixed fields.
    #[error("entity size {size} is smaller than the minimum {min}")]
    SizeTooSmall { size: usize, min: usize },
    #[error("invalid data: {0}")]
    InvalidData(&'static str),
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}

impl Error {
    pub(crate) fn invalid_argument(
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the decoding cause, if this is a malformed input error.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Error::MalformedInput(e) => Some(e),
            Error::InvalidArgument { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Self::MalformedInput(DecodeError::Io(value))
    }
}

impl From<hex::FromHexError> for Error {
    fn from(value: hex::FromHexError) -> Self {
        Self::MalformedInput(DecodeError::Hex(value))
    }
}
