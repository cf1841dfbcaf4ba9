// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use serde::{Deserialize, Serialize};

use crate::command::Command;

/// How transactions are framed on input and output.
#[derive(Serialize, Deserialize, Clone, Copy, Default, Debug, PartialEq)]
pub struct CodecConfig {
    /// Use the embedded form, without signature, fee and deadline
    #[serde(default = "bool::default")]
    embedded: bool,
    /// Precede every transaction with its `u32` size
    #[serde(default = "bool::default")]
    size_prefixed: bool,
}

impl CodecConfig {
    pub fn embedded(&self) -> bool {
        self.embedded
    }

    pub fn size_prefixed(&self) -> bool {
        self.size_prefixed
    }

    pub(crate) fn merge(&mut self, command: &Command) {
        let (embedded, size_prefixed) = match command {
            Command::Encode {
                embedded,
                size_prefixed,
                ..
            }
            | Command::Decode {
                embedded,
                size_prefixed,
                ..
            } => (*embedded, *size_prefixed),
            Command::ValueUpdate { .. } => return,
        };

        // Flags can only switch a setting on
        self.embedded |= embedded;
        self.size_prefixed |= size_prefixed;
    }
}
