// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::io;

use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;

/// Output styles accepted by `--log-type`.
pub const LOG_TYPES: [&str; 3] = ["coloured", "plain", "json"];

/// Logging setup for the CLI. Events always go to stderr so that stdout
/// only carries the command output.
pub struct Log {
    level: tracing::Level,
    filter: String,
    format: String,
}

impl Log {
    pub fn new(level: tracing::Level, filter: String, format: String) -> Self {
        Self {
            level,
            filter,
            format,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(self.filter.as_str()).add_directive(self.level.into())
    }

    pub fn register(self) -> Result<(), SetGlobalDefaultError> {
        let builder = tracing_subscriber::fmt::Subscriber::builder()
            .with_env_filter(self.env_filter())
            .with_writer(io::stderr);

        match self.format.as_str() {
            "json" => tracing::subscriber::set_global_default(
                builder
                    .json()
                    .with_current_span(false)
                    .flatten_event(true)
                    .finish(),
            ),
            "plain" => tracing::subscriber::set_global_default(
                builder.with_ansi(false).finish(),
            ),
            _ => tracing::subscriber::set_global_default(builder.finish()),
        }
    }
}
