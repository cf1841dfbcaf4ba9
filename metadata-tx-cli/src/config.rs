// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

pub mod codec;

use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::args::Args;

use self::codec::CodecConfig;

#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
pub(crate) struct Config {
    log_level: Option<String>,
    log_type: Option<String>,
    log_filter: Option<String>,

    #[serde(default = "CodecConfig::default")]
    pub(crate) codec: CodecConfig,
}

/// Default log_level.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log_type.
const DEFAULT_LOG_TYPE: &str = "coloured";

impl TryFrom<&Args> for Config {
    type Error = anyhow::Error;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let mut config = match &args.config {
            Some(conf_path) => {
                let toml =
                    std::fs::read_to_string(conf_path).with_context(|| {
                        format!("cannot read config {}", conf_path.display())
                    })?;
                toml::from_str(&toml).with_context(|| {
                    format!("cannot parse config {}", conf_path.display())
                })?
            }
            None => Config::default(),
        };

        // Overwrite config log-level
        if let Some(log_level) = args.log_level {
            config.log_level = Some(log_level.to_string());
        }

        // Overwrite config log-type
        if let Some(log_type) = &args.log_type {
            config.log_type = Some(log_type.into());
        }

        // Overwrite config log-filter
        if let Some(log_filter) = &args.log_filter {
            config.log_filter = Some(log_filter.into());
        }

        config.codec.merge(&args.command);

        Ok(config)
    }
}

impl Config {
    pub(crate) fn log_type(&self) -> String {
        match &self.log_type {
            None => DEFAULT_LOG_TYPE.into(),
            Some(log_type) => log_type.into(),
        }
    }

    pub(crate) fn log_level(&self) -> anyhow::Result<tracing::Level> {
        let log_level = match &self.log_level {
            None => DEFAULT_LOG_LEVEL,
            Some(log_level) => log_level,
        };
        tracing::Level::from_str(log_level).with_context(|| {
            format!("Invalid log-level specified '{log_level}'")
        })
    }

    pub(crate) fn log_filter(&self) -> String {
        self.log_filter.clone().unwrap_or_default()
    }
}
