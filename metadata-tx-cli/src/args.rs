// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::Parser;

use crate::command::Command;
use crate::log::LOG_TYPES;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Encode and decode metadata transactions",
)]
pub struct Args {
    /// Sets the configuration file path
    #[clap(long, short, env = "MDTX_CONFIG_TOML", value_parser)]
    pub config: Option<PathBuf>,

    /// Output log level
    #[clap(long)]
    pub log_level: Option<tracing::Level>,

    // Change the log format accordingly
    #[clap(long, value_parser = PossibleValuesParser::new(LOG_TYPES))]
    pub log_type: Option<String>,

    /// Add log filter(s)
    #[clap(long)]
    pub log_filter: Option<String>,

    #[clap(subcommand)]
    pub command: Command,
}
