// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

mod args;
mod command;
mod config;
mod log;

use clap::Parser;
use tracing::error;

use crate::args::Args;
use crate::config::Config;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::try_from(&args)?;

    log::Log::new(config.log_level()?, config.log_filter(), config.log_type())
        .register()?;

    match args.command.run(&config.codec) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!("{e:#}");
            Err(e)
        }
    }
}
