// Dweve fmtprobe - Formatting Engine Fuzz Harness
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! fmtprobe Command Line Interface

use clap::Parser;
use fmtprobe_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// fmtprobe - formatting engine fuzz harness toolkit
///
/// # Examples
///
/// ```bash
/// # Write a seed corpus for every fuzz target
/// fmtprobe seed --out fuzz/corpus
///
/// # Replay a crash file
/// fmtprobe replay one-arg fuzz/artifacts/one_arg/crash-1234 --verbose
///
/// # Show how it decodes
/// fmtprobe decode one-arg fuzz/artifacts/one_arg/crash-1234 --run
/// ```
#[derive(Parser)]
#[command(name = "fmtprobe")]
#[command(author, version, about = "fmtprobe - formatting engine fuzz harness toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
