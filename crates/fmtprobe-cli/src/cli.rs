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

//! CLI command definitions and argument parsing.

use crate::commands::{self, ReportFormat};
use crate::error::CliError;
use crate::replay::ReplayConfig;
use clap::Subcommand;
use fmtprobe_core::{Allocation, FuzzConfig, OutputTarget, Target};
use std::path::PathBuf;

/// Top-level CLI commands.
///
/// `TARGET` is one of `one-arg`, `two-args`, `named-arg`, `duration` or
/// `duration-sweep` (underscores are accepted too).
#[derive(Subcommand)]
pub enum Commands {
    /// Replay corpus or crash files through a target
    ///
    /// Each file is decoded and formatted exactly as the fuzz target would.
    /// Directories are replayed file by file. Exits non-zero only when a
    /// file cannot be read; a panic names the offending file.
    Replay {
        /// Fuzz target to replay through
        #[arg(value_name = "TARGET")]
        target: Target,

        /// Input files or corpus directories
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Replay files in parallel
        #[arg(short, long)]
        parallel: bool,

        /// Number of worker threads for parallel replay
        #[arg(short = 'j', long)]
        jobs: Option<usize>,

        /// Engine output target (buffer, string); defaults to FMTPROBE_OUTPUT
        #[arg(long)]
        output: Option<OutputTarget>,

        /// Template allocation (isolated, in-place); defaults to FMTPROBE_ALLOCATION
        #[arg(long)]
        allocation: Option<Allocation>,

        /// Skip negative duration counts before they reach the engine
        #[arg(long)]
        reject_negative_durations: bool,

        /// Print the formatted output or rejection reason of every file
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show how an input file decodes for a target
    Decode {
        /// Fuzz target to decode for
        #[arg(value_name = "TARGET")]
        target: Target,

        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Also run the decoded input and report the outcome
        #[arg(short, long)]
        run: bool,
    },

    /// Write seed inputs for one target, or for all of them
    Seed {
        /// Fuzz target; all targets when omitted
        #[arg(value_name = "TARGET")]
        target: Option<Target>,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
    },

    /// List the type and scale selector registries
    Registry {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
}

impl Commands {
    /// Execute the command with the provided arguments.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Replay {
                target,
                files,
                parallel,
                jobs,
                output,
                allocation,
                reject_negative_durations,
                verbose,
            } => {
                let mut fuzz = FuzzConfig::from_env();
                if let Some(output) = output {
                    fuzz = fuzz.with_output(output);
                }
                if let Some(allocation) = allocation {
                    fuzz = fuzz.with_allocation(allocation);
                }
                fuzz.reject_negative_durations = reject_negative_durations;
                let config = ReplayConfig {
                    parallel: parallel || jobs.is_some(),
                    max_threads: jobs,
                };
                commands::replay(target, &files, fuzz, config, verbose)
            }
            Commands::Decode {
                target,
                file,
                format,
                run,
            } => commands::decode(target, &file, format, run),
            Commands::Seed { target, out } => commands::seed(target, &out),
            Commands::Registry { format } => commands::registry(format),
        }
    }
}
