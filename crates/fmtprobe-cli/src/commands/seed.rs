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

//! Seed command - write a starting corpus

use crate::error::CliError;
use colored::Colorize;
use fmtprobe_core::{seed_corpus, Target};
use std::fs;
use std::path::Path;

/// Name of the `cargo fuzz` binary that drives `target`.
pub fn fuzz_target_name(target: Target) -> &'static str {
    match target {
        Target::OneArg => "one_arg",
        Target::TwoArgs => "two_args",
        Target::NamedArg => "named_arg",
        Target::Duration => "chrono_duration",
        Target::DurationSweep => "chrono_sweep",
    }
}

/// Write seed inputs under `out`.
///
/// With a target the seeds go directly into `out`; without one each target
/// gets a subdirectory named after its fuzz binary, the layout `cargo fuzz`
/// expects under `fuzz/corpus/`.
pub fn seed(target: Option<Target>, out: &Path) -> Result<(), CliError> {
    let plan: Vec<(Target, std::path::PathBuf)> = match target {
        Some(t) => vec![(t, out.to_path_buf())],
        None => Target::ALL
            .iter()
            .map(|&t| (t, out.join(fuzz_target_name(t))))
            .collect(),
    };

    let mut written = 0;
    for (target, dir) in plan {
        fs::create_dir_all(&dir).map_err(|e| CliError::io_error(&dir, e))?;
        for seed in seed_corpus(target) {
            let path = dir.join(&seed.name);
            fs::write(&path, &seed.data).map_err(|e| CliError::io_error(&path, e))?;
            written += 1;
        }
    }

    println!(
        "{} {} seed inputs to {}",
        "✓".green().bold(),
        written,
        out.display()
    );
    Ok(())
}
