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

//! Replay command - run saved inputs through one target

use crate::error::CliError;
use crate::replay::{install_panic_hook, FileResult, ReplayConfig, Replayer};
use colored::Colorize;
use fmtprobe_core::{FuzzConfig, Outcome, Target};
use std::fs;
use std::path::PathBuf;

/// Expand directories into their regular files, sorted by name.
fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries = fs::read_dir(path)
                .map_err(|e| CliError::io_error(path, e))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file())
                .collect::<Vec<_>>();
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Skipped(reason) => reason.to_string(),
        Outcome::Formatted(bytes) => format!("{:?}", String::from_utf8_lossy(bytes)),
        Outcome::Rejected(error) => error.to_string(),
        Outcome::Swept(outcomes) => {
            let formatted = outcomes.iter().filter(|o| o.is_formatted()).count();
            format!(
                "{} calls, {} formatted, {} rejected",
                outcomes.len(),
                formatted,
                outcomes.len() - formatted
            )
        }
    }
}

fn print_result(result: &FileResult, verbose: bool) {
    let path = result.path.display();
    match &result.result {
        Err(e) => println!("{} {}: {}", "✗".red().bold(), path, e),
        Ok(outcome) => {
            let label = match outcome {
                Outcome::Formatted(_) | Outcome::Swept(_) => outcome.label().green(),
                Outcome::Rejected(_) => outcome.label().yellow(),
                Outcome::Skipped(_) => outcome.label().dimmed(),
            };
            if verbose {
                println!("{:>9} {}: {}", label, path, describe(outcome));
            } else {
                println!("{:>9} {}", label, path);
            }
        }
    }
}

/// Replay corpus files through `target`.
///
/// Directories are replayed file by file. Every readable file counts as
/// processed whatever its outcome; the command fails only when some file
/// could not be read.
pub fn replay(
    target: Target,
    paths: &[PathBuf],
    fuzz: FuzzConfig,
    config: ReplayConfig,
    verbose: bool,
) -> Result<(), CliError> {
    let files = collect_inputs(paths)?;
    if files.is_empty() {
        return Err(CliError::invalid_input("no input files"));
    }

    install_panic_hook();
    let replayer = Replayer::new(target, fuzz, config);
    let results = replayer.replay(&files);

    for result in &results.results {
        print_result(result, verbose);
    }

    println!(
        "\n{} {} files through {} in {} ms ({:.1} files/s)",
        "Replayed".bold(),
        results.total_files(),
        replayer.target(),
        results.elapsed_ms,
        results.throughput()
    );
    println!(
        "  {} formatted, {} rejected, {} skipped, {} swept, {} failed ({} engine calls)",
        results.count("formatted"),
        results.count("rejected"),
        results.count("skipped"),
        results.count("swept"),
        results.failure_count(),
        results.engine_calls()
    );

    if results.has_failures() {
        return Err(CliError::ReplayFailures {
            failed: results.failure_count(),
            total: results.total_files(),
        });
    }
    Ok(())
}
