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

//! Corpus replay.
//!
//! Runs a set of saved inputs through one target, serially or on a Rayon
//! pool, and collects one [`Outcome`] per file. Replay mirrors what the
//! fuzzer does with a single input, so a file that crashed the fuzzer
//! panics here too. The panic hook installed by [`install_panic_hook`]
//! names the file before the process dies.

use crate::commands::read_input;
use crate::error::CliError;
use fmtprobe_core::{FuzzConfig, Harness, Outcome, Target};
use rayon::prelude::*;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

thread_local! {
    static CURRENT_INPUT: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

/// Print the input being replayed on the panicking thread, then defer to
/// the previous hook.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        CURRENT_INPUT.with(|current| {
            if let Some(path) = &*current.borrow() {
                eprintln!("crashing input: {}", path.display());
            }
        });
        previous(info);
    }));
}

/// Replay settings.
#[derive(Debug, Clone, Default)]
pub struct ReplayConfig {
    /// Replay files on the Rayon pool.
    pub parallel: bool,
    /// Cap on worker threads; `None` uses Rayon's default.
    pub max_threads: Option<usize>,
}

/// The outcome of one file, or why it could not be replayed.
#[derive(Debug, Clone)]
pub struct FileResult {
    pub path: PathBuf,
    pub result: Result<Outcome, CliError>,
}

impl FileResult {
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Results of a replay, in the order the files were given.
#[derive(Debug, Clone)]
pub struct ReplayResults {
    pub results: Vec<FileResult>,
    pub elapsed_ms: u128,
}

impl ReplayResults {
    pub fn total_files(&self) -> usize {
        self.results.len()
    }

    /// Number of files whose outcome has this label.
    pub fn count(&self, label: &str) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(&r.result, Ok(o) if o.label() == label))
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(FileResult::is_failure)
    }

    /// Total engine calls across all outcomes.
    pub fn engine_calls(&self) -> usize {
        self.results
            .iter()
            .filter_map(|r| r.result.as_ref().ok())
            .map(Outcome::engine_calls)
            .sum()
    }

    /// Files per second.
    pub fn throughput(&self) -> f64 {
        if self.elapsed_ms == 0 {
            0.0
        } else {
            (self.total_files() as f64) / (self.elapsed_ms as f64 / 1000.0)
        }
    }
}

/// Replays files through one target.
#[derive(Debug, Clone)]
pub struct Replayer {
    target: Target,
    harness: Harness,
    config: ReplayConfig,
}

impl Replayer {
    pub fn new(target: Target, fuzz: FuzzConfig, config: ReplayConfig) -> Self {
        Self {
            target,
            harness: Harness::new(fuzz),
            config,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Read and run one file.
    pub fn replay_file(&self, path: &Path) -> Result<Outcome, CliError> {
        let data = read_input(path)?;
        debug!(target: "fmtprobe::replay", path = %path.display(), size = data.len(), "replaying");

        CURRENT_INPUT.with(|current| *current.borrow_mut() = Some(path.to_path_buf()));
        let outcome = self.target.run(&data, &self.harness);
        CURRENT_INPUT.with(|current| *current.borrow_mut() = None);
        Ok(outcome)
    }

    pub fn replay(&self, files: &[PathBuf]) -> ReplayResults {
        let start = Instant::now();

        let run = |path: &PathBuf| FileResult {
            path: path.clone(),
            result: self.replay_file(path),
        };

        let results = if self.config.parallel && files.len() > 1 {
            match self.config.max_threads.and_then(thread_pool) {
                Some(pool) => pool.install(|| files.par_iter().map(run).collect()),
                None => files.par_iter().map(run).collect(),
            }
        } else {
            files.iter().map(run).collect()
        };

        ReplayResults {
            results,
            elapsed_ms: start.elapsed().as_millis(),
        }
    }
}

/// A pool of `threads` workers, or `None` to fall back to the global pool.
fn thread_pool(threads: usize) -> Option<rayon::ThreadPool> {
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => Some(pool),
        Err(e) => {
            warn!(
                target: "fmtprobe::replay",
                threads,
                error = %e,
                "thread pool build failed, using the global pool"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmtprobe_core::{InputBuilder, Scalar};
    use std::fs;

    fn write_inputs(dir: &Path, inputs: &[&[u8]]) -> Vec<PathBuf> {
        inputs
            .iter()
            .enumerate()
            .map(|(i, data)| {
                let path = dir.join(format!("input-{i}"));
                fs::write(&path, data).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let dir = tempfile::tempdir().unwrap();
        let formatted = InputBuilder::one_arg(Scalar::I32(42)).template(b"{}");
        let rejected = InputBuilder::one_arg(Scalar::I32(42)).template(b"{");
        let files = write_inputs(dir.path(), &[&formatted[..], &rejected[..], &b"\x03"[..]]);

        let serial = Replayer::new(Target::OneArg, FuzzConfig::default(), ReplayConfig::default())
            .replay(&files);
        let parallel = Replayer::new(
            Target::OneArg,
            FuzzConfig::default(),
            ReplayConfig {
                parallel: true,
                max_threads: Some(2),
            },
        )
        .replay(&files);

        for results in [&serial, &parallel] {
            assert_eq!(results.total_files(), 3);
            assert_eq!(results.count("formatted"), 1);
            assert_eq!(results.count("rejected"), 1);
            assert_eq!(results.count("skipped"), 1);
            assert_eq!(results.engine_calls(), 2);
            assert!(!results.has_failures());
        }
        let outputs: Vec<_> = parallel
            .results
            .iter()
            .map(|r| r.result.as_ref().unwrap().label())
            .collect();
        assert_eq!(outputs, ["formatted", "rejected", "skipped"]);
    }

    #[test]
    fn test_thread_pool_size() {
        let pool = thread_pool(3).unwrap();
        assert_eq!(pool.current_num_threads(), 3);
    }

    #[test]
    fn test_missing_file_is_a_failure() {
        let results = Replayer::new(Target::OneArg, FuzzConfig::default(), ReplayConfig::default())
            .replay(&[PathBuf::from("/nonexistent/fmtprobe/input")]);
        assert_eq!(results.failure_count(), 1);
        assert!(matches!(
            results.results[0].result,
            Err(CliError::Io { .. })
        ));
    }
}
