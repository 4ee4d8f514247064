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

//! Harness configuration.
//!
//! Fuzz targets cannot take arguments, so [`FuzzConfig::from_env`] reads
//! the build-time variants from the environment:
//!
//! | Variable | Values | Default |
//! |---|---|---|
//! | `FMTPROBE_OUTPUT` | `buffer`, `string` | `buffer` |
//! | `FMTPROBE_ALLOCATION` | `isolated`, `in-place` | `isolated` |

use std::fmt;
use std::str::FromStr;

use fmtprobe_format::Limits;
use thiserror::Error;
use tracing::warn;

pub const OUTPUT_ENV: &str = "FMTPROBE_OUTPUT";
pub const ALLOCATION_ENV: &str = "FMTPROBE_ALLOCATION";

/// An unrecognised configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {setting} '{value}' (expected one of: {expected})")]
pub struct ConfigError {
    pub setting: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Where the engine writes its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputTarget {
    /// Append to a byte buffer; templates need not be UTF-8.
    #[default]
    Buffer,
    /// Produce an owned string; templates must be UTF-8.
    String,
}

impl OutputTarget {
    pub const ALL: [OutputTarget; 2] = [OutputTarget::Buffer, OutputTarget::String];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buffer => "buffer",
            Self::String => "string",
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buffer" => Ok(Self::Buffer),
            "string" => Ok(Self::String),
            _ => Err(ConfigError {
                setting: "output target",
                value: s.to_string(),
                expected: "buffer, string",
            }),
        }
    }
}

/// How the format string reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Allocation {
    /// Copy into an exactly sized heap allocation, so that any read past
    /// the end lands outside it.
    #[default]
    Isolated,
    /// Pass a view into the raw input. Faster, but overreads may go unseen.
    InPlace,
}

impl Allocation {
    pub const ALL: [Allocation; 2] = [Allocation::Isolated, Allocation::InPlace];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Isolated => "isolated",
            Self::InPlace => "in-place",
        }
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Allocation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isolated" => Ok(Self::Isolated),
            "in-place" | "inplace" | "in_place" => Ok(Self::InPlace),
            _ => Err(ConfigError {
                setting: "allocation mode",
                value: s.to_string(),
                expected: "isolated, in-place",
            }),
        }
    }
}

/// Configuration for a [`Harness`](crate::Harness).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuzzConfig {
    pub output: OutputTarget,
    pub allocation: Allocation,
    /// Skip negative duration counts before they reach the engine.
    ///
    /// Off by default: this guarded a formatting defect that has since been
    /// fixed, and skipping the inputs hides any regression.
    pub reject_negative_durations: bool,
    /// Resource limits handed to the engine.
    pub limits: Limits,
}

impl FuzzConfig {
    /// Defaults overridden by `FMTPROBE_OUTPUT` and `FMTPROBE_ALLOCATION`.
    /// Unrecognised values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(OUTPUT_ENV) {
            match raw.parse() {
                Ok(output) => config.output = output,
                Err(e) => warn!(target: "fmtprobe::config", error = %e, "ignoring {}", OUTPUT_ENV),
            }
        }
        if let Some(raw) = lookup(ALLOCATION_ENV) {
            match raw.parse() {
                Ok(allocation) => config.allocation = allocation,
                Err(e) => {
                    warn!(target: "fmtprobe::config", error = %e, "ignoring {}", ALLOCATION_ENV)
                }
            }
        }
        config
    }

    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    pub fn with_allocation(mut self, allocation: Allocation) -> Self {
        self.allocation = allocation;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = FuzzConfig::default();
        assert_eq!(config.output, OutputTarget::Buffer);
        assert_eq!(config.allocation, Allocation::Isolated);
        assert!(!config.reject_negative_durations);
        assert_eq!(config.limits, Limits::default());
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("String".parse(), Ok(OutputTarget::String));
        assert_eq!(" buffer ".parse(), Ok(OutputTarget::Buffer));
        assert_eq!("in-place".parse(), Ok(Allocation::InPlace));
        assert_eq!("inplace".parse(), Ok(Allocation::InPlace));
        assert!("heap".parse::<Allocation>().is_err());
    }

    #[test]
    fn test_from_lookup() {
        let config = FuzzConfig::from_lookup(lookup(&[
            (OUTPUT_ENV, "string"),
            (ALLOCATION_ENV, "in-place"),
        ]));
        assert_eq!(config.output, OutputTarget::String);
        assert_eq!(config.allocation, Allocation::InPlace);
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let config = FuzzConfig::from_lookup(lookup(&[(OUTPUT_ENV, "stdout")]));
        assert_eq!(config, FuzzConfig::default());
    }

    #[test]
    fn test_config_error_display() {
        let err = "x".parse::<OutputTarget>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid output target 'x' (expected one of: buffer, string)"
        );
    }
}
