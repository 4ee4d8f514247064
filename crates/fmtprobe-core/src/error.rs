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

//! Decode errors.
//!
//! Every variant describes an input the harness declines to run. None of
//! them is a defect: the entry point turns each into a silent no-op.

use std::fmt;
use thiserror::Error;

/// The selector table a rejected selector was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Registry {
    Type,
    Scale,
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => write!(f, "type"),
            Self::Scale => write!(f, "scale"),
        }
    }
}

/// Why an input was skipped before reaching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A fixed-width field ran past the end of the input, or the format
    /// string would have been empty.
    #[error("insufficient input: needed {needed} bytes, {available} available")]
    InsufficientInput { needed: usize, available: usize },

    /// A selector with no registry entry.
    #[error("unknown {registry} selector {selector}")]
    UnknownSelector { registry: Registry, selector: u8 },

    /// The argument name would be empty or leave no format string.
    #[error("argument name length {len} out of range ({available} bytes left)")]
    NameOutOfRange { len: usize, available: usize },

    /// Unix seconds outside the representable calendar range.
    #[error("calendar time {secs}s out of range")]
    TimeOutOfRange { secs: i64 },

    /// A negative duration count, skipped while the negative-duration
    /// guard is enabled.
    #[error("negative duration count")]
    NegativeDuration,
}

impl DecodeError {
    pub(crate) fn unknown_type(selector: u8) -> Self {
        Self::UnknownSelector {
            registry: Registry::Type,
            selector,
        }
    }

    pub(crate) fn unknown_scale(selector: u8) -> Self {
        Self::UnknownSelector {
            registry: Registry::Scale,
            selector,
        }
    }
}

/// Result alias for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            DecodeError::InsufficientInput {
                needed: 5,
                available: 4
            }
            .to_string(),
            "insufficient input: needed 5 bytes, 4 available"
        );
        assert_eq!(
            DecodeError::unknown_scale(0).to_string(),
            "unknown scale selector 0"
        );
        assert_eq!(
            DecodeError::unknown_type(200).to_string(),
            "unknown type selector 200"
        );
        assert_eq!(
            DecodeError::TimeOutOfRange { secs: -1 }.to_string(),
            "calendar time -1s out of range"
        );
    }
}
