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

//! Fuzz input protocol and dispatch for the `fmtprobe-format` engine.
//!
//! A fuzz input is an untrusted byte string. This crate slices it into a
//! selector header, typed argument values and a format string, then makes
//! one engine call under a fault-isolation discipline:
//!
//! - [`cursor`] - bounds-checked field reads
//! - [`repr`] - selector to scalar representation
//! - [`scale`] - selector to decimal duration period
//! - [`isolate`] - exactly sized copies of the format string
//! - [`harness`] - engine invocation and outcome classification
//! - [`target`] - the five argument shapes and their byte layouts
//!
//! Inputs the decoder cannot use are skipped, template errors are expected
//! rejections, and anything that panics is a finding.
//!
//! # Examples
//!
//! ```
//! use fmtprobe_core::{Harness, Outcome, Target};
//!
//! let data = [0x03, 0x00, 0x00, 0x00, 0x00, 0x2a, b'{', b'}'];
//! let outcome = Target::OneArg.run(&data, &Harness::default());
//! assert_eq!(outcome, Outcome::Formatted(b"42".to_vec()));
//! ```

use std::sync::OnceLock;

pub mod config;
pub mod cursor;
pub mod encode;
pub mod engine;
mod error;
pub mod extended;
pub mod harness;
pub mod isolate;
pub mod repr;
pub mod scale;
pub mod target;

pub use config::{Allocation, ConfigError, FuzzConfig, OutputTarget};
pub use cursor::ByteCursor;
pub use encode::{seed_corpus, InputBuilder, Seed};
pub use engine::{BuiltinEngine, Engine};
pub use error::{DecodeError, DecodeResult, Registry};
pub use harness::{Argument, Call, Harness, Outcome};
pub use isolate::{FormatInput, Isolated, Termination};
pub use repr::{Representation, Scalar};
pub use scale::Multiplier;
pub use target::{Plan, Target, CALENDAR_SELECTOR, HEADER_LEN, SLOT_WIDTH};

/// Status returned by every entry point: the input was consumed.
pub const PROCESSED: i32 = 0;

/// Run one fuzz input against `target` with a harness configured from the
/// environment (read once per process). Always returns [`PROCESSED`].
pub fn test_one_input(target: Target, data: &[u8]) -> i32 {
    static HARNESS: OnceLock<Harness> = OnceLock::new();
    test_one_input_with(target, data, HARNESS.get_or_init(Harness::from_env))
}

/// Run one fuzz input with an explicit harness. Always returns [`PROCESSED`].
pub fn test_one_input_with<E: Engine>(target: Target, data: &[u8], harness: &Harness<E>) -> i32 {
    let _ = target.run(data, harness);
    PROCESSED
}
