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

//! Replacement-field text formatting engine.
//!
//! Templates contain literal text and `{...}` replacement fields:
//!
//! ```text
//! field   ::= '{' [arg_id] [':' spec] '}'
//! arg_id  ::= integer | identifier
//! ```
//!
//! `{{` and `}}` are literal braces. Fields index the argument list
//! automatically (`{}`) or manually (`{0}`, `{name}`), never both in one
//! template. Integers, floats and booleans take a standard spec; durations
//! and calendar times take a `%`-conversion chrono spec.
//!
//! Every malformed template or argument mismatch is reported as a
//! [`FormatError`]; no input makes the engine panic.
//!
//! # Examples
//!
//! ```
//! use fmtprobe_format::{format, Args, Value};
//!
//! let args = Args::new().with(Value::I32(42)).with(Value::F64(0.5));
//! assert_eq!(format(b"{:>5}|{:.2e}", &args).unwrap(), "   42|5.00e-01");
//! ```

mod args;
mod error;
mod limits;
mod render;
mod scan;
mod spec;
mod value;

pub use args::Args;
pub use error::{FormatError, FormatErrorKind, FormatResult};
pub use limits::{Limits, MAX_TEMPLATE_INTEGER};
pub use scan::{format, format_to, Formatter};
pub use value::{CalendarTime, Count, Duration, Ratio, Value};
