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

//! fmtprobe CLI library.
//!
//! Tools around the fuzz targets that do not belong in the targets
//! themselves:
//!
//! - **replay**: run corpus or crash files through a target and report
//!   each outcome, optionally in parallel
//! - **decode**: show the argument plan an input decodes to, as text or JSON
//! - **seed**: write a starting corpus for one or all targets
//! - **registry**: list type and scale selectors
//!
//! # Examples
//!
//! ```no_run
//! use fmtprobe_cli::commands::{decode, ReportFormat};
//! use fmtprobe_core::Target;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), fmtprobe_cli::error::CliError> {
//! decode(Target::OneArg, Path::new("crash-1234"), ReportFormat::Json, true)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod replay;
