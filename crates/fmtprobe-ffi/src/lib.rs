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

//! fmtprobe FFI Bindings
//!
//! C-compatible fuzz entry points for drivers that are not `cargo fuzz`
//! (AFL++ persistent mode, honggfuzz, hand-written C replay loops).
//!
//! Each per-target function takes a pointer and a length and always
//! returns `FMTPROBE_PROCESSED`: inputs that decode to nothing and inputs
//! the formatting engine rejects are ordinary results. Only
//! `fmtprobe_run_with` can fail, with `FMTPROBE_ERR_INVALID_ARG`, when a
//! selector code is out of range.
//!
//! A C header (`fmtprobe.h`) is generated by `cbindgen` at build time.
//!
//! # Example (C)
//!
//! ```c
//! #include "fmtprobe.h"
//!
//! int LLVMFuzzerTestOneInput(const uint8_t *data, size_t size) {
//!     return fmtprobe_one_arg(data, size);
//! }
//! ```
//!
//! # Memory
//!
//! No function returns owned memory. Input bytes are borrowed for the
//! duration of the call only. NULL data is treated as an empty input.
//!
//! # Thread Safety
//!
//! All entry points may be called concurrently. The error message returned
//! by `fmtprobe_get_last_error` is stored per thread.
//!
//! # Audit Logging
//!
//! Calls are logged through `tracing` under the `fmtprobe_ffi::audit`
//! target. Install a subscriber in the host process to see them:
//!
//! ```bash
//! export RUST_LOG=fmtprobe_ffi::audit=debug
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod audit;
mod entry;
mod error;
mod types;

// =============================================================================
// Re-exports
// =============================================================================

pub use types::{
    FMTPROBE_ALLOCATION_IN_PLACE, FMTPROBE_ALLOCATION_ISOLATED, FMTPROBE_ERR_INVALID_ARG,
    FMTPROBE_OUTPUT_BUFFER, FMTPROBE_OUTPUT_STRING, FMTPROBE_PROCESSED,
    FMTPROBE_TARGET_DURATION, FMTPROBE_TARGET_DURATION_SWEEP, FMTPROBE_TARGET_NAMED_ARG,
    FMTPROBE_TARGET_ONE_ARG, FMTPROBE_TARGET_TWO_ARGS,
};

pub use error::{fmtprobe_clear_error, fmtprobe_get_last_error};

pub use entry::{
    fmtprobe_chrono_duration, fmtprobe_chrono_sweep, fmtprobe_get_version, fmtprobe_named_arg,
    fmtprobe_one_arg, fmtprobe_run_with, fmtprobe_two_args,
};
