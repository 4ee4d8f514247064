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

//! Fuzz entry points.

use crate::audit::{
    audit_call_failure, audit_call_start, audit_call_success, sanitize_bytes, sanitize_pointer,
};
use crate::error::{clear_error, set_error};
use crate::types::{
    allocation_from_code, output_from_code, target_from_code, FMTPROBE_ERR_INVALID_ARG,
    FMTPROBE_PROCESSED,
};
use fmtprobe_core::{FuzzConfig, Harness, Target};
use std::os::raw::c_int;
use std::slice;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::Level;

/// Harness configured from `FMTPROBE_OUTPUT` and `FMTPROBE_ALLOCATION`,
/// read once per process.
fn env_harness() -> &'static Harness {
    static HARNESS: OnceLock<Harness> = OnceLock::new();
    HARNESS.get_or_init(Harness::from_env)
}

/// View `size` bytes at `data`. NULL or zero-length is the empty input.
unsafe fn input<'a>(data: *const u8, size: usize) -> &'a [u8] {
    if data.is_null() || size == 0 {
        &[]
    } else {
        slice::from_raw_parts(data, size)
    }
}

/// Whether call parameters are logged. Parameter strings allocate, so
/// they are only built when this holds.
fn audit_params_enabled() -> bool {
    tracing::enabled!(target: "fmtprobe_ffi::audit", Level::DEBUG)
}

unsafe fn run(function: &'static str, target: Target, data: *const u8, size: usize) -> c_int {
    let start = Instant::now();
    let bytes = input(data, size);
    if audit_params_enabled() {
        audit_call_start(
            function,
            &[
                ("data_ptr", &sanitize_pointer(data)),
                ("size", &size.to_string()),
                ("data", &sanitize_bytes(bytes, 16)),
            ],
        );
    } else {
        audit_call_start(function, &[]);
    }
    clear_error();

    let outcome = target.run(bytes, env_harness());
    audit_call_success(function, outcome.label(), start.elapsed());
    FMTPROBE_PROCESSED
}

// =============================================================================
// Per-Target Entry Points
// =============================================================================

/// Single positional argument.
///
/// # Returns
/// Always `FMTPROBE_PROCESSED`.
///
/// # Safety
/// `data` must be NULL or point to `size` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn fmtprobe_one_arg(data: *const u8, size: usize) -> c_int {
    run("fmtprobe_one_arg", Target::OneArg, data, size)
}

/// Two positional arguments, selectors packed into one byte.
///
/// # Returns
/// Always `FMTPROBE_PROCESSED`.
///
/// # Safety
/// `data` must be NULL or point to `size` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn fmtprobe_two_args(data: *const u8, size: usize) -> c_int {
    run("fmtprobe_two_args", Target::TwoArgs, data, size)
}

/// One named argument.
///
/// # Returns
/// Always `FMTPROBE_PROCESSED`.
///
/// # Safety
/// `data` must be NULL or point to `size` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn fmtprobe_named_arg(data: *const u8, size: usize) -> c_int {
    run("fmtprobe_named_arg", Target::NamedArg, data, size)
}

/// A duration with a fuzz-selected count type and scale.
///
/// # Returns
/// Always `FMTPROBE_PROCESSED`.
///
/// # Safety
/// `data` must be NULL or point to `size` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn fmtprobe_chrono_duration(data: *const u8, size: usize) -> c_int {
    run("fmtprobe_chrono_duration", Target::Duration, data, size)
}

/// A duration count formatted once under every enabled scale.
///
/// # Returns
/// Always `FMTPROBE_PROCESSED`.
///
/// # Safety
/// `data` must be NULL or point to `size` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn fmtprobe_chrono_sweep(data: *const u8, size: usize) -> c_int {
    run("fmtprobe_chrono_sweep", Target::DurationSweep, data, size)
}

// =============================================================================
// Explicit Configuration
// =============================================================================

/// Run one input with an explicit target, output and allocation mode.
///
/// # Arguments
/// * `target` - One of the `FMTPROBE_TARGET_*` codes
/// * `output_target` - `FMTPROBE_OUTPUT_BUFFER` or `FMTPROBE_OUTPUT_STRING`
/// * `allocation` - `FMTPROBE_ALLOCATION_ISOLATED` or `FMTPROBE_ALLOCATION_IN_PLACE`
/// * `data` - Input bytes, may be NULL
/// * `size` - Number of bytes at `data`
///
/// # Returns
/// `FMTPROBE_PROCESSED`, or `FMTPROBE_ERR_INVALID_ARG` if a code is out of
/// range (see `fmtprobe_get_last_error`).
///
/// # Safety
/// `data` must be NULL or point to `size` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn fmtprobe_run_with(
    target: c_int,
    output_target: c_int,
    allocation: c_int,
    data: *const u8,
    size: usize,
) -> c_int {
    const FUNCTION: &str = "fmtprobe_run_with";
    let start = Instant::now();
    let bytes = input(data, size);
    if audit_params_enabled() {
        audit_call_start(
            FUNCTION,
            &[
                ("target", &target.to_string()),
                ("output_target", &output_target.to_string()),
                ("allocation", &allocation.to_string()),
                ("data_ptr", &sanitize_pointer(data)),
                ("size", &size.to_string()),
                ("data", &sanitize_bytes(bytes, 16)),
            ],
        );
    } else {
        audit_call_start(FUNCTION, &[]);
    }
    clear_error();

    let resolved = target_from_code(target)
        .ok_or_else(|| format!("Unknown target code {}", target))
        .and_then(|t| {
            output_from_code(output_target)
                .map(|o| (t, o))
                .ok_or_else(|| format!("Unknown output target code {}", output_target))
        })
        .and_then(|(t, o)| {
            allocation_from_code(allocation)
                .map(|a| (t, o, a))
                .ok_or_else(|| format!("Unknown allocation code {}", allocation))
        });

    let (target, output, allocation) = match resolved {
        Ok(modes) => modes,
        Err(msg) => {
            set_error(&msg);
            audit_call_failure(FUNCTION, FMTPROBE_ERR_INVALID_ARG, &msg, start.elapsed());
            return FMTPROBE_ERR_INVALID_ARG;
        }
    };

    let harness = Harness::new(
        FuzzConfig::default()
            .with_output(output)
            .with_allocation(allocation),
    );
    let outcome = target.run(bytes, &harness);
    audit_call_success(FUNCTION, outcome.label(), start.elapsed());
    FMTPROBE_PROCESSED
}

/// Library version as a static NUL-terminated string.
#[no_mangle]
pub extern "C" fn fmtprobe_get_version() -> *const std::os::raw::c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr() as *const std::os::raw::c_char
}
