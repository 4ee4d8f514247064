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

//! Safety tests for the fmtprobe FFI interface.
//!
//! These tests verify:
//! - NULL and zero-length input handling
//! - Return codes for every entry point
//! - Selector code validation and the thread-local error message
//! - Adversarial and oversized inputs

use fmtprobe_core::{seed_corpus, InputBuilder, Multiplier, Scalar, Target};
use fmtprobe_ffi::*;
use std::ffi::CStr;
use std::os::raw::c_int;
use std::ptr;

type EntryPoint = unsafe extern "C" fn(*const u8, usize) -> c_int;

const ENTRY_POINTS: [(Target, EntryPoint); 5] = [
    (Target::OneArg, fmtprobe_one_arg),
    (Target::TwoArgs, fmtprobe_two_args),
    (Target::NamedArg, fmtprobe_named_arg),
    (Target::Duration, fmtprobe_chrono_duration),
    (Target::DurationSweep, fmtprobe_chrono_sweep),
];

const SCENARIO_A: &[u8] = &[0x03, 0x05, 0x00, 0x00, 0x00, 0x2A, b'{', b'}'];

fn last_error() -> Option<String> {
    let ptr = fmtprobe_get_last_error();
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }
}

// =============================================================================
// NULL Pointer Handling Tests
// =============================================================================

#[test]
fn test_null_data_is_an_empty_input() {
    for (_, entry) in ENTRY_POINTS {
        unsafe {
            assert_eq!(entry(ptr::null(), 0), FMTPROBE_PROCESSED);
            assert_eq!(entry(ptr::null(), 4096), FMTPROBE_PROCESSED);
        }
    }
}

#[test]
fn test_run_with_null_data() {
    let result = unsafe {
        fmtprobe_run_with(
            FMTPROBE_TARGET_ONE_ARG,
            FMTPROBE_OUTPUT_BUFFER,
            FMTPROBE_ALLOCATION_ISOLATED,
            ptr::null(),
            8,
        )
    };
    assert_eq!(result, FMTPROBE_PROCESSED);
    assert!(last_error().is_none());
}

// =============================================================================
// Return Code Tests
// =============================================================================

#[test]
fn test_scenario_a_is_processed() {
    let result = unsafe { fmtprobe_one_arg(SCENARIO_A.as_ptr(), SCENARIO_A.len()) };
    assert_eq!(result, FMTPROBE_PROCESSED);
}

#[test]
fn test_seed_corpus_is_processed_by_every_entry_point() {
    for (target, entry) in ENTRY_POINTS {
        for seed in seed_corpus(target) {
            let result = unsafe { entry(seed.data.as_ptr(), seed.data.len()) };
            assert_eq!(result, FMTPROBE_PROCESSED, "{} seed {}", target, seed.name);
        }
    }
}

#[test]
fn test_rejected_templates_are_processed() {
    let inputs = [
        InputBuilder::one_arg(Scalar::I32(42)).template(b"{"),
        InputBuilder::one_arg(Scalar::I32(42)).template(b"{:.3}"),
        InputBuilder::one_arg(Scalar::Bool(true)).template(b"{:c}"),
        InputBuilder::one_arg(Scalar::F64(1.5)).template(b"{:99999999999}"),
    ];
    for data in &inputs {
        let result = unsafe { fmtprobe_one_arg(data.as_ptr(), data.len()) };
        assert_eq!(result, FMTPROBE_PROCESSED);
        assert!(last_error().is_none());
    }
}

#[test]
fn test_every_mode_combination() {
    let data = InputBuilder::duration(Scalar::I64(-90), Multiplier::Milli)
        .map(|b| b.template(b"{:%H:%M:%S}"))
        .unwrap();
    for output in [FMTPROBE_OUTPUT_BUFFER, FMTPROBE_OUTPUT_STRING] {
        for allocation in [FMTPROBE_ALLOCATION_ISOLATED, FMTPROBE_ALLOCATION_IN_PLACE] {
            let result = unsafe {
                fmtprobe_run_with(
                    FMTPROBE_TARGET_DURATION,
                    output,
                    allocation,
                    data.as_ptr(),
                    data.len(),
                )
            };
            assert_eq!(result, FMTPROBE_PROCESSED);
        }
    }
}

// =============================================================================
// Selector Code Validation Tests
// =============================================================================

#[test]
fn test_unknown_target_code() {
    let result = unsafe {
        fmtprobe_run_with(
            5,
            FMTPROBE_OUTPUT_BUFFER,
            FMTPROBE_ALLOCATION_ISOLATED,
            SCENARIO_A.as_ptr(),
            SCENARIO_A.len(),
        )
    };
    assert_eq!(result, FMTPROBE_ERR_INVALID_ARG);
    assert_eq!(last_error().as_deref(), Some("Unknown target code 5"));
}

#[test]
fn test_unknown_output_code() {
    let result = unsafe {
        fmtprobe_run_with(
            FMTPROBE_TARGET_ONE_ARG,
            -7,
            FMTPROBE_ALLOCATION_ISOLATED,
            SCENARIO_A.as_ptr(),
            SCENARIO_A.len(),
        )
    };
    assert_eq!(result, FMTPROBE_ERR_INVALID_ARG);
    assert_eq!(last_error().as_deref(), Some("Unknown output target code -7"));
}

#[test]
fn test_unknown_allocation_code() {
    let result = unsafe {
        fmtprobe_run_with(
            FMTPROBE_TARGET_ONE_ARG,
            FMTPROBE_OUTPUT_STRING,
            2,
            SCENARIO_A.as_ptr(),
            SCENARIO_A.len(),
        )
    };
    assert_eq!(result, FMTPROBE_ERR_INVALID_ARG);
    assert_eq!(last_error().as_deref(), Some("Unknown allocation code 2"));
}

#[test]
fn test_success_clears_previous_error() {
    unsafe {
        fmtprobe_run_with(9, 0, 0, ptr::null(), 0);
        assert!(last_error().is_some());

        fmtprobe_one_arg(SCENARIO_A.as_ptr(), SCENARIO_A.len());
        assert!(last_error().is_none());
    }
}

#[test]
fn test_clear_error() {
    unsafe {
        fmtprobe_run_with(0, 0, 9, ptr::null(), 0);
    }
    assert!(last_error().is_some());
    fmtprobe_clear_error();
    assert!(last_error().is_none());
}

// =============================================================================
// Adversarial Input Tests
// =============================================================================

#[test]
fn test_every_header_byte_pair() {
    let mut data = vec![0u8; 2 + 16 + 16];
    data.extend_from_slice(b"{:>10}{}");
    for selectors in 0..=255u8 {
        for scale in [0u8, 1, 6, 15, 16, 255] {
            data[0] = selectors;
            data[1] = scale;
            for (_, entry) in ENTRY_POINTS {
                let result = unsafe { entry(data.as_ptr(), data.len()) };
                assert_eq!(result, FMTPROBE_PROCESSED);
            }
        }
    }
}

#[test]
fn test_large_template() {
    let mut template = Vec::new();
    for _ in 0..10_000 {
        template.extend_from_slice(b"{:*^8x}");
    }
    let data = InputBuilder::one_arg(Scalar::U16(0xbeef)).template(&template);
    let result = unsafe { fmtprobe_one_arg(data.as_ptr(), data.len()) };
    assert_eq!(result, FMTPROBE_PROCESSED);
}

#[test]
fn test_version_is_not_empty() {
    let version = unsafe { CStr::from_ptr(fmtprobe_get_version()) };
    assert!(!version.to_bytes().is_empty());
}
