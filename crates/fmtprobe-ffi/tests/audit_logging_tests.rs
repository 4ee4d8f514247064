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

//! Tests for audit logging around FFI calls.

use fmtprobe_ffi::audit::{
    audit_call_failure, audit_call_start, audit_call_success, get_audit_context, sanitize_bytes,
    sanitize_pointer,
};
use fmtprobe_ffi::{fmtprobe_one_arg, fmtprobe_run_with, FMTPROBE_PROCESSED};
use std::ptr;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing for tests.
fn init_tracing() {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_audit_call_lifecycle() {
    init_tracing();

    audit_call_start("test_function", &[("size", "8"), ("data", "[03, 05]")]);
    let ctx = get_audit_context().unwrap();
    assert_eq!(ctx.function, "test_function");
    assert_eq!(ctx.depth, 0);

    audit_call_success("test_function", "formatted", Duration::from_micros(5));
    assert!(get_audit_context().is_none());
}

#[test]
fn test_audit_call_failure_logging() {
    init_tracing();

    audit_call_start("test_function_fail", &[]);
    audit_call_failure(
        "test_function_fail",
        -1,
        "Unknown target code 9",
        Duration::from_micros(2),
    );
    assert!(get_audit_context().is_none());
}

#[test]
fn test_entry_points_leave_no_context_behind() {
    init_tracing();

    let data = [0x03, 0x05, 0x00, 0x00, 0x00, 0x2A, b'{', b'}'];
    unsafe {
        assert_eq!(fmtprobe_one_arg(data.as_ptr(), data.len()), FMTPROBE_PROCESSED);
        assert!(get_audit_context().is_none());

        fmtprobe_run_with(-1, 0, 0, ptr::null(), 0);
        assert!(get_audit_context().is_none());
    }
}

#[test]
fn test_sanitized_previews() {
    assert_eq!(sanitize_pointer(ptr::null::<u8>()), "NULL");
    let long: Vec<u8> = (0..40).collect();
    let preview = sanitize_bytes(&long, 16);
    assert!(preview.ends_with("... (40 bytes total)"));
    assert!(preview.starts_with("[00, 01, 02"));
}
