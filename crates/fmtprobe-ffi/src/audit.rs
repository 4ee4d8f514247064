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

//! Audit logging for FFI entry points.
//!
//! Every `fmtprobe_*` entry point records its start, its outcome and its
//! duration through `tracing` under the `fmtprobe_ffi::audit` target.
//!
//! # Log Levels
//!
//! - **DEBUG**: Sanitized parameters and the harness outcome
//! - **TRACE**: Per-call start and completion (fuzz drivers call these
//!   millions of times)
//! - **ERROR**: Argument errors
//!
//! # Security
//!
//! Pointer addresses are masked and input data is limited to a short hex
//! preview.

use std::os::raw::c_int;
use std::time::Duration;
use tracing::{debug, error, trace};

// =============================================================================
// Audit Context
// =============================================================================

/// The FFI call in progress on this thread.
#[derive(Debug, Clone)]
pub struct AuditContext {
    /// The current function being called
    pub function: &'static str,
    /// Nested call depth
    pub depth: usize,
    /// Thread ID for correlation
    pub thread_id: std::thread::ThreadId,
}

thread_local! {
    static AUDIT_CONTEXT: std::cell::RefCell<Option<AuditContext>> = const { std::cell::RefCell::new(None) };
}

/// Get the current audit context.
///
/// Returns `None` if no FFI call is currently in progress on this thread.
pub fn get_audit_context() -> Option<AuditContext> {
    AUDIT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

fn set_audit_context(context: AuditContext) {
    AUDIT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(context);
    });
}

fn clear_audit_context() {
    AUDIT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

// =============================================================================
// Parameter Sanitization
// =============================================================================

/// Sanitize a pointer for logging without exposing its full address.
pub fn sanitize_pointer<T>(ptr: *const T) -> String {
    if ptr.is_null() {
        "NULL".to_string()
    } else {
        format!("PTR@{:016x}", ptr as usize & 0xFFFF)
    }
}

/// Hex preview of the first `preview_len` bytes.
pub fn sanitize_bytes(data: &[u8], preview_len: usize) -> String {
    if data.is_empty() {
        "[]".to_string()
    } else if data.len() <= preview_len {
        format!("{:02x?}", data)
    } else {
        format!(
            "{:02x?}... ({} bytes total)",
            &data[..preview_len],
            data.len()
        )
    }
}

// =============================================================================
// Audit Logging Functions
// =============================================================================

/// Log the start of an FFI call and enter its audit context.
pub fn audit_call_start(function: &'static str, params: &[(&str, &str)]) {
    let thread_id = std::thread::current().id();
    let depth = get_audit_context().map(|ctx| ctx.depth + 1).unwrap_or(0);

    set_audit_context(AuditContext {
        function,
        depth,
        thread_id,
    });

    trace!(
        target: "fmtprobe_ffi::audit",
        function = function,
        thread_id = ?thread_id,
        depth = depth,
        "FFI call started"
    );

    if !params.is_empty() {
        debug!(
            target: "fmtprobe_ffi::audit",
            function = function,
            ?params,
            "FFI call parameters"
        );
    }
}

/// Log a completed call together with the harness outcome label
/// (`formatted`, `rejected`, `skipped` or `swept`).
pub fn audit_call_success(function: &'static str, outcome: &str, duration: Duration) {
    let duration_us = duration.as_secs_f64() * 1_000_000.0;

    debug!(
        target: "fmtprobe_ffi::audit",
        function = function,
        outcome = outcome,
        duration_us = duration_us,
        status = "success",
        "FFI call completed"
    );

    clear_audit_context();
}

/// Log a call that failed with `error_code`.
pub fn audit_call_failure(
    function: &'static str,
    error_code: c_int,
    error_message: &str,
    duration: Duration,
) {
    let duration_us = duration.as_secs_f64() * 1_000_000.0;

    error!(
        target: "fmtprobe_ffi::audit",
        function = function,
        error_code = error_code,
        error_message = error_message,
        duration_us = duration_us,
        status = "failure",
        "FFI call failed"
    );

    clear_audit_context();
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_pointer() {
        assert_eq!(sanitize_pointer(std::ptr::null::<u8>()), "NULL");

        let value = 42;
        let ptr = &value as *const i32;
        let sanitized = sanitize_pointer(ptr);
        assert!(sanitized.starts_with("PTR@"));
        assert_ne!(sanitized, format!("PTR@{:016x}", ptr as usize));
    }

    #[test]
    fn test_sanitize_bytes() {
        assert_eq!(sanitize_bytes(&[], 4), "[]");
        assert_eq!(sanitize_bytes(&[0x01, 0x02], 4), "[01, 02]");
        assert_eq!(
            sanitize_bytes(&[0x01, 0x02, 0x03, 0x04, 0x05], 3),
            "[01, 02, 03]... (5 bytes total)"
        );
    }

    #[test]
    fn test_nested_context_depth() {
        assert!(get_audit_context().is_none());

        audit_call_start("outer", &[]);
        audit_call_start("inner", &[]);
        let ctx = get_audit_context().unwrap();
        assert_eq!(ctx.function, "inner");
        assert_eq!(ctx.depth, 1);

        audit_call_success("inner", "formatted", Duration::from_micros(3));
        assert!(get_audit_context().is_none());
    }

    #[test]
    fn test_failure_clears_context() {
        audit_call_start("fmtprobe_run_with", &[("target", "9")]);
        audit_call_failure("fmtprobe_run_with", -1, "bad target", Duration::ZERO);
        assert!(get_audit_context().is_none());
    }
}
