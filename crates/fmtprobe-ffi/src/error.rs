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

//! Error handling for FFI.

use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

thread_local! {
    static LAST_ERROR: std::cell::RefCell<Option<CString>> = const { std::cell::RefCell::new(None) };
}

pub(crate) fn set_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

pub(crate) fn clear_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

pub(crate) fn get_thread_local_error() -> String {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.to_string_lossy().into_owned(),
        None => String::new(),
    })
}

/// Get the last error message for the current thread.
///
/// Returns NULL if the last `fmtprobe_*` call on this thread succeeded.
/// Only argument errors are reported here; inputs the formatting engine
/// rejects are expected and leave no error behind.
///
/// # Lifetime
///
/// The returned pointer is valid until the next `fmtprobe_*` call on this
/// thread. Copy the string immediately if you need to preserve it.
///
/// # Example (C)
///
/// ```c
/// if (fmtprobe_run_with(9, 0, 0, data, size) != FMTPROBE_PROCESSED) {
///     fprintf(stderr, "%s\n", fmtprobe_get_last_error());
/// }
/// ```
#[no_mangle]
pub extern "C" fn fmtprobe_get_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Clear the last error for the current thread.
#[no_mangle]
pub extern "C" fn fmtprobe_clear_error() {
    clear_error();
}
