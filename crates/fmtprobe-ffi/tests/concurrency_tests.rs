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

//! Concurrency tests for the fmtprobe FFI interface.
//!
//! These tests verify:
//! - Thread-local error storage isolation
//! - Concurrent entry point calls from many threads

use fmtprobe_core::{seed_corpus, Target};
use fmtprobe_ffi::*;
use parking_lot::Mutex;
use std::ffi::CStr;
use std::ptr;
use std::sync::{Arc, Barrier};
use std::thread;

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
// Thread-Local Error Isolation Tests
// =============================================================================

#[test]
fn test_thread_local_error_isolation() {
    let barrier = Arc::new(Barrier::new(2));

    let failing = {
        let barrier = barrier.clone();
        thread::spawn(move || {
            let result = unsafe { fmtprobe_run_with(42, 0, 0, ptr::null(), 0) };
            assert_eq!(result, FMTPROBE_ERR_INVALID_ARG);
            barrier.wait();
            last_error()
        })
    };

    let succeeding = {
        let barrier = barrier.clone();
        thread::spawn(move || {
            barrier.wait();
            let result = unsafe {
                fmtprobe_run_with(0, 0, 0, SCENARIO_A.as_ptr(), SCENARIO_A.len())
            };
            assert_eq!(result, FMTPROBE_PROCESSED);
            last_error()
        })
    };

    assert_eq!(
        failing.join().unwrap().as_deref(),
        Some("Unknown target code 42")
    );
    assert_eq!(succeeding.join().unwrap(), None);
}

#[test]
fn test_each_thread_keeps_its_own_message() {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let messages = messages.clone();
            thread::spawn(move || {
                let code = 100 + i;
                unsafe { fmtprobe_run_with(code, 0, 0, ptr::null(), 0) };
                messages.lock().push((code, last_error()));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let messages = messages.lock();
    assert_eq!(messages.len(), 8);
    for (code, message) in messages.iter() {
        assert_eq!(
            message.as_deref(),
            Some(format!("Unknown target code {}", code).as_str())
        );
    }
}

// =============================================================================
// Concurrent Stress Tests
// =============================================================================

#[test]
fn test_concurrent_seed_replay() {
    let corpus: Arc<Vec<(Target, Vec<u8>)>> = Arc::new(
        Target::ALL
            .iter()
            .flat_map(|&t| seed_corpus(t).into_iter().map(move |s| (t, s.data)))
            .collect(),
    );
    let processed = Arc::new(Mutex::new(0usize));
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let corpus = corpus.clone();
            let processed = processed.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for (target, data) in corpus.iter() {
                    let code = *target as i32;
                    let result = unsafe {
                        fmtprobe_run_with(code, 0, 0, data.as_ptr(), data.len())
                    };
                    assert_eq!(result, FMTPROBE_PROCESSED);
                    *processed.lock() += 1;
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(*processed.lock(), threads * corpus.len());
}
