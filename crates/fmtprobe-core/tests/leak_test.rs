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

//! Rejected and skipped inputs release everything they allocate.
//!
//! Kept in its own test binary: the tracking allocator is process-global,
//! and a single test keeps the count free of other tests' allocations.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use fmtprobe_core::{test_one_input_with, FuzzConfig, Harness, Target};

/// Counts live heap bytes allocated by the current thread.
struct TrackingAllocator;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn adjust(delta: isize) {
    let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            adjust(layout.size() as isize);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        adjust(-(layout.size() as isize));
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            adjust(new_size as isize - layout.size() as isize);
        }
        new_ptr
    }
}

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

fn live_bytes() -> isize {
    LIVE.with(Cell::get)
}

const TEMPLATES: [&[u8]; 16] = [
    b"{",
    b"}",
    b"{:",
    b"{0}{}",
    b"{:99999999999}",
    b"{:70000}",
    b"{:.}",
    b"{:{}}",
    b"{:%Q%q%H%M%S%Y}",
    b"{:.5000f}",
    b"{:c}",
    b"{name}",
    b"{:+#0q}",
    b"\xff\xfe{}",
    b"{:%",
    b"{}{}{}{}",
];

/// Deterministic xorshift stream.
struct Bytes(u64);

impl Bytes {
    fn next(&mut self) -> u8 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 24) as u8
    }
}

fn adversarial_input(rng: &mut Bytes, i: usize) -> Vec<u8> {
    let mut data = vec![rng.next() % 14, rng.next() % 17];
    let field = usize::from(rng.next() % 40);
    data.extend((0..field).map(|_| rng.next()));
    data.extend_from_slice(TEMPLATES[i % TEMPLATES.len()]);
    data
}

#[test]
fn test_ten_thousand_adversarial_inputs_do_not_leak() {
    let harness = Harness::new(FuzzConfig::default());

    let mut rng = Bytes(0x2545_f491_4f6c_dd1d);
    let inputs: Vec<Vec<u8>> = (0..10_000).map(|i| adversarial_input(&mut rng, i)).collect();
    let run_all = || {
        for (i, data) in inputs.iter().enumerate() {
            let target = Target::ALL[i % Target::ALL.len()];
            test_one_input_with(target, data, &harness);
        }
    };

    // the first pass settles one-time state such as log callsite registration
    run_all();
    let baseline = live_bytes();
    run_all();
    assert_eq!(live_bytes(), baseline);
}
