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

#![no_main]

//! A duration formatted once per period.
//!
//! Byte 0 selects the count type. The format string is copied with a
//! trailing NUL and cut at its first NUL byte, then used with each of the
//! fifteen periods in turn.

use fmtprobe_core::{test_one_input, Target};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    test_one_input(Target::DurationSweep, data);
});
