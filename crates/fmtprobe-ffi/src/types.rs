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

//! FFI status and selector codes.

use fmtprobe_core::{Allocation, OutputTarget, Target};
use std::os::raw::c_int;

// =============================================================================
// Status Codes
// =============================================================================

/// Every input was consumed. Returned for skipped and rejected inputs too.
pub const FMTPROBE_PROCESSED: c_int = 0;
/// A target, output or allocation code was out of range.
pub const FMTPROBE_ERR_INVALID_ARG: c_int = -1;

// =============================================================================
// Selector Codes
// =============================================================================

pub const FMTPROBE_TARGET_ONE_ARG: c_int = 0;
pub const FMTPROBE_TARGET_TWO_ARGS: c_int = 1;
pub const FMTPROBE_TARGET_NAMED_ARG: c_int = 2;
pub const FMTPROBE_TARGET_DURATION: c_int = 3;
pub const FMTPROBE_TARGET_DURATION_SWEEP: c_int = 4;

pub const FMTPROBE_OUTPUT_BUFFER: c_int = 0;
pub const FMTPROBE_OUTPUT_STRING: c_int = 1;

pub const FMTPROBE_ALLOCATION_ISOLATED: c_int = 0;
pub const FMTPROBE_ALLOCATION_IN_PLACE: c_int = 1;

pub(crate) fn target_from_code(code: c_int) -> Option<Target> {
    match code {
        FMTPROBE_TARGET_ONE_ARG => Some(Target::OneArg),
        FMTPROBE_TARGET_TWO_ARGS => Some(Target::TwoArgs),
        FMTPROBE_TARGET_NAMED_ARG => Some(Target::NamedArg),
        FMTPROBE_TARGET_DURATION => Some(Target::Duration),
        FMTPROBE_TARGET_DURATION_SWEEP => Some(Target::DurationSweep),
        _ => None,
    }
}

pub(crate) fn output_from_code(code: c_int) -> Option<OutputTarget> {
    match code {
        FMTPROBE_OUTPUT_BUFFER => Some(OutputTarget::Buffer),
        FMTPROBE_OUTPUT_STRING => Some(OutputTarget::String),
        _ => None,
    }
}

pub(crate) fn allocation_from_code(code: c_int) -> Option<Allocation> {
    match code {
        FMTPROBE_ALLOCATION_ISOLATED => Some(Allocation::Isolated),
        FMTPROBE_ALLOCATION_IN_PLACE => Some(Allocation::InPlace),
        _ => None,
    }
}
