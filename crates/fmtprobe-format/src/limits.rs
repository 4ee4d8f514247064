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

//! Resource limits for template formatting.

/// Largest integer the template grammar accepts for widths, precisions and
/// argument indices. Larger literals are rejected as
/// [`NumberTooBig`](crate::FormatErrorKind::NumberTooBig).
pub const MAX_TEMPLATE_INTEGER: u64 = i32::MAX as u64;

/// Configurable limits for formatting.
///
/// Adversarial templates routinely ask for widths in the billions. These
/// limits bound the memory a single call may consume so that a hostile
/// template is rejected instead of exhausting the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum field width, static or dynamic (default: 64K).
    pub max_width: usize,
    /// Maximum precision (default: 4096).
    pub max_precision: usize,
    /// Maximum number of bytes a single call may produce (default: 16MB).
    pub max_output: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_width: 64 * 1024,
            max_precision: 4096,
            max_output: 16 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Limits bounded only by the template grammar itself (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_width: MAX_TEMPLATE_INTEGER as usize,
            max_precision: MAX_TEMPLATE_INTEGER as usize,
            max_output: usize::MAX,
        }
    }
}
