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

//! Rendering of resolved arguments.
//!
//! - [`integer`] - integers, booleans and characters
//! - [`float`] - shortest, fixed, exponent, general and hex floats
//! - [`chrono`] - durations and calendar times
//! - [`pad`] - fill, alignment and zero padding

pub(crate) mod chrono;
pub(crate) mod float;
pub(crate) mod integer;
pub(crate) mod pad;

use crate::error::{FormatErrorKind, FormatResult};
use crate::spec::Spec;
use crate::value::Value;
use float::Float;

/// Render a non-chrono argument under a standard spec.
pub(crate) fn scalar(out: &mut Vec<u8>, value: &Value, spec: &Spec) -> FormatResult<()> {
    match *value {
        Value::Bool(b) => integer::boolean(out, b, spec),
        Value::F32(v) => float::render(out, Float::F32(v), spec),
        Value::F64(v) => float::render(out, Float::F64(v), spec),
        ref other => match other.as_integer() {
            Some(v) => integer::render(out, v, spec),
            None => Err(spec.error(FormatErrorKind::InvalidTypeSpec)),
        },
    }
}
