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

//! Input construction: the inverse of [`Target::decode`](crate::Target::decode).
//!
//! Used to write seed corpora and to build test inputs without
//! hand-assembling byte offsets.

use crate::repr::{Representation, Scalar};
use crate::scale::Multiplier;
use crate::target::{Target, CALENDAR_SELECTOR, SLOT_WIDTH};

/// Longest argument name the nibble encoding can express.
pub const MAX_NAME_LEN: usize = 15;

/// Builder for a raw fuzz input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuilder {
    bytes: Vec<u8>,
}

impl InputBuilder {
    /// Start an input with the two header bytes.
    pub fn new(selectors: u8, scale: u8) -> Self {
        Self {
            bytes: vec![selectors, scale],
        }
    }

    pub fn one_arg(value: Scalar) -> Self {
        Self::new(value.representation().selector(), 0).value(&value)
    }

    pub fn calendar(unix_seconds: i64) -> Self {
        Self::new(CALENDAR_SELECTOR, 0).raw(&unix_seconds.to_be_bytes())
    }

    pub fn two_args(first: Scalar, second: Scalar) -> Self {
        let selectors =
            first.representation().selector() | (second.representation().selector() << 4);
        Self::new(selectors, 0).slot(&first).slot(&second)
    }

    /// `None` if `name` is empty or longer than [`MAX_NAME_LEN`].
    pub fn named(value: Scalar, name: &[u8]) -> Option<Self> {
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return None;
        }
        let selectors = value.representation().selector() | ((name.len() as u8) << 4);
        Some(Self::new(selectors, 0).value(&value).raw(name))
    }

    /// `None` for boolean counts and reserved multipliers.
    pub fn duration(count: Scalar, scale: Multiplier) -> Option<Self> {
        if !count.representation().is_duration_count() {
            return None;
        }
        let selector = scale.selector()?;
        Some(Self::new(count.representation().selector(), selector).slot(&count))
    }

    /// `None` for boolean counts.
    pub fn sweep(count: Scalar) -> Option<Self> {
        if !count.representation().is_duration_count() {
            return None;
        }
        Some(Self::new(count.representation().selector(), 0).value(&count))
    }

    /// Append a value at its own width.
    pub fn value(mut self, value: &Scalar) -> Self {
        self.bytes.extend_from_slice(&value.encode());
        self
    }

    /// Append a value zero-padded to [`SLOT_WIDTH`].
    pub fn slot(mut self, value: &Scalar) -> Self {
        let start = self.bytes.len();
        self.bytes.extend_from_slice(&value.encode());
        self.bytes.resize(start + SLOT_WIDTH, 0);
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Append the format string and finish.
    pub fn template(self, template: &[u8]) -> Vec<u8> {
        self.raw(template).finish()
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// A named seed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub name: String,
    pub data: Vec<u8>,
}

impl Seed {
    fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// A representative value of each type, exercising sign and magnitude.
fn sample(repr: Representation) -> Scalar {
    match repr {
        Representation::Bool => Scalar::Bool(true),
        Representation::I8 => Scalar::I8(-42),
        Representation::I16 => Scalar::I16(-1234),
        Representation::I32 => Scalar::I32(42),
        Representation::I64 => Scalar::I64(i64::MIN),
        Representation::U8 => Scalar::U8(200),
        Representation::U16 => Scalar::U16(65_535),
        Representation::U32 => Scalar::U32(3_000_000_000),
        Representation::U64 => Scalar::U64(u64::MAX),
        Representation::F32 => Scalar::F32(0.1),
        Representation::F64 => Scalar::F64(-1.5e300),
        Representation::F80 => Scalar::F80(2.5),
    }
}

const SCALAR_TEMPLATES: [&[u8]; 4] = [b"{}", b"{:>10}", b"{:+#x}", b"{:.3e}"];
const DURATION_TEMPLATES: [&[u8]; 3] = [b"{}", b"{:%H:%M:%S}", b"{:>12%Q %q}"];

/// Seed inputs for `target`: every type (and scale, for durations) with a
/// few templates each. All of them decode.
pub fn seed_corpus(target: Target) -> Vec<Seed> {
    let mut seeds = Vec::new();
    match target {
        Target::OneArg => {
            for repr in Representation::ALL {
                for (i, t) in SCALAR_TEMPLATES.iter().enumerate() {
                    let data = InputBuilder::one_arg(sample(repr)).template(t);
                    seeds.push(Seed::new(format!("{repr}-{i}"), data));
                }
            }
            for (i, t) in [&b"{}"[..], &b"{:%a %d %b %Y %T %Z}"[..]].iter().enumerate() {
                let data = InputBuilder::calendar(951_782_400).template(t);
                seeds.push(Seed::new(format!("calendar-{i}"), data));
            }
        }
        Target::TwoArgs => {
            for first in Representation::ALL {
                let second = Representation::ALL[(first.selector() as usize + 3) % 12];
                let data = InputBuilder::two_args(sample(first), sample(second))
                    .template(b"{1}:{0:>8}");
                seeds.push(Seed::new(format!("{first}-{second}"), data));
            }
        }
        Target::NamedArg => {
            for repr in Representation::ALL {
                if let Some(builder) = InputBuilder::named(sample(repr), b"arg") {
                    seeds.push(Seed::new(format!("{repr}"), builder.template(b"[{arg}]")));
                }
            }
        }
        Target::Duration => {
            for scale in Multiplier::ALL {
                for (i, t) in DURATION_TEMPLATES.iter().enumerate() {
                    if let Some(builder) = InputBuilder::duration(Scalar::I64(3_723), scale) {
                        seeds.push(Seed::new(format!("{scale}-{i}"), builder.template(t)));
                    }
                }
            }
        }
        Target::DurationSweep => {
            for repr in &Representation::ALL[1..] {
                if let Some(builder) = InputBuilder::sweep(sample(*repr)) {
                    seeds.push(Seed::new(format!("{repr}"), builder.template(b"{}")));
                }
            }
        }
    }
    seeds
}
