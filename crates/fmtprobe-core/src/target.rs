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

//! Entry points: raw input to decoded plan to engine call.
//!
//! Every target reads the same two-byte header. Byte 0 holds the type
//! selector (or two nibble selectors), byte 1 the scale selector; targets
//! that do not scale ignore byte 1. Values follow the header at fixed
//! offsets, and whatever remains is the format string.
//!
//! | Target | Layout after the header | Byte 0 |
//! |---|---|---|
//! | `one-arg` | value, template | type (12 = calendar time) |
//! | `two-args` | slot, slot, template | `t1 \| t2 << 4` |
//! | `named-arg` | value, name, template | `type \| name_len << 4` |
//! | `duration` | slot, template | type (byte 1 = scale) |
//! | `duration-sweep` | value, template | type |
//!
//! A slot is [`SLOT_WIDTH`] bytes whatever the type, so that later fields
//! start at type-independent offsets.

use std::fmt;
use std::str::FromStr;

use fmtprobe_format::CalendarTime;
use tracing::trace;

use crate::config::ConfigError;
use crate::cursor::ByteCursor;
use crate::engine::Engine;
use crate::error::{DecodeError, DecodeResult};
use crate::harness::{Argument, Call, Harness, Outcome};
use crate::isolate::{FormatInput, Isolated, Termination};
use crate::repr::{Representation, Scalar};
use crate::scale::Multiplier;

/// Length of the shared selector header.
pub const HEADER_LEN: usize = 2;
/// Width of a fixed value slot: the widest representation.
pub const SLOT_WIDTH: usize = 16;
/// One-argument type selector for a calendar time.
pub const CALENDAR_SELECTOR: u8 = 12;
/// Width of the calendar time field: big-endian `i64` Unix seconds.
pub const CALENDAR_WIDTH: usize = 8;

/// An argument shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    OneArg,
    TwoArgs,
    NamedArg,
    Duration,
    DurationSweep,
}

impl Target {
    pub const ALL: [Target; 5] = [
        Target::OneArg,
        Target::TwoArgs,
        Target::NamedArg,
        Target::Duration,
        Target::DurationSweep,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Target::OneArg => "one-arg",
            Target::TwoArgs => "two-args",
            Target::NamedArg => "named-arg",
            Target::Duration => "duration",
            Target::DurationSweep => "duration-sweep",
        }
    }

    /// Decode `data` into a plan without calling the engine.
    pub fn decode(self, data: &[u8]) -> DecodeResult<Plan<'_>> {
        let mut cursor = ByteCursor::new(data);
        let [selectors, scale] = cursor.take_array::<HEADER_LEN>()?;

        let plan = match self {
            Target::OneArg if selectors == CALENDAR_SELECTOR => {
                cursor.require_more_than(CALENDAR_WIDTH)?;
                let secs = i64::from_be_bytes(cursor.take_array()?);
                let time = CalendarTime::from_unix_seconds(secs)
                    .ok_or(DecodeError::TimeOutOfRange { secs })?;
                Plan::single(
                    Call::Positional(vec![Argument::Calendar(time)]),
                    cursor.remaining(),
                )
            }
            Target::OneArg => {
                let value = read_value(&mut cursor, resolve_type(selectors)?)?;
                Plan::single(
                    Call::Positional(vec![Argument::Scalar(value)]),
                    cursor.remaining(),
                )
            }
            Target::TwoArgs => {
                let first = resolve_type(selectors & 0x0f)?;
                let second = resolve_type(selectors >> 4)?;
                cursor.require_more_than(2 * SLOT_WIDTH)?;
                let a = read_slot(&mut cursor, first)?;
                let b = read_slot(&mut cursor, second)?;
                Plan::single(
                    Call::Positional(vec![Argument::Scalar(a), Argument::Scalar(b)]),
                    cursor.remaining(),
                )
            }
            Target::NamedArg => {
                let repr = resolve_type(selectors & 0x0f)?;
                let len = usize::from(selectors >> 4);
                let value = read_value(&mut cursor, repr)?;
                let available = cursor.remaining().len();
                if len == 0 || len >= available {
                    return Err(DecodeError::NameOutOfRange { len, available });
                }
                let name = cursor.take(len)?;
                Plan::single(
                    Call::Named {
                        name,
                        value: Argument::Scalar(value),
                    },
                    cursor.remaining(),
                )
            }
            Target::Duration => {
                let repr = resolve_count(selectors)?;
                let scale = Multiplier::resolve(scale).ok_or(DecodeError::unknown_scale(scale))?;
                cursor.require_more_than(SLOT_WIDTH)?;
                let count = read_slot(&mut cursor, repr)?;
                Plan::single(
                    Call::Positional(vec![Argument::Duration { count, scale }]),
                    cursor.remaining(),
                )
            }
            Target::DurationSweep => {
                let count = read_value(&mut cursor, resolve_count(selectors)?)?;
                Plan::Sweep {
                    count,
                    template: cursor.remaining(),
                }
            }
        };
        Ok(plan)
    }

    /// Decode and execute `data`. Never panics on its own account; a panic
    /// can only come from the engine.
    pub fn run<E: Engine>(self, data: &[u8], harness: &Harness<E>) -> Outcome {
        match self.decode(data) {
            Ok(plan) => plan.execute(harness),
            Err(e) => {
                trace!(target: "fmtprobe::target", target_name = self.name(), reason = %e, "input skipped");
                Outcome::Skipped(e)
            }
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Target::ALL
            .into_iter()
            .find(|t| t.name() == key)
            .ok_or_else(|| ConfigError {
                setting: "target",
                value: s.to_string(),
                expected: "one-arg, two-args, named-arg, duration, duration-sweep",
            })
    }
}

fn resolve_type(selector: u8) -> DecodeResult<Representation> {
    Representation::resolve(selector).ok_or(DecodeError::unknown_type(selector))
}

/// Like [`resolve_type`], but booleans count as unknown.
fn resolve_count(selector: u8) -> DecodeResult<Representation> {
    resolve_type(selector)
        .ok()
        .filter(|r| r.is_duration_count())
        .ok_or(DecodeError::unknown_type(selector))
}

/// A value of its own width, which must be followed by at least one byte.
fn read_value(cursor: &mut ByteCursor<'_>, repr: Representation) -> DecodeResult<Scalar> {
    cursor.require_more_than(repr.width())?;
    repr.decode(cursor.take(repr.width())?)
}

fn read_slot(cursor: &mut ByteCursor<'_>, repr: Representation) -> DecodeResult<Scalar> {
    repr.decode(cursor.take(SLOT_WIDTH)?)
}

/// A decoded input, ready to run.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan<'a> {
    /// One engine call. The template, and the argument name of a named
    /// call, each get their own allocation unless the harness runs in place.
    Single { call: Call<'a>, template: &'a [u8] },
    /// One engine call per enabled multiplier, on a NUL-terminated copy of
    /// the template.
    Sweep { count: Scalar, template: &'a [u8] },
}

impl<'a> Plan<'a> {
    fn single(call: Call<'a>, template: &'a [u8]) -> Self {
        Plan::Single { call, template }
    }

    /// The raw format string bytes.
    pub fn template(&self) -> &'a [u8] {
        match self {
            Plan::Single { template, .. } | Plan::Sweep { template, .. } => template,
        }
    }

    pub fn execute<E: Engine>(&self, harness: &Harness<E>) -> Outcome {
        match self {
            Plan::Single { call, template } => {
                let allocation = harness.config().allocation;
                let input = FormatInput::prepare(template, allocation, Termination::None);
                match call {
                    Call::Named { name, value } => {
                        let name = FormatInput::prepare(name, allocation, Termination::None);
                        let call = Call::Named {
                            name: name.bytes(),
                            value: *value,
                        };
                        harness.invoke(&call, input.bytes())
                    }
                    Call::Positional(_) => harness.invoke(call, input.bytes()),
                }
            }
            Plan::Sweep { count, template } => {
                let input = Isolated::copy(template, Termination::Nul);
                let outcomes = Multiplier::ALL
                    .iter()
                    .map(|&scale| {
                        let call = Call::Positional(vec![Argument::Duration {
                            count: *count,
                            scale,
                        }]);
                        harness.invoke(&call, input.as_terminated())
                    })
                    .collect();
                Outcome::Swept(outcomes)
            }
        }
    }
}
