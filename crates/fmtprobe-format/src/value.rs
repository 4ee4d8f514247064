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

//! Argument values accepted by the engine.

use chrono::{DateTime, SecondsFormat, Utc};

/// A typed argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    /// A count of ticks with a compile-time-like period.
    Duration(Duration),
    /// A broken-down calendar time.
    Time(CalendarTime),
}

impl Value {
    /// The value as a wide integer, for integer-like arguments.
    ///
    /// Booleans are integer-like here (0 or 1) so that integer presentation
    /// types can be applied to them.
    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            Value::Bool(b) => Some(b as i128),
            Value::I8(v) => Some(v as i128),
            Value::I16(v) => Some(v as i128),
            Value::I32(v) => Some(v as i128),
            Value::I64(v) => Some(v as i128),
            Value::U8(v) => Some(v as i128),
            Value::U16(v) => Some(v as i128),
            Value::U32(v) => Some(v as i128),
            Value::U64(v) => Some(v as i128),
            _ => None,
        }
    }

    /// The value as a dynamic width/precision: integers only, booleans excluded.
    pub(crate) fn as_dynamic_size(&self) -> Option<i128> {
        match self {
            Value::Bool(_) => None,
            other => other.as_integer(),
        }
    }

    /// Short kind name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Duration(_) => "duration",
            Value::Time(_) => "time",
        }
    }
}

/// The tick count of a [`Duration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Count {
    /// Any integer count; wide enough for every 64-bit signed or unsigned source.
    Int(i128),
    F32(f32),
    F64(f64),
}

impl Count {
    pub fn is_negative(&self) -> bool {
        match *self {
            Count::Int(v) => v < 0,
            Count::F32(v) => v < 0.0,
            Count::F64(v) => v < 0.0,
        }
    }
}

/// A rational tick period in seconds: `num / den`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    pub num: i64,
    pub den: i64,
}

impl Ratio {
    pub const SECOND: Ratio = Ratio { num: 1, den: 1 };

    pub const fn new(num: i64, den: i64) -> Self {
        Self { num, den }
    }

    /// The unit suffix printed after a duration count, if the period has a
    /// well-known name.
    pub fn suffix(&self) -> Option<&'static str> {
        let suffix = match (self.num, self.den) {
            (1, 1_000_000_000_000_000_000) => "as",
            (1, 1_000_000_000_000_000) => "fs",
            (1, 1_000_000_000_000) => "ps",
            (1, 1_000_000_000) => "ns",
            (1, 1_000_000) => "µs",
            (1, 1_000) => "ms",
            (1, 100) => "cs",
            (1, 10) => "ds",
            (1, 1) => "s",
            (10, 1) => "das",
            (100, 1) => "hs",
            (1_000, 1) => "ks",
            (1_000_000, 1) => "Ms",
            (1_000_000_000, 1) => "Gs",
            (1_000_000_000_000, 1) => "Ts",
            (1_000_000_000_000_000, 1) => "Ps",
            (1_000_000_000_000_000_000, 1) => "Es",
            (60, 1) => "min",
            (3_600, 1) => "h",
            (86_400, 1) => "d",
            _ => return None,
        };
        Some(suffix)
    }

    /// Suffix for any period: the well-known name, or `[num]s` / `[num/den]s`.
    pub fn unit_text(&self) -> String {
        match self.suffix() {
            Some(s) => s.to_string(),
            None if self.den == 1 => format!("[{}]s", self.num),
            None => format!("[{}/{}]s", self.num, self.den),
        }
    }
}

/// A tick count paired with its period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duration {
    pub count: Count,
    pub ratio: Ratio,
}

impl Duration {
    pub fn new(count: Count, ratio: Ratio) -> Self {
        Self { count, ratio }
    }
}

/// A UTC calendar time, whole seconds only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarTime(DateTime<Utc>);

impl CalendarTime {
    /// The time `secs` seconds after 1970-01-01T00:00:00Z, or `None` when
    /// it falls outside the years chrono can represent.
    pub fn from_unix_seconds(secs: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp(secs, 0).map(Self)
    }

    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// RFC 3339 with a `Z` suffix, e.g. `2000-02-29T00:00:00Z`.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}
