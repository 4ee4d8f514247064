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

//! Type registry: selector bytes to scalar representations.
//!
//! The selector table is part of the corpus format. Reordering it would
//! silently change the meaning of every recorded input, so entries are
//! append-only.

use std::fmt;

use fmtprobe_format::{Count, Value};

use crate::error::{DecodeError, DecodeResult};
use crate::extended::{self, EXTENDED_BYTES};

/// A scalar representation the harness can decode and format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    /// x87 extended precision, stored in a 16-byte field.
    F80,
}

impl Representation {
    /// Every representation, indexed by selector.
    pub const ALL: [Representation; 12] = [
        Representation::Bool,
        Representation::I8,
        Representation::I16,
        Representation::I32,
        Representation::I64,
        Representation::U8,
        Representation::U16,
        Representation::U32,
        Representation::U64,
        Representation::F32,
        Representation::F64,
        Representation::F80,
    ];

    /// Look up a selector; `None` for 12 and above.
    pub fn resolve(selector: u8) -> Option<Self> {
        Self::ALL.get(usize::from(selector)).copied()
    }

    pub fn selector(self) -> u8 {
        self as u8
    }

    /// Encoded width of the value field in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::Bool | Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
            Self::F80 => 16,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::F80 => "f80",
        }
    }

    /// Whether values of this representation can be a duration count.
    /// Booleans cannot.
    pub fn is_duration_count(self) -> bool {
        self != Self::Bool
    }

    /// Decode a value from the first `width()` bytes of `field`, big-endian.
    ///
    /// A boolean is `true` when its first byte is nonzero.
    pub fn decode(self, field: &[u8]) -> DecodeResult<Scalar> {
        let width = self.width();
        let bytes = field.get(..width).ok_or(DecodeError::InsufficientInput {
            needed: width,
            available: field.len(),
        })?;

        fn array<const N: usize>(bytes: &[u8]) -> [u8; N] {
            let mut out = [0u8; N];
            out.copy_from_slice(&bytes[..N]);
            out
        }

        Ok(match self {
            Self::Bool => Scalar::Bool(bytes[0] != 0),
            Self::I8 => Scalar::I8(i8::from_be_bytes(array(bytes))),
            Self::I16 => Scalar::I16(i16::from_be_bytes(array(bytes))),
            Self::I32 => Scalar::I32(i32::from_be_bytes(array(bytes))),
            Self::I64 => Scalar::I64(i64::from_be_bytes(array(bytes))),
            Self::U8 => Scalar::U8(bytes[0]),
            Self::U16 => Scalar::U16(u16::from_be_bytes(array(bytes))),
            Self::U32 => Scalar::U32(u32::from_be_bytes(array(bytes))),
            Self::U64 => Scalar::U64(u64::from_be_bytes(array(bytes))),
            Self::F32 => Scalar::F32(f32::from_be_bytes(array(bytes))),
            Self::F64 => Scalar::F64(f64::from_be_bytes(array(bytes))),
            Self::F80 => Scalar::F80(extended::to_f64(array::<EXTENDED_BYTES>(bytes))),
        })
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
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
    /// An extended value, already rounded to the nearest `f64`.
    F80(f64),
}

impl Scalar {
    pub fn representation(&self) -> Representation {
        match self {
            Scalar::Bool(_) => Representation::Bool,
            Scalar::I8(_) => Representation::I8,
            Scalar::I16(_) => Representation::I16,
            Scalar::I32(_) => Representation::I32,
            Scalar::I64(_) => Representation::I64,
            Scalar::U8(_) => Representation::U8,
            Scalar::U16(_) => Representation::U16,
            Scalar::U32(_) => Representation::U32,
            Scalar::U64(_) => Representation::U64,
            Scalar::F32(_) => Representation::F32,
            Scalar::F64(_) => Representation::F64,
            Scalar::F80(_) => Representation::F80,
        }
    }

    /// The engine argument for this scalar. Extended values are passed as
    /// `f64`.
    pub fn to_value(&self) -> Value {
        match *self {
            Scalar::Bool(v) => Value::Bool(v),
            Scalar::I8(v) => Value::I8(v),
            Scalar::I16(v) => Value::I16(v),
            Scalar::I32(v) => Value::I32(v),
            Scalar::I64(v) => Value::I64(v),
            Scalar::U8(v) => Value::U8(v),
            Scalar::U16(v) => Value::U16(v),
            Scalar::U32(v) => Value::U32(v),
            Scalar::U64(v) => Value::U64(v),
            Scalar::F32(v) => Value::F32(v),
            Scalar::F64(v) | Scalar::F80(v) => Value::F64(v),
        }
    }

    /// The scalar as a duration tick count; `None` for booleans.
    pub fn to_count(&self) -> Option<Count> {
        let count = match *self {
            Scalar::Bool(_) => return None,
            Scalar::I8(v) => Count::Int(i128::from(v)),
            Scalar::I16(v) => Count::Int(i128::from(v)),
            Scalar::I32(v) => Count::Int(i128::from(v)),
            Scalar::I64(v) => Count::Int(i128::from(v)),
            Scalar::U8(v) => Count::Int(i128::from(v)),
            Scalar::U16(v) => Count::Int(i128::from(v)),
            Scalar::U32(v) => Count::Int(i128::from(v)),
            Scalar::U64(v) => Count::Int(i128::from(v)),
            Scalar::F32(v) => Count::F32(v),
            Scalar::F64(v) | Scalar::F80(v) => Count::F64(v),
        };
        Some(count)
    }

    pub fn is_negative(&self) -> bool {
        self.to_count().is_some_and(|c| c.is_negative())
    }

    /// Big-endian encoding, `representation().width()` bytes long.
    pub fn encode(&self) -> Vec<u8> {
        match *self {
            Scalar::Bool(v) => vec![u8::from(v)],
            Scalar::I8(v) => v.to_be_bytes().to_vec(),
            Scalar::I16(v) => v.to_be_bytes().to_vec(),
            Scalar::I32(v) => v.to_be_bytes().to_vec(),
            Scalar::I64(v) => v.to_be_bytes().to_vec(),
            Scalar::U8(v) => vec![v],
            Scalar::U16(v) => v.to_be_bytes().to_vec(),
            Scalar::U32(v) => v.to_be_bytes().to_vec(),
            Scalar::U64(v) => v.to_be_bytes().to_vec(),
            Scalar::F32(v) => v.to_be_bytes().to_vec(),
            Scalar::F64(v) => v.to_be_bytes().to_vec(),
            Scalar::F80(v) => {
                let mut field = extended::from_f64(v).to_vec();
                field.resize(Representation::F80.width(), 0);
                field
            }
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::I8(v) => write!(f, "{v}"),
            Scalar::I16(v) => write!(f, "{v}"),
            Scalar::I32(v) => write!(f, "{v}"),
            Scalar::I64(v) => write!(f, "{v}"),
            Scalar::U8(v) => write!(f, "{v}"),
            Scalar::U16(v) => write!(f, "{v}"),
            Scalar::U32(v) => write!(f, "{v}"),
            Scalar::U64(v) => write!(f, "{v}"),
            Scalar::F32(v) => write!(f, "{v:?}"),
            Scalar::F64(v) | Scalar::F80(v) => write!(f, "{v:?}"),
        }
    }
}
