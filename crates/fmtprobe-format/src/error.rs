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

//! Error types for template formatting.
//!
//! Every error the engine reports is a structured rejection of the template
//! or of the template/argument combination. Nothing in this crate reports
//! a failure by panicking.

use std::fmt;
use thiserror::Error;

/// The kind of rejection that occurred while formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatErrorKind {
    /// A `{` without a matching `}`.
    UnmatchedOpenBrace,
    /// A `}` that is neither escaped nor closing a field.
    UnmatchedCloseBrace,
    /// Malformed argument id inside a replacement field.
    InvalidArgumentId,
    /// Argument index or name does not refer to a supplied argument.
    ArgumentNotFound,
    /// Manual indexing after automatic indexing was used.
    CannotSwitchToManual,
    /// Automatic indexing after manual indexing was used.
    CannotSwitchToAutomatic,
    /// Malformed format spec (bad fill, trailing garbage, ...).
    InvalidFormatSpec,
    /// Presentation type not valid for the argument.
    InvalidTypeSpec,
    /// `.` not followed by a precision.
    MissingPrecision,
    /// Precision given for an argument that does not take one.
    PrecisionNotAllowed,
    /// Sign, `#` or `0` given for a non-numeric presentation.
    SignNotAllowed,
    /// Integer in the template exceeds the engine's numeric range.
    NumberTooBig,
    /// Width, precision or output size exceeds the configured [`Limits`](crate::Limits).
    LimitExceeded,
    /// Dynamic width or precision argument is not an integer.
    WidthNotInteger,
    /// Dynamic width or precision argument is negative.
    NegativeWidth,
    /// Integer cannot be presented as a character.
    InvalidChar,
    /// Unknown or misplaced `%` conversion in a chrono spec.
    InvalidChronoSpec,
    /// Value cannot be represented by the requested conversion.
    ValueOutOfRange,
    /// Template is not valid UTF-8 where a string output was requested.
    InvalidUtf8,
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnmatchedOpenBrace => "missing '}' in format string",
            Self::UnmatchedCloseBrace => "unmatched '}' in format string",
            Self::InvalidArgumentId => "invalid argument id",
            Self::ArgumentNotFound => "argument not found",
            Self::CannotSwitchToManual => {
                "cannot switch from automatic to manual argument indexing"
            }
            Self::CannotSwitchToAutomatic => {
                "cannot switch from manual to automatic argument indexing"
            }
            Self::InvalidFormatSpec => "invalid format specifier",
            Self::InvalidTypeSpec => "invalid type specifier",
            Self::MissingPrecision => "missing precision specifier",
            Self::PrecisionNotAllowed => "precision not allowed for this argument type",
            Self::SignNotAllowed => "format specifier requires numeric argument",
            Self::NumberTooBig => "number is too big",
            Self::LimitExceeded => "formatting limit exceeded",
            Self::WidthNotInteger => "width/precision is not integer",
            Self::NegativeWidth => "negative width/precision",
            Self::InvalidChar => "invalid character value",
            Self::InvalidChronoSpec => "invalid chrono format",
            Self::ValueOutOfRange => "value out of range",
            Self::InvalidUtf8 => "invalid UTF-8 in format string",
        };
        f.write_str(text)
    }
}

/// A rejection reported by the engine, with the template byte offset at
/// which it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct FormatError {
    /// What went wrong.
    pub kind: FormatErrorKind,
    /// Byte offset into the template.
    pub offset: usize,
}

impl FormatError {
    /// Create a new error.
    pub fn new(kind: FormatErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// Result alias used throughout the engine.
pub type FormatResult<T> = Result<T, FormatError>;
