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

//! Isolated copies of the format string and argument name.
//!
//! A byte range copied into an allocation of exactly its own length
//! puts the first byte past its end outside any live allocation, where an
//! address sanitizer reports the overread. A view into the larger fuzz
//! input would let the same overread land on valid memory.

use memchr::memchr;

use crate::config::Allocation;

/// Whether an isolated copy carries a trailing NUL byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    None,
    /// One extra `0` byte after the copied range, for consumers that
    /// treat the template as a NUL-terminated string.
    Nul,
}

/// An exactly sized, read-only copy of a byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isolated {
    buf: Box<[u8]>,
    len: usize,
    termination: Termination,
}

impl Isolated {
    /// Copy `bytes` into a fresh allocation of `bytes.len()` bytes, plus
    /// one for [`Termination::Nul`].
    pub fn copy(bytes: &[u8], termination: Termination) -> Self {
        let size = match termination {
            Termination::None => bytes.len(),
            Termination::Nul => bytes.len() + 1,
        };
        let mut buf = Vec::with_capacity(size);
        buf.extend_from_slice(bytes);
        if termination == Termination::Nul {
            buf.push(0);
        }
        Self {
            buf: buf.into_boxed_slice(),
            len: bytes.len(),
            termination,
        }
    }

    /// Size of the underlying allocation in bytes.
    pub fn allocated_len(&self) -> usize {
        self.buf.len()
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// The copied range, without any terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The bytes up to the first NUL: what a NUL-terminated-string
    /// consumer sees. Equal to [`as_bytes`](Self::as_bytes) when the range
    /// holds no NUL.
    pub fn as_terminated(&self) -> &[u8] {
        let bytes = self.as_bytes();
        match memchr(0, bytes) {
            Some(end) => &bytes[..end],
            None => bytes,
        }
    }
}

/// A format string or argument name as handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatInput<'a> {
    /// A view into the raw input.
    InPlace(&'a [u8]),
    Isolated(Isolated),
}

impl<'a> FormatInput<'a> {
    /// Prepare `bytes` for the engine.
    ///
    /// A terminated range is always copied, since a terminator cannot be
    /// added in place.
    pub fn prepare(bytes: &'a [u8], allocation: Allocation, termination: Termination) -> Self {
        match (allocation, termination) {
            (Allocation::InPlace, Termination::None) => FormatInput::InPlace(bytes),
            _ => FormatInput::Isolated(Isolated::copy(bytes, termination)),
        }
    }

    /// The bytes the engine sees.
    pub fn bytes(&self) -> &[u8] {
        match self {
            FormatInput::InPlace(bytes) => bytes,
            FormatInput::Isolated(iso) if iso.termination() == Termination::Nul => {
                iso.as_terminated()
            }
            FormatInput::Isolated(iso) => iso.as_bytes(),
        }
    }

    pub fn is_isolated(&self) -> bool {
        matches!(self, FormatInput::Isolated(_))
    }

    /// Size of the private allocation; `None` for an in-place view.
    pub fn allocated_len(&self) -> Option<usize> {
        match self {
            FormatInput::InPlace(_) => None,
            FormatInput::Isolated(iso) => Some(iso.allocated_len()),
        }
    }
}
