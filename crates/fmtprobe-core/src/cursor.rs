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

//! Bounds-checked reader over the raw fuzz input.

use crate::error::{DecodeError, DecodeResult};

/// Sequential reader over an immutable byte slice.
///
/// Every read is checked against the end of the input; a short read fails
/// with [`DecodeError::InsufficientInput`] and leaves the cursor unmoved.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the input, read or not.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The unconsumed suffix. Does not advance.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    fn short(&self, needed: usize) -> DecodeError {
        DecodeError::InsufficientInput {
            needed,
            available: self.data.len() - self.pos,
        }
    }

    /// Read the next `n` bytes.
    pub fn take(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        let rest = self.remaining();
        if rest.len() < n {
            return Err(self.short(n));
        }
        self.pos += n;
        Ok(&rest[..n])
    }

    pub fn take_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let bytes = self.take(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    pub fn take_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Advance `n` bytes without reading them.
    pub fn skip(&mut self, n: usize) -> DecodeResult<()> {
        self.take(n).map(|_| ())
    }

    /// Succeed only if strictly more than `n` bytes remain, so that a field
    /// of width `n` is followed by at least one more byte.
    pub fn require_more_than(&self, n: usize) -> DecodeResult<()> {
        if self.remaining().len() > n {
            Ok(())
        } else {
            Err(self.short(n + 1))
        }
    }
}
