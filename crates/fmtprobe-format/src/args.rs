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

//! Argument lists passed alongside a template.

use crate::value::Value;

/// Positional and named arguments for one formatting call.
///
/// Named arguments are also addressable by their position, in the order
/// they were added relative to positional ones. Names are raw bytes: a
/// template can only ever reference identifier-shaped names, but callers
/// are free to register anything.
#[derive(Debug, Clone, Default)]
pub struct Args<'a> {
    values: Vec<Value>,
    names: Vec<(&'a [u8], usize)>,
}

impl<'a> Args<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn with(mut self, value: Value) -> Self {
        self.push(value);
        self
    }

    /// Append a named argument.
    pub fn with_named(mut self, name: &'a [u8], value: Value) -> Self {
        self.push_named(name, value);
        self
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn push_named(&mut self, name: &'a [u8], value: Value) {
        self.names.push((name, self.values.len()));
        self.values.push(value);
    }

    /// Argument at `index`, named or not.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// First argument registered under `name`.
    pub fn find(&self, name: &[u8]) -> Option<&Value> {
        self.names
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|&(_, index)| self.values.get(index))
    }

    /// Registered names, in the order they were added.
    pub fn names(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.names.iter().map(|&(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
