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

//! The formatting primitive the harness drives.

use fmtprobe_format::{Args, FormatError, Formatter, Limits};

use crate::config::OutputTarget;

/// One formatting call: template plus typed arguments in, bytes out.
///
/// Implementations must report malformed templates as `Err`; a panic is
/// treated as a fault and reaches the fuzzer unchanged.
pub trait Engine {
    fn render(
        &self,
        output: OutputTarget,
        template: &[u8],
        args: &Args<'_>,
    ) -> Result<Vec<u8>, FormatError>;
}

impl<E: Engine + ?Sized> Engine for &E {
    fn render(
        &self,
        output: OutputTarget,
        template: &[u8],
        args: &Args<'_>,
    ) -> Result<Vec<u8>, FormatError> {
        (**self).render(output, template, args)
    }
}

/// The bundled `fmtprobe-format` engine.
#[derive(Debug, Clone, Default)]
pub struct BuiltinEngine {
    formatter: Formatter,
}

impl BuiltinEngine {
    pub fn new(limits: Limits) -> Self {
        Self {
            formatter: Formatter::new(limits),
        }
    }
}

impl Engine for BuiltinEngine {
    fn render(
        &self,
        output: OutputTarget,
        template: &[u8],
        args: &Args<'_>,
    ) -> Result<Vec<u8>, FormatError> {
        match output {
            OutputTarget::Buffer => {
                let mut out = Vec::new();
                self.formatter.format_to(&mut out, template, args)?;
                Ok(out)
            }
            OutputTarget::String => self
                .formatter
                .format(template, args)
                .map(String::into_bytes),
        }
    }
}
