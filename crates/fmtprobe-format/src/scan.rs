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

//! Template scanning and replacement-field dispatch.
//!
//! A template is an arbitrary byte string. Literal bytes are copied
//! verbatim, `{{` and `}}` are escapes, and everything between a lone `{`
//! and its closing `}` is a replacement field:
//!
//! ```text
//! field     ::= '{' [arg_id] [':' spec] '}'
//! arg_id    ::= integer | identifier
//! ```
//!
//! Scanning never looks past the end of the template slice; reaching the
//! end inside a field is a [`FormatErrorKind::UnmatchedOpenBrace`] rejection.

use crate::args::Args;
use crate::error::{FormatError, FormatErrorKind, FormatResult};
use crate::limits::{Limits, MAX_TEMPLATE_INTEGER};
use crate::render;
use crate::spec::Spec;
use crate::value::Value;
use memchr::memchr2;

/// Byte-level cursor over the template.
pub(crate) struct Scanner<'t> {
    src: &'t [u8],
    pos: usize,
}

impl<'t> Scanner<'t> {
    pub(crate) fn new(src: &'t [u8]) -> Self {
        Self { src, pos: 0 }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.src.get(self.pos + ahead).copied()
    }

    #[inline]
    pub(crate) fn bump(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    pub(crate) fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'t [u8] {
        &self.src[start..end]
    }

    /// Decode the UTF-8 scalar starting at the cursor, without advancing.
    pub(crate) fn peek_char(&self) -> Option<(char, usize)> {
        let end = (self.pos + 4).min(self.src.len());
        let chunk = self.src.get(self.pos..end)?;
        let text = match std::str::from_utf8(chunk) {
            Ok(s) => s,
            Err(e) => std::str::from_utf8(&chunk[..e.valid_up_to()]).ok()?,
        };
        text.chars().next().map(|c| (c, c.len_utf8()))
    }

    /// Parse a non-negative decimal integer bounded by [`MAX_TEMPLATE_INTEGER`].
    pub(crate) fn integer(&mut self) -> FormatResult<usize> {
        let start = self.pos;
        let mut value: u64 = 0;
        while let Some(b @ b'0'..=b'9') = self.peek() {
            value = value * 10 + u64::from(b - b'0');
            if value > MAX_TEMPLATE_INTEGER {
                return Err(FormatError::new(FormatErrorKind::NumberTooBig, start));
            }
            self.bump();
        }
        Ok(value as usize)
    }

    /// Error for a field that was not closed: end of template, or garbage.
    pub(crate) fn unclosed(&self, garbage: FormatErrorKind) -> FormatError {
        match self.peek() {
            None => FormatError::new(FormatErrorKind::UnmatchedOpenBrace, self.pos),
            Some(_) => FormatError::new(garbage, self.pos),
        }
    }
}

/// Reference to an argument from inside a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArgRef<'t> {
    Auto,
    Index(usize),
    Name(&'t [u8]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexingMode {
    Unset,
    Automatic,
    Manual,
}

/// State for a single formatting call.
pub(crate) struct Session<'t, 'a, 'c> {
    pub(crate) sc: Scanner<'t>,
    pub(crate) args: &'c Args<'a>,
    pub(crate) limits: &'c Limits,
    mode: IndexingMode,
    next_auto: usize,
}

impl<'t, 'a, 'c> Session<'t, 'a, 'c> {
    fn new(template: &'t [u8], args: &'c Args<'a>, limits: &'c Limits) -> Self {
        Self {
            sc: Scanner::new(template),
            args,
            limits,
            mode: IndexingMode::Unset,
            next_auto: 0,
        }
    }

    fn run(&mut self, out: &mut Vec<u8>) -> FormatResult<()> {
        let base = out.len();
        let src = self.sc.src;
        loop {
            let rest = &src[self.sc.pos..];
            let Some(i) = memchr2(b'{', b'}', rest) else {
                out.extend_from_slice(rest);
                self.sc.advance(rest.len());
                return self.check_output(out, base);
            };
            out.extend_from_slice(&rest[..i]);
            self.sc.advance(i);
            let at = self.sc.pos();

            if self.sc.peek() == Some(b'}') {
                if self.sc.peek_at(1) == Some(b'}') {
                    out.push(b'}');
                    self.sc.advance(2);
                    continue;
                }
                return Err(FormatError::new(FormatErrorKind::UnmatchedCloseBrace, at));
            }

            if self.sc.peek_at(1) == Some(b'{') {
                out.push(b'{');
                self.sc.advance(2);
                continue;
            }

            self.sc.bump();
            self.replacement_field(out, at)?;
            self.check_output(out, base)?;
        }
    }

    fn check_output(&self, out: &[u8], base: usize) -> FormatResult<()> {
        if out.len() - base > self.limits.max_output {
            return Err(FormatError::new(
                FormatErrorKind::LimitExceeded,
                self.sc.pos(),
            ));
        }
        Ok(())
    }

    /// Parse an argument id; stops before `:`/`}` without consuming them.
    pub(crate) fn arg_ref(&mut self) -> FormatResult<ArgRef<'t>> {
        match self.sc.peek() {
            Some(b'0'..=b'9') => Ok(ArgRef::Index(self.sc.integer()?)),
            Some(b) if b == b'_' || b.is_ascii_alphabetic() => {
                let start = self.sc.pos();
                while matches!(self.sc.peek(), Some(b) if b == b'_' || b.is_ascii_alphanumeric())
                {
                    self.sc.bump();
                }
                Ok(ArgRef::Name(self.sc.slice(start, self.sc.pos())))
            }
            _ => Ok(ArgRef::Auto),
        }
    }

    pub(crate) fn resolve(&mut self, arg: ArgRef<'t>, offset: usize) -> FormatResult<Value> {
        let found = match arg {
            ArgRef::Auto => {
                if self.mode == IndexingMode::Manual {
                    return Err(FormatError::new(
                        FormatErrorKind::CannotSwitchToAutomatic,
                        offset,
                    ));
                }
                self.mode = IndexingMode::Automatic;
                let index = self.next_auto;
                self.next_auto += 1;
                self.args.get(index)
            }
            ArgRef::Index(index) => {
                if self.mode == IndexingMode::Automatic {
                    return Err(FormatError::new(
                        FormatErrorKind::CannotSwitchToManual,
                        offset,
                    ));
                }
                self.mode = IndexingMode::Manual;
                self.args.get(index)
            }
            ArgRef::Name(name) => self.args.find(name),
        };
        found
            .copied()
            .ok_or_else(|| FormatError::new(FormatErrorKind::ArgumentNotFound, offset))
    }

    /// Resolve a `{...}` dynamic width or precision. The cursor is on the `{`.
    pub(crate) fn dynamic_size(&mut self) -> FormatResult<usize> {
        let offset = self.sc.pos();
        self.sc.bump();
        let arg = self.arg_ref()?;
        if !self.sc.eat(b'}') {
            return Err(self.sc.unclosed(FormatErrorKind::InvalidFormatSpec));
        }
        let value = self.resolve(arg, offset)?;
        let size = value
            .as_dynamic_size()
            .ok_or_else(|| FormatError::new(FormatErrorKind::WidthNotInteger, offset))?;
        if size < 0 {
            return Err(FormatError::new(FormatErrorKind::NegativeWidth, offset));
        }
        if size > MAX_TEMPLATE_INTEGER as i128 {
            return Err(FormatError::new(FormatErrorKind::NumberTooBig, offset));
        }
        Ok(size as usize)
    }

    /// The cursor is just past the opening `{`.
    fn replacement_field(&mut self, out: &mut Vec<u8>, open: usize) -> FormatResult<()> {
        let arg = self.arg_ref()?;
        let value = match self.sc.peek() {
            Some(b':') | Some(b'}') => self.resolve(arg, open)?,
            None => {
                return Err(FormatError::new(
                    FormatErrorKind::UnmatchedOpenBrace,
                    self.sc.pos(),
                ))
            }
            Some(_) => {
                return Err(FormatError::new(
                    FormatErrorKind::InvalidArgumentId,
                    self.sc.pos(),
                ))
            }
        };

        match value {
            Value::Duration(d) => {
                let spec = self.chrono_spec()?;
                render::chrono::duration(out, &d, &spec, self.sc.src)
            }
            Value::Time(t) => {
                let spec = self.chrono_spec()?;
                render::chrono::time(out, &t, &spec, self.sc.src)
            }
            other => {
                let spec = if self.sc.eat(b'}') {
                    Spec::default()
                } else {
                    self.sc.bump();
                    self.std_spec()?
                };
                render::scalar(out, &other, &spec)
            }
        }
    }
}

/// Formats templates under a fixed set of [`Limits`].
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    limits: Limits,
}

impl Formatter {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Append the formatted template to `out`.
    ///
    /// On rejection `out` may hold a partial result; callers that care
    /// should truncate it back.
    pub fn format_to(&self, out: &mut Vec<u8>, template: &[u8], args: &Args<'_>) -> FormatResult<()> {
        Session::new(template, args, &self.limits).run(out)
    }

    /// Format into a fresh `String`. The template must be valid UTF-8.
    pub fn format(&self, template: &[u8], args: &Args<'_>) -> FormatResult<String> {
        if let Err(e) = std::str::from_utf8(template) {
            return Err(FormatError::new(FormatErrorKind::InvalidUtf8, e.valid_up_to()));
        }
        let mut out = Vec::with_capacity(template.len());
        self.format_to(&mut out, template, args)?;
        String::from_utf8(out).map_err(|e| {
            FormatError::new(FormatErrorKind::InvalidUtf8, e.utf8_error().valid_up_to())
        })
    }
}

/// [`Formatter::format_to`] with default limits.
pub fn format_to(out: &mut Vec<u8>, template: &[u8], args: &Args<'_>) -> FormatResult<()> {
    Formatter::default().format_to(out, template, args)
}

/// [`Formatter::format`] with default limits.
pub fn format(template: &[u8], args: &Args<'_>) -> FormatResult<String> {
    Formatter::default().format(template, args)
}
