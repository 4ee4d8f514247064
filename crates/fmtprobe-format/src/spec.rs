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

//! Format spec grammar.
//!
//! ```text
//! spec        ::= [[fill]align][sign]['#']['0'][width]['.' precision][type]
//! chrono_spec ::= [[fill]align][width]['.' precision][chrono_item*]
//! chrono_item ::= '%' ['E'|'O'] conversion | literal
//! width       ::= integer | '{' [arg_id] '}'
//! precision   ::= integer | '{' [arg_id] '}'
//! ```

use crate::error::{FormatError, FormatErrorKind, FormatResult};
use crate::scan::Session;

/// Presentation types accepted in a standard spec.
const TYPE_CHARS: &[u8] = b"aAbBcdeEfFgGosxX";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sign {
    Minus,
    Plus,
    Space,
}

/// A parsed standard spec with dynamic sizes already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Spec {
    pub fill: char,
    pub align: Option<Align>,
    pub sign: Option<Sign>,
    pub alternate: bool,
    pub zero: bool,
    pub width: usize,
    pub precision: Option<usize>,
    pub ty: Option<u8>,
    /// Template offset of the spec, for error reporting.
    pub offset: usize,
}

impl Default for Spec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: None,
            sign: None,
            alternate: false,
            zero: false,
            width: 0,
            precision: None,
            ty: None,
            offset: 0,
        }
    }
}

impl Spec {
    pub(crate) fn error(&self, kind: FormatErrorKind) -> FormatError {
        FormatError::new(kind, self.offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChronoItem {
    /// Template byte range copied verbatim.
    Literal(usize, usize),
    /// A `%` conversion and the offset of its `%`.
    Conversion(u8, usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChronoSpec {
    pub fill: char,
    pub align: Option<Align>,
    pub width: usize,
    pub precision: Option<usize>,
    pub items: Vec<ChronoItem>,
    pub offset: usize,
}

impl ChronoSpec {
    pub(crate) fn error(&self, kind: FormatErrorKind) -> FormatError {
        FormatError::new(kind, self.offset)
    }
}

fn align_of(b: u8) -> Option<Align> {
    match b {
        b'<' => Some(Align::Left),
        b'>' => Some(Align::Right),
        b'^' => Some(Align::Center),
        _ => None,
    }
}

impl<'t, 'a, 'c> Session<'t, 'a, 'c> {
    fn fill_align(&mut self) -> FormatResult<(char, Option<Align>)> {
        if let Some((c, len)) = self.sc.peek_char().filter(|&(c, _)| c != '}') {
            if let Some(align) = self.sc.peek_at(len).and_then(align_of) {
                if c == '{' {
                    return Err(FormatError::new(
                        FormatErrorKind::InvalidFormatSpec,
                        self.sc.pos(),
                    ));
                }
                self.sc.advance(len + 1);
                return Ok((c, Some(align)));
            }
        }
        if let Some(align) = self.sc.peek().and_then(align_of) {
            self.sc.bump();
            return Ok((' ', Some(align)));
        }
        Ok((' ', None))
    }

    fn width(&mut self) -> FormatResult<usize> {
        let offset = self.sc.pos();
        let width = match self.sc.peek() {
            Some(b'0'..=b'9') => self.sc.integer()?,
            Some(b'{') => self.dynamic_size()?,
            _ => return Ok(0),
        };
        if width > self.limits.max_width {
            return Err(FormatError::new(FormatErrorKind::LimitExceeded, offset));
        }
        Ok(width)
    }

    fn precision(&mut self) -> FormatResult<Option<usize>> {
        if !self.sc.eat(b'.') {
            return Ok(None);
        }
        let offset = self.sc.pos();
        let precision = match self.sc.peek() {
            Some(b'0'..=b'9') => self.sc.integer()?,
            Some(b'{') => self.dynamic_size()?,
            None => {
                return Err(FormatError::new(FormatErrorKind::UnmatchedOpenBrace, offset))
            }
            Some(_) => {
                return Err(FormatError::new(FormatErrorKind::MissingPrecision, offset))
            }
        };
        if precision > self.limits.max_precision {
            return Err(FormatError::new(FormatErrorKind::LimitExceeded, offset));
        }
        Ok(Some(precision))
    }

    /// Parse a standard spec. The cursor is just past the `:`; on success
    /// it is just past the closing `}`.
    pub(crate) fn std_spec(&mut self) -> FormatResult<Spec> {
        let offset = self.sc.pos();
        let (fill, align) = self.fill_align()?;

        let sign = match self.sc.peek() {
            Some(b'+') => Some(Sign::Plus),
            Some(b'-') => Some(Sign::Minus),
            Some(b' ') => Some(Sign::Space),
            _ => None,
        };
        if sign.is_some() {
            self.sc.bump();
        }
        let alternate = self.sc.eat(b'#');
        let zero = self.sc.eat(b'0');
        let width = self.width()?;
        let precision = self.precision()?;

        let ty = match self.sc.peek() {
            Some(b'}') | None => None,
            Some(b) if TYPE_CHARS.contains(&b) => {
                self.sc.bump();
                Some(b)
            }
            Some(_) => {
                return Err(FormatError::new(
                    FormatErrorKind::InvalidTypeSpec,
                    self.sc.pos(),
                ))
            }
        };

        if !self.sc.eat(b'}') {
            return Err(self.sc.unclosed(FormatErrorKind::InvalidFormatSpec));
        }

        Ok(Spec {
            fill,
            align,
            sign,
            alternate,
            zero,
            width,
            precision,
            ty,
            offset,
        })
    }

    /// Parse a chrono spec. The cursor is on the `:` or `}` following the
    /// argument id; on success it is just past the closing `}`.
    pub(crate) fn chrono_spec(&mut self) -> FormatResult<ChronoSpec> {
        let offset = self.sc.pos();
        let mut spec = ChronoSpec {
            fill: ' ',
            align: None,
            width: 0,
            precision: None,
            items: Vec::new(),
            offset,
        };
        if self.sc.eat(b'}') {
            return Ok(spec);
        }
        self.sc.bump();

        let (fill, align) = self.fill_align()?;
        spec.fill = fill;
        spec.align = align;
        spec.width = self.width()?;
        spec.precision = self.precision()?;

        let mut literal_start = self.sc.pos();
        loop {
            match self.sc.peek() {
                None => {
                    return Err(FormatError::new(
                        FormatErrorKind::UnmatchedOpenBrace,
                        self.sc.pos(),
                    ))
                }
                Some(b'}') => {
                    if literal_start < self.sc.pos() {
                        spec.items.push(ChronoItem::Literal(literal_start, self.sc.pos()));
                    }
                    self.sc.bump();
                    return Ok(spec);
                }
                Some(b'{') => {
                    return Err(FormatError::new(
                        FormatErrorKind::InvalidFormatSpec,
                        self.sc.pos(),
                    ))
                }
                Some(b'%') => {
                    let percent = self.sc.pos();
                    if literal_start < percent {
                        spec.items.push(ChronoItem::Literal(literal_start, percent));
                    }
                    self.sc.bump();
                    if matches!(self.sc.peek(), Some(b'E') | Some(b'O')) {
                        self.sc.bump();
                    }
                    match self.sc.peek() {
                        None => {
                            return Err(FormatError::new(
                                FormatErrorKind::UnmatchedOpenBrace,
                                self.sc.pos(),
                            ))
                        }
                        Some(conv) => {
                            spec.items.push(ChronoItem::Conversion(conv, percent));
                            self.sc.bump();
                        }
                    }
                    literal_start = self.sc.pos();
                }
                Some(_) => self.sc.bump(),
            }
        }
    }
}
