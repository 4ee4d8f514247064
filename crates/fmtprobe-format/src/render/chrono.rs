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

//! Duration and calendar time presentation.
//!
//! An empty spec prints a duration as its count followed by the unit
//! suffix (`42ms`, `3[1/7]s`) and a calendar time as `%Y-%m-%d %H:%M:%S`.
//! Chrono output is left-aligned unless the spec says otherwise.

use std::fmt::Write;

use super::float::{self, Float};
use super::pad;
use crate::error::{FormatError, FormatErrorKind, FormatResult};
use crate::spec::{Align, ChronoItem, ChronoSpec};
use crate::value::{CalendarTime, Count, Duration};

/// Calendar conversions, each rendered by chrono's strftime.
const CALENDAR_CONVERSIONS: &[u8] = b"YyCmdeHIMSpjaAbhBuwFDRTZzGgVUWnt%";

/// Decimal digits printed after the seconds for a period denominator.
fn subsecond_digits(den: u128) -> usize {
    let mut d = den;
    let mut digits = 0;
    while d > 1 && d % 10 == 0 {
        d /= 10;
        digits += 1;
    }
    if d == 1 {
        digits
    } else {
        6
    }
}

/// A duration broken into whole seconds and a fixed-point fraction.
struct Clock {
    negative: bool,
    secs: u128,
    frac: u128,
    frac_digits: usize,
}

impl Clock {
    fn of(d: &Duration) -> Result<Self, FormatErrorKind> {
        if d.ratio.num <= 0 || d.ratio.den <= 0 {
            return Err(FormatErrorKind::ValueOutOfRange);
        }
        let num = i128::from(d.ratio.num);
        let den = d.ratio.den as u128;
        let frac_digits = subsecond_digits(den);

        match d.count {
            Count::Int(count) => {
                let total = count
                    .checked_mul(num)
                    .ok_or(FormatErrorKind::ValueOutOfRange)?;
                let magnitude = total.unsigned_abs();
                let rem = magnitude % den;
                let scale = 10u128.pow(frac_digits as u32);
                let frac = if scale == den { rem } else { rem * scale / den };
                Ok(Self {
                    negative: total < 0,
                    secs: magnitude / den,
                    frac,
                    frac_digits,
                })
            }
            Count::F32(v) => Self::of_float(f64::from(v), d.ratio.num, d.ratio.den, frac_digits),
            Count::F64(v) => Self::of_float(v, d.ratio.num, d.ratio.den, frac_digits),
        }
    }

    fn of_float(v: f64, num: i64, den: i64, frac_digits: usize) -> Result<Self, FormatErrorKind> {
        let secs = v * num as f64 / den as f64;
        if !secs.is_finite() {
            return Err(FormatErrorKind::ValueOutOfRange);
        }
        let abs = secs.abs();
        let whole = abs.trunc();
        if whole >= u128::MAX as f64 {
            return Err(FormatErrorKind::ValueOutOfRange);
        }
        let scale = 10f64.powi(frac_digits as i32);
        let frac = ((abs - whole) * scale).floor().clamp(0.0, scale - 1.0);
        Ok(Self {
            negative: secs < 0.0,
            secs: whole as u128,
            frac: frac as u128,
            frac_digits,
        })
    }

    fn hours(&self) -> u128 {
        self.secs / 3_600 % 24
    }

    fn minutes(&self) -> u128 {
        self.secs / 60 % 60
    }

    fn seconds(&self) -> String {
        let mut s = format!("{:02}", self.secs % 60);
        if self.frac_digits > 0 {
            s.push_str(&format!(".{:0width$}", self.frac, width = self.frac_digits));
        }
        s
    }

    fn hours12(&self) -> u128 {
        match self.hours() % 12 {
            0 => 12,
            h => h,
        }
    }

    fn meridiem(&self) -> &'static str {
        if self.hours() < 12 {
            "AM"
        } else {
            "PM"
        }
    }
}

fn count_text(count: Count, precision: Option<usize>) -> String {
    match count {
        Count::Int(v) => v.to_string(),
        Count::F32(v) => float::plain(Float::F32(v), precision),
        Count::F64(v) => float::plain(Float::F64(v), precision),
    }
}

pub(crate) fn duration(
    out: &mut Vec<u8>,
    d: &Duration,
    spec: &ChronoSpec,
    src: &[u8],
) -> FormatResult<()> {
    if spec.precision.is_some() && matches!(d.count, Count::Int(_)) {
        return Err(spec.error(FormatErrorKind::PrecisionNotAllowed));
    }

    let mut body = Vec::new();
    if spec.items.is_empty() {
        body.extend_from_slice(count_text(d.count, spec.precision).as_bytes());
        body.extend_from_slice(d.ratio.unit_text().as_bytes());
    } else {
        let mut clock: Option<Clock> = None;
        let mut signed = false;
        for item in &spec.items {
            let (conv, offset) = match *item {
                ChronoItem::Literal(start, end) => {
                    body.extend_from_slice(&src[start..end]);
                    continue;
                }
                ChronoItem::Conversion(conv, offset) => (conv, offset),
            };
            let error = |kind: FormatErrorKind| FormatError::new(kind, offset);
            let text = match conv {
                b'n' => "\n".to_string(),
                b't' => "\t".to_string(),
                b'%' => "%".to_string(),
                b'Q' => count_text(d.count, spec.precision),
                b'q' => d.ratio.unit_text(),
                b'H' | b'M' | b'S' | b'I' | b'p' | b'R' | b'T' | b'j' => {
                    let c = match clock.take() {
                        Some(c) => c,
                        None => Clock::of(d).map_err(error)?,
                    };
                    if c.negative && !signed {
                        body.push(b'-');
                        signed = true;
                    }
                    let text = match conv {
                        b'H' => format!("{:02}", c.hours()),
                        b'M' => format!("{:02}", c.minutes()),
                        b'S' => c.seconds(),
                        b'I' => format!("{:02}", c.hours12()),
                        b'p' => c.meridiem().to_string(),
                        b'R' => format!("{:02}:{:02}", c.hours(), c.minutes()),
                        b'T' => format!("{:02}:{:02}:{}", c.hours(), c.minutes(), c.seconds()),
                        _ => (c.secs / 86_400).to_string(),
                    };
                    clock = Some(c);
                    text
                }
                _ => return Err(error(FormatErrorKind::InvalidChronoSpec)),
            };
            body.extend_from_slice(text.as_bytes());
        }
    }

    pad::aligned(
        out,
        &body,
        spec.fill,
        spec.align.unwrap_or(Align::Left),
        spec.width,
    );
    Ok(())
}

fn conversion(body: &mut String, t: &CalendarTime, conv: u8) -> Result<(), FormatErrorKind> {
    if !CALENDAR_CONVERSIONS.contains(&conv) {
        return Err(FormatErrorKind::InvalidChronoSpec);
    }
    let pattern = format!("%{}", char::from(conv));
    write!(body, "{}", t.datetime().format(&pattern))
        .map_err(|_| FormatErrorKind::ValueOutOfRange)
}

pub(crate) fn time(
    out: &mut Vec<u8>,
    t: &CalendarTime,
    spec: &ChronoSpec,
    src: &[u8],
) -> FormatResult<()> {
    if spec.precision.is_some() {
        return Err(spec.error(FormatErrorKind::PrecisionNotAllowed));
    }

    let mut body = Vec::new();
    if spec.items.is_empty() {
        let mut text = String::new();
        conversion(&mut text, t, b'F').map_err(|kind| spec.error(kind))?;
        text.push(' ');
        conversion(&mut text, t, b'T').map_err(|kind| spec.error(kind))?;
        body.extend_from_slice(text.as_bytes());
    }
    for item in &spec.items {
        match *item {
            ChronoItem::Literal(start, end) => body.extend_from_slice(&src[start..end]),
            ChronoItem::Conversion(conv, offset) => {
                let mut text = String::new();
                conversion(&mut text, t, conv)
                    .map_err(|kind| FormatError::new(kind, offset))?;
                body.extend_from_slice(text.as_bytes());
            }
        }
    }

    pad::aligned(
        out,
        &body,
        spec.fill,
        spec.align.unwrap_or(Align::Left),
        spec.width,
    );
    Ok(())
}
