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

//! Floating point presentation.
//!
//! Without a type the shortest round-trip digits are used, in fixed notation
//! for decimal exponents in `-4..16` and exponent notation otherwise. `f32`
//! values keep their own shortest digits rather than those of the widened
//! `f64`.

use super::pad;
use crate::error::{FormatErrorKind, FormatResult};
use crate::spec::{Sign, Spec};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Float {
    F32(f32),
    F64(f64),
}

impl Float {
    fn wide(self) -> f64 {
        match self {
            Float::F32(v) => f64::from(v),
            Float::F64(v) => v,
        }
    }

    /// Shortest round-trip digits of the magnitude in `d.ddde<exp>` form.
    fn shortest_sci(self) -> String {
        match self {
            Float::F32(v) => format!("{:e}", v.abs()),
            Float::F64(v) => format!("{:e}", v.abs()),
        }
    }
}

fn split_exp(s: &str) -> (String, i32) {
    match s.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_string(), exp.parse().unwrap_or(0)),
        None => (s.to_string(), 0),
    }
}

fn exp_suffix(exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("e{}{:02}", sign, exp.unsigned_abs())
}

/// Insert a decimal point if there is none, before any exponent.
fn ensure_point(s: &mut String) {
    if s.contains('.') {
        return;
    }
    match s.find('e') {
        Some(at) => s.insert(at, '.'),
        None => s.push('.'),
    }
}

fn shortest(x: Float, alternate: bool) -> String {
    let (mantissa, exp) = split_exp(&x.shortest_sci());
    let digits: String = mantissa.chars().filter(|&c| c != '.').collect();

    let mut s = if !(-4..16).contains(&exp) {
        let mut s = String::with_capacity(digits.len() + 5);
        s.push_str(&digits[..1]);
        if digits.len() > 1 {
            s.push('.');
            s.push_str(&digits[1..]);
        }
        s.push_str(&exp_suffix(exp));
        s
    } else if exp >= 0 {
        let int_len = exp as usize + 1;
        if digits.len() <= int_len {
            let mut s = digits.clone();
            s.push_str(&"0".repeat(int_len - digits.len()));
            s
        } else {
            format!("{}.{}", &digits[..int_len], &digits[int_len..])
        }
    } else {
        format!("0.{}{}", "0".repeat((-exp - 1) as usize), digits)
    };
    if alternate {
        ensure_point(&mut s);
    }
    s
}

fn fixed(abs: f64, precision: usize, alternate: bool) -> String {
    let mut s = format!("{:.*}", precision, abs);
    if alternate {
        ensure_point(&mut s);
    }
    s
}

fn exponent(abs: f64, precision: usize, alternate: bool) -> String {
    let (mut mantissa, exp) = split_exp(&format!("{:.*e}", precision, abs));
    if alternate {
        ensure_point(&mut mantissa);
    }
    mantissa.push_str(&exp_suffix(exp));
    mantissa
}

fn general(abs: f64, precision: usize, alternate: bool) -> String {
    let p = precision.max(1);
    let (mantissa, exp) = split_exp(&format!("{:.*e}", p - 1, abs));

    let (mut body, suffix) = if exp >= -4 && i64::from(exp) < p as i64 {
        let decimals = (p as i64 - 1 - i64::from(exp)) as usize;
        (format!("{:.*}", decimals, abs), String::new())
    } else {
        (mantissa, exp_suffix(exp))
    };

    if alternate {
        ensure_point(&mut body);
    } else if body.contains('.') {
        let trimmed = body.trim_end_matches('0').trim_end_matches('.').len();
        body.truncate(trimmed);
    }
    body.push_str(&suffix);
    body
}

/// C-style hexadecimal float of a finite magnitude.
fn hex(abs: f64, precision: Option<usize>) -> String {
    if abs == 0.0 {
        return match precision {
            Some(p) if p > 0 => format!("0x0.{}p+0", "0".repeat(p)),
            _ => "0x0p+0".to_string(),
        };
    }

    const MANTISSA_BITS: u32 = 52;
    const MANTISSA_MASK: u64 = (1 << MANTISSA_BITS) - 1;

    let bits = abs.to_bits();
    let biased = ((bits >> MANTISSA_BITS) & 0x7ff) as i32;
    let mut mantissa = bits & MANTISSA_MASK;
    let (mut lead, exp) = if biased == 0 {
        (0u64, -1022)
    } else {
        (1u64, biased - 1023)
    };

    let mut digits = 13usize;
    if let Some(p) = precision.filter(|&p| p < 13) {
        let shift = (13 - p) as u32 * 4;
        let rounded = mantissa + (1u64 << (shift - 1));
        lead += rounded >> MANTISSA_BITS;
        mantissa = (rounded & MANTISSA_MASK) >> shift;
        digits = p;
    }

    let mut frac = if digits == 0 {
        String::new()
    } else {
        format!("{:0width$x}", mantissa, width = digits)
    };
    match precision {
        None => {
            let len = frac.trim_end_matches('0').len();
            frac.truncate(len);
        }
        Some(p) if p > 13 => frac.push_str(&"0".repeat(p - 13)),
        Some(_) => {}
    }

    let mut s = format!("0x{}", lead);
    if !frac.is_empty() {
        s.push('.');
        s.push_str(&frac);
    }
    let sign = if exp < 0 { '-' } else { '+' };
    s.push_str(&format!("p{}{}", sign, exp.unsigned_abs()));
    s
}

fn sign_prefix(negative: bool, sign: Option<Sign>) -> &'static str {
    match (negative, sign) {
        (true, _) => "-",
        (false, Some(Sign::Plus)) => "+",
        (false, Some(Sign::Space)) => " ",
        _ => "",
    }
}

pub(crate) fn render(out: &mut Vec<u8>, x: Float, spec: &Spec) -> FormatResult<()> {
    let value = x.wide();
    let upper = matches!(spec.ty, Some(b'A' | b'E' | b'F' | b'G'));
    if !matches!(
        spec.ty,
        None | Some(b'a' | b'A' | b'e' | b'E' | b'f' | b'F' | b'g' | b'G')
    ) {
        return Err(spec.error(FormatErrorKind::InvalidTypeSpec));
    }
    let prefix = sign_prefix(value.is_sign_negative() && !value.is_nan(), spec.sign);

    if !value.is_finite() {
        let text = match (value.is_nan(), upper) {
            (true, false) => "nan",
            (true, true) => "NAN",
            (false, false) => "inf",
            (false, true) => "INF",
        };
        pad::numeric(out, prefix, text, spec, false);
        return Ok(());
    }

    let abs = value.abs();
    let body = match spec.ty {
        None => match spec.precision {
            None => shortest(x, spec.alternate),
            Some(p) => general(abs, p, spec.alternate),
        },
        Some(b'e' | b'E') => exponent(abs, spec.precision.unwrap_or(6), spec.alternate),
        Some(b'f' | b'F') => fixed(abs, spec.precision.unwrap_or(6), spec.alternate),
        Some(b'g' | b'G') => general(abs, spec.precision.unwrap_or(6), spec.alternate),
        _ => hex(abs, spec.precision),
    };
    let body = if upper {
        body.to_ascii_uppercase()
    } else {
        body
    };

    pad::numeric(out, prefix, &body, spec, true);
    Ok(())
}

/// Plain rendering of a float count: shortest digits, or fixed notation
/// with `precision` decimals.
pub(crate) fn plain(x: Float, precision: Option<usize>) -> String {
    let value = x.wide();
    if value.is_nan() {
        return "nan".to_string();
    }
    let prefix = if value.is_sign_negative() { "-" } else { "" };
    let body = if value.is_infinite() {
        "inf".to_string()
    } else {
        match precision {
            Some(p) => fixed(value.abs(), p, false),
            None => shortest(x, false),
        }
    };
    format!("{}{}", prefix, body)
}
