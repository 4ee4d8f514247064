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

//! Integer, boolean and character presentation.

use super::pad;
use crate::error::{FormatErrorKind, FormatResult};
use crate::spec::{Align, Sign, Spec};

fn sign_prefix(negative: bool, sign: Option<Sign>) -> String {
    match (negative, sign) {
        (true, _) => "-".to_string(),
        (false, Some(Sign::Plus)) => "+".to_string(),
        (false, Some(Sign::Space)) => " ".to_string(),
        _ => String::new(),
    }
}

pub(crate) fn render(out: &mut Vec<u8>, value: i128, spec: &Spec) -> FormatResult<()> {
    if spec.precision.is_some() {
        return Err(spec.error(FormatErrorKind::PrecisionNotAllowed));
    }
    if spec.ty == Some(b'c') {
        return character(out, value, spec);
    }

    let magnitude = value.unsigned_abs();
    let mut prefix = sign_prefix(value < 0, spec.sign);
    let digits = match spec.ty {
        None | Some(b'd') => magnitude.to_string(),
        Some(b'b') => {
            if spec.alternate {
                prefix.push_str("0b");
            }
            format!("{:b}", magnitude)
        }
        Some(b'B') => {
            if spec.alternate {
                prefix.push_str("0B");
            }
            format!("{:b}", magnitude)
        }
        Some(b'o') => {
            if spec.alternate && magnitude != 0 {
                prefix.push('0');
            }
            format!("{:o}", magnitude)
        }
        Some(b'x') => {
            if spec.alternate {
                prefix.push_str("0x");
            }
            format!("{:x}", magnitude)
        }
        Some(b'X') => {
            if spec.alternate {
                prefix.push_str("0X");
            }
            format!("{:X}", magnitude)
        }
        Some(_) => return Err(spec.error(FormatErrorKind::InvalidTypeSpec)),
    };

    pad::numeric(out, &prefix, &digits, spec, true);
    Ok(())
}

fn character(out: &mut Vec<u8>, value: i128, spec: &Spec) -> FormatResult<()> {
    if spec.sign.is_some() || spec.alternate || spec.zero {
        return Err(spec.error(FormatErrorKind::InvalidFormatSpec));
    }
    let c = u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| spec.error(FormatErrorKind::InvalidChar))?;
    let mut buf = [0u8; 4];
    pad::aligned(
        out,
        c.encode_utf8(&mut buf).as_bytes(),
        spec.fill,
        spec.align.unwrap_or(Align::Left),
        spec.width,
    );
    Ok(())
}

pub(crate) fn boolean(out: &mut Vec<u8>, value: bool, spec: &Spec) -> FormatResult<()> {
    match spec.ty {
        None | Some(b's') => {
            if spec.sign.is_some() || spec.alternate || spec.zero {
                return Err(spec.error(FormatErrorKind::SignNotAllowed));
            }
            let text = if value { "true" } else { "false" };
            let text = match spec.precision {
                Some(p) => &text[..p.min(text.len())],
                None => text,
            };
            pad::aligned(
                out,
                text.as_bytes(),
                spec.fill,
                spec.align.unwrap_or(Align::Left),
                spec.width,
            );
            Ok(())
        }
        Some(b'c') => Err(spec.error(FormatErrorKind::InvalidTypeSpec)),
        Some(_) => render(out, i128::from(value), spec),
    }
}
