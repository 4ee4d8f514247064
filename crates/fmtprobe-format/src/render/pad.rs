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

//! Fill and alignment.

use crate::spec::{Align, Spec};

fn push_fill(out: &mut Vec<u8>, fill: char, count: usize) {
    let mut buf = [0u8; 4];
    let encoded = fill.encode_utf8(&mut buf).as_bytes();
    out.reserve(encoded.len() * count);
    for _ in 0..count {
        out.extend_from_slice(encoded);
    }
}

/// Display width of `body`, counted in code points. Invalid UTF-8
/// sequences count as one column each.
fn columns(body: &[u8]) -> usize {
    match std::str::from_utf8(body) {
        Ok(s) => s.chars().count(),
        Err(_) => String::from_utf8_lossy(body).chars().count(),
    }
}

/// Write `body` padded to `width` columns with `fill`.
pub(crate) fn aligned(out: &mut Vec<u8>, body: &[u8], fill: char, align: Align, width: usize) {
    let pad = width.saturating_sub(columns(body));
    let (left, right) = match align {
        Align::Left => (0, pad),
        Align::Right => (pad, 0),
        Align::Center => (pad / 2, pad - pad / 2),
    };
    push_fill(out, fill, left);
    out.extend_from_slice(body);
    push_fill(out, fill, right);
}

/// Write a number made of an ASCII `prefix` (sign, base prefix) and `digits`.
///
/// The `0` flag pads with zeros between prefix and digits, but only when no
/// explicit alignment was given and `zero_ok` holds (not for inf/nan).
pub(crate) fn numeric(out: &mut Vec<u8>, prefix: &str, digits: &str, spec: &Spec, zero_ok: bool) {
    if spec.zero && zero_ok && spec.align.is_none() {
        let len = prefix.len() + digits.chars().count();
        out.extend_from_slice(prefix.as_bytes());
        push_fill(out, '0', spec.width.saturating_sub(len));
        out.extend_from_slice(digits.as_bytes());
        return;
    }
    let mut body = String::with_capacity(prefix.len() + digits.len());
    body.push_str(prefix);
    body.push_str(digits);
    aligned(
        out,
        body.as_bytes(),
        spec.fill,
        spec.align.unwrap_or(Align::Right),
        spec.width,
    );
}
