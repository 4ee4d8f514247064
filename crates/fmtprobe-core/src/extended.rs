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

//! x87 80-bit extended precision conversion.
//!
//! Layout, most significant byte first: one sign bit and a 15-bit biased
//! exponent (2 bytes), then a 64-bit significand with an explicit integer
//! bit (8 bytes).

/// Bytes of an encoded extended value.
pub const EXTENDED_BYTES: usize = 10;

const EXP_BIAS: i32 = 16_383;
const EXP_MAX: u16 = 0x7fff;
const F64_MANTISSA_MASK: u64 = (1 << 52) - 1;

fn signed(negative: bool, bits: u64) -> f64 {
    f64::from_bits(bits | (u64::from(negative) << 63))
}

/// Round an extended value to the nearest `f64` (ties to even).
///
/// Magnitudes above `f64::MAX` become infinite, those below half the
/// smallest subnormal become zero, and NaNs stay NaN.
pub fn to_f64(bytes: [u8; EXTENDED_BYTES]) -> f64 {
    let head = u16::from_be_bytes([bytes[0], bytes[1]]);
    let negative = head & 0x8000 != 0;
    let biased = head & EXP_MAX;
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&bytes[2..]);
    let significand = u64::from_be_bytes(tail);

    if biased == EXP_MAX {
        return if significand << 1 == 0 {
            signed(negative, f64::INFINITY.to_bits())
        } else {
            f64::NAN
        };
    }
    if significand == 0 {
        return signed(negative, 0);
    }

    // exponent of the most significant set bit
    let lz = significand.leading_zeros() as i32;
    let base = if biased == 0 { 1 - EXP_BIAS } else { i32::from(biased) - EXP_BIAS };
    let mut exp = base - lz;
    let normalized = u128::from(significand << lz);

    if exp > 1023 {
        return signed(negative, f64::INFINITY.to_bits());
    }
    if exp < -1075 {
        return signed(negative, 0);
    }

    let shift = if exp >= -1022 { 11 } else { 11 + (-1022 - exp) as u32 };
    let half = 1u128 << (shift - 1);
    let rem = normalized & ((1u128 << shift) - 1);
    let mut mantissa = (normalized >> shift) as u64;
    if rem > half || (rem == half && mantissa & 1 == 1) {
        mantissa += 1;
    }

    if exp < -1022 {
        // subnormal; a carry into bit 52 lands on the smallest normal
        return signed(negative, mantissa);
    }
    if mantissa == 1 << 53 {
        mantissa >>= 1;
        exp += 1;
        if exp > 1023 {
            return signed(negative, f64::INFINITY.to_bits());
        }
    }
    let biased64 = (exp + 1023) as u64;
    signed(negative, (biased64 << 52) | (mantissa & F64_MANTISSA_MASK))
}

/// Widen an `f64` to the extended layout. Exact for every input.
pub fn from_f64(value: f64) -> [u8; EXTENDED_BYTES] {
    let bits = value.to_bits();
    let sign = ((bits >> 63) as u16) << 15;
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & F64_MANTISSA_MASK;

    let (exp, significand) = if biased == 0x7ff {
        let significand = if fraction == 0 {
            1 << 63
        } else {
            (1 << 63) | (1 << 62) | (fraction << 11)
        };
        (EXP_MAX, significand)
    } else if biased == 0 && fraction == 0 {
        (0, 0)
    } else if biased == 0 {
        let lz = fraction.leading_zeros() as i32;
        // fraction * 2^-1074, leading bit at 63 - lz
        let exp = (63 - lz) - 1074 + EXP_BIAS;
        (exp as u16, fraction << lz)
    } else {
        ((biased - 1023 + EXP_BIAS) as u16, (1 << 63) | (fraction << 11))
    };

    let mut out = [0u8; EXTENDED_BYTES];
    out[..2].copy_from_slice(&(sign | exp).to_be_bytes());
    out[2..].copy_from_slice(&significand.to_be_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(head: u16, significand: u64) -> [u8; EXTENDED_BYTES] {
        let mut out = [0u8; EXTENDED_BYTES];
        out[..2].copy_from_slice(&head.to_be_bytes());
        out[2..].copy_from_slice(&significand.to_be_bytes());
        out
    }

    // ==================== Conversion tests ====================

    #[test]
    fn test_one_and_minus_two() {
        assert_eq!(to_f64(ext(0x3fff, 1 << 63)), 1.0);
        assert_eq!(to_f64(ext(0xc000, 1 << 63)), -2.0);
    }

    #[test]
    fn test_special_values() {
        assert_eq!(to_f64(ext(0x7fff, 1 << 63)), f64::INFINITY);
        assert_eq!(to_f64(ext(0xffff, 1 << 63)), f64::NEG_INFINITY);
        assert!(to_f64(ext(0x7fff, 0xc000_0000_0000_0000)).is_nan());
        let neg_zero = to_f64(ext(0x8000, 0));
        assert_eq!(neg_zero, 0.0);
        assert!(neg_zero.is_sign_negative());
    }

    #[test]
    fn test_overflow_and_underflow() {
        assert_eq!(to_f64(ext(0x7ffe, u64::MAX)), f64::INFINITY);
        assert_eq!(to_f64(ext(0x0001, 1 << 63)), 0.0);
    }

    #[test]
    fn test_rounds_to_nearest_even() {
        // 1 + 2^-53 is exactly halfway: rounds down to 1.0
        assert_eq!(to_f64(ext(0x3fff, (1 << 63) | (1 << 10))), 1.0);
        // just above halfway rounds up
        assert_eq!(
            to_f64(ext(0x3fff, (1 << 63) | (1 << 10) | 1)),
            1.0 + f64::EPSILON
        );
    }

    #[test]
    fn test_subnormal_result() {
        let min = f64::from_bits(1);
        assert_eq!(to_f64(from_f64(min)), min);
    }

    #[test]
    fn test_widen_round_trips() {
        for v in [0.0, -0.0, 1.5, -1e300, 2.2250738585072014e-308, f64::MAX, f64::INFINITY] {
            let back = to_f64(from_f64(v));
            assert_eq!(back.to_bits(), v.to_bits(), "{v}");
        }
        assert!(to_f64(from_f64(f64::NAN)).is_nan());
    }
}
