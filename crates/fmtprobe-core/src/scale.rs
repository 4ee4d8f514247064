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

//! Scale registry: selector bytes to decimal duration periods.

use std::fmt;

use fmtprobe_format::Ratio;

/// A power-of-ten tick period for duration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplier {
    Yocto,
    Zepto,
    Atto,
    Femto,
    Pico,
    Nano,
    Micro,
    Milli,
    Centi,
    Deci,
    Deca,
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
    Zetta,
    Yotta,
}

impl Multiplier {
    /// Enabled multipliers in selector order; selector `n` is `ALL[n - 1]`.
    pub const ALL: [Multiplier; 15] = [
        Multiplier::Atto,
        Multiplier::Femto,
        Multiplier::Pico,
        Multiplier::Nano,
        Multiplier::Micro,
        Multiplier::Milli,
        Multiplier::Centi,
        Multiplier::Deci,
        Multiplier::Deca,
        Multiplier::Kilo,
        Multiplier::Mega,
        Multiplier::Giga,
        Multiplier::Tera,
        Multiplier::Peta,
        Multiplier::Exa,
    ];

    /// Disabled multipliers: 10^±21 and 10^±24 do not fit a 64-bit ratio.
    pub const RESERVED: [Multiplier; 4] = [
        Multiplier::Yocto,
        Multiplier::Zepto,
        Multiplier::Zetta,
        Multiplier::Yotta,
    ];

    /// Look up a selector in `1..=15`.
    pub fn resolve(selector: u8) -> Option<Self> {
        let index = usize::from(selector).checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// The selector of an enabled multiplier; `None` for reserved ones.
    pub fn selector(self) -> Option<u8> {
        Self::ALL
            .iter()
            .position(|&m| m == self)
            .map(|i| i as u8 + 1)
    }

    /// Decimal exponent of the period in seconds.
    pub const fn exponent(self) -> i32 {
        match self {
            Self::Yocto => -24,
            Self::Zepto => -21,
            Self::Atto => -18,
            Self::Femto => -15,
            Self::Pico => -12,
            Self::Nano => -9,
            Self::Micro => -6,
            Self::Milli => -3,
            Self::Centi => -2,
            Self::Deci => -1,
            Self::Deca => 1,
            Self::Kilo => 3,
            Self::Mega => 6,
            Self::Giga => 9,
            Self::Tera => 12,
            Self::Peta => 15,
            Self::Exa => 18,
            Self::Zetta => 21,
            Self::Yotta => 24,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Yocto => "yocto",
            Self::Zepto => "zepto",
            Self::Atto => "atto",
            Self::Femto => "femto",
            Self::Pico => "pico",
            Self::Nano => "nano",
            Self::Micro => "micro",
            Self::Milli => "milli",
            Self::Centi => "centi",
            Self::Deci => "deci",
            Self::Deca => "deca",
            Self::Kilo => "kilo",
            Self::Mega => "mega",
            Self::Giga => "giga",
            Self::Tera => "tera",
            Self::Peta => "peta",
            Self::Exa => "exa",
            Self::Zetta => "zetta",
            Self::Yotta => "yotta",
        }
    }

    /// The period as a ratio of seconds, if it fits in 64 bits.
    pub fn ratio(self) -> Option<Ratio> {
        let exp = self.exponent();
        let power = 10i64.checked_pow(exp.unsigned_abs())?;
        Some(if exp < 0 {
            Ratio::new(1, power)
        } else {
            Ratio::new(power, 1)
        })
    }

    /// `value × 10^exponent`.
    pub fn apply(self, value: f64) -> f64 {
        match self.ratio() {
            Some(r) => value * r.num as f64 / r.den as f64,
            None => value * 10f64.powi(self.exponent()),
        }
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_table() {
        assert_eq!(Multiplier::resolve(0), None);
        assert_eq!(Multiplier::resolve(1), Some(Multiplier::Atto));
        assert_eq!(Multiplier::resolve(6), Some(Multiplier::Milli));
        assert_eq!(Multiplier::resolve(10), Some(Multiplier::Kilo));
        assert_eq!(Multiplier::resolve(15), Some(Multiplier::Exa));
        assert_eq!(Multiplier::resolve(16), None);
        assert_eq!(Multiplier::resolve(255), None);
    }

    #[test]
    fn test_selector_inverse() {
        for selector in 1..=15u8 {
            let m = Multiplier::resolve(selector).unwrap();
            assert_eq!(m.selector(), Some(selector));
        }
        for m in Multiplier::RESERVED {
            assert_eq!(m.selector(), None);
        }
    }

    #[test]
    fn test_exponents_are_increasing() {
        let exps: Vec<i32> = Multiplier::ALL.iter().map(|m| m.exponent()).collect();
        assert_eq!(exps, [-18, -15, -12, -9, -6, -3, -2, -1, 1, 3, 6, 9, 12, 15, 18]);
    }

    #[test]
    fn test_ratios() {
        assert_eq!(Multiplier::Milli.ratio(), Some(Ratio::new(1, 1_000)));
        assert_eq!(Multiplier::Deca.ratio(), Some(Ratio::new(10, 1)));
        assert_eq!(
            Multiplier::Exa.ratio(),
            Some(Ratio::new(1_000_000_000_000_000_000, 1))
        );
    }

    #[test]
    fn test_reserved_have_no_ratio() {
        for m in Multiplier::RESERVED {
            assert_eq!(m.ratio(), None, "{m}");
        }
    }

    #[test]
    fn test_apply() {
        assert_eq!(Multiplier::Milli.apply(1.0), 1e-3);
        assert_eq!(Multiplier::Kilo.apply(1.0), 1e3);
        assert_eq!(Multiplier::Nano.apply(2.0), 2e-9);
    }
}
