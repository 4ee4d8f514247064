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

//! End-to-end tests for template formatting.

use fmtprobe_format::{
    format, format_to, Args, CalendarTime, Count, Duration, FormatErrorKind, Formatter, Limits,
    Ratio, Value,
};

fn one(template: &str, value: Value) -> Result<String, FormatErrorKind> {
    format(template.as_bytes(), &Args::new().with(value)).map_err(|e| e.kind)
}

// ==================== Integer tests ====================

#[test]
fn test_integer_alignment_and_fill() {
    assert_eq!(one("{:>5}", Value::I32(42)).unwrap(), "   42");
    assert_eq!(one("{:*<6d}", Value::U8(12)).unwrap(), "12****");
    assert_eq!(one("{:^6}", Value::I64(-1)).unwrap(), "  -1  ");
}

#[test]
fn test_integer_sign_and_prefix() {
    assert_eq!(one("{:+}", Value::I8(7)).unwrap(), "+7");
    assert_eq!(one("{: }", Value::I8(7)).unwrap(), " 7");
    assert_eq!(one("{:#x}", Value::U16(255)).unwrap(), "0xff");
    assert_eq!(one("{:#X}", Value::U16(255)).unwrap(), "0XFF");
    assert_eq!(one("{:#b}", Value::U8(5)).unwrap(), "0b101");
    assert_eq!(one("{:#o}", Value::U8(8)).unwrap(), "010");
    assert_eq!(one("{:#o}", Value::U8(0)).unwrap(), "0");
}

#[test]
fn test_integer_zero_padding_follows_prefix() {
    assert_eq!(one("{:08}", Value::I32(-42)).unwrap(), "-0000042");
    assert_eq!(one("{:#06x}", Value::I32(255)).unwrap(), "0x00ff");
}

#[test]
fn test_integer_extremes() {
    assert_eq!(one("{}", Value::I64(i64::MIN)).unwrap(), "-9223372036854775808");
    assert_eq!(one("{}", Value::U64(u64::MAX)).unwrap(), "18446744073709551615");
    assert_eq!(one("{:x}", Value::I8(i8::MIN)).unwrap(), "-80");
}

#[test]
fn test_integer_rejections() {
    assert_eq!(one("{:.2}", Value::I32(1)), Err(FormatErrorKind::PrecisionNotAllowed));
    assert_eq!(one("{:s}", Value::I32(1)), Err(FormatErrorKind::InvalidTypeSpec));
    assert_eq!(one("{:e}", Value::I32(1)), Err(FormatErrorKind::InvalidTypeSpec));
    assert_eq!(one("{:q}", Value::I32(1)), Err(FormatErrorKind::InvalidTypeSpec));
}

#[test]
fn test_character_presentation() {
    assert_eq!(one("{:c}", Value::I32(65)).unwrap(), "A");
    assert_eq!(one("{:3c}|", Value::I32(65)).unwrap(), "A  |");
    assert_eq!(one("{:c}", Value::U32(0x11_0000)), Err(FormatErrorKind::InvalidChar));
    assert_eq!(one("{:c}", Value::I32(-1)), Err(FormatErrorKind::InvalidChar));
    assert_eq!(one("{:+c}", Value::I32(65)), Err(FormatErrorKind::InvalidFormatSpec));
}

// ==================== Boolean tests ====================

#[test]
fn test_bool_text() {
    assert_eq!(one("{}", Value::Bool(true)).unwrap(), "true");
    assert_eq!(one("{:s}", Value::Bool(false)).unwrap(), "false");
    assert_eq!(one("{:^7}", Value::Bool(true)).unwrap(), " true  ");
    assert_eq!(one("{:.1}", Value::Bool(true)).unwrap(), "t");
}

#[test]
fn test_bool_as_integer() {
    assert_eq!(one("{:d}", Value::Bool(true)).unwrap(), "1");
    assert_eq!(one("{:#x}", Value::Bool(false)).unwrap(), "0x0");
}

#[test]
fn test_bool_rejections() {
    assert_eq!(one("{:+}", Value::Bool(true)), Err(FormatErrorKind::SignNotAllowed));
    assert_eq!(one("{:c}", Value::Bool(true)), Err(FormatErrorKind::InvalidTypeSpec));
    assert_eq!(one("{:f}", Value::Bool(true)), Err(FormatErrorKind::InvalidTypeSpec));
}

// ==================== Float tests ====================

#[test]
fn test_float_shortest() {
    assert_eq!(one("{}", Value::F64(42.0)).unwrap(), "42");
    assert_eq!(one("{}", Value::F64(0.5)).unwrap(), "0.5");
    assert_eq!(one("{}", Value::F64(1e100)).unwrap(), "1e+100");
    assert_eq!(one("{}", Value::F64(-0.0)).unwrap(), "-0");
    assert_eq!(one("{}", Value::F32(0.1)).unwrap(), "0.1");
}

#[test]
fn test_float_presentations() {
    assert_eq!(one("{:.3}", Value::F64(3.14159)).unwrap(), "3.14");
    assert_eq!(one("{:e}", Value::F64(1234.5)).unwrap(), "1.234500e+03");
    assert_eq!(one("{:.2E}", Value::F64(0.000123)).unwrap(), "1.23E-04");
    assert_eq!(one("{:f}", Value::F64(1.5)).unwrap(), "1.500000");
    assert_eq!(one("{:.0f}", Value::F64(2.0)).unwrap(), "2");
    assert_eq!(one("{:#.0f}", Value::F64(2.0)).unwrap(), "2.");
    assert_eq!(one("{:g}", Value::F64(100000.0)).unwrap(), "100000");
    assert_eq!(one("{:g}", Value::F64(1000000.0)).unwrap(), "1e+06");
    assert_eq!(one("{:a}", Value::F64(1.0)).unwrap(), "0x1p+0");
    assert_eq!(one("{:A}", Value::F64(3.0)).unwrap(), "0X1.8P+1");
}

#[test]
fn test_float_padding() {
    assert_eq!(one("{:08.3f}", Value::F64(-3.14159)).unwrap(), "-003.142");
    assert_eq!(one("{:+.1f}", Value::F32(2.3)).unwrap(), "+2.3");
    assert_eq!(one("{:<8.1f}|", Value::F64(2.5)).unwrap(), "2.5     |");
}

#[test]
fn test_float_non_finite() {
    assert_eq!(one("{}", Value::F64(f64::INFINITY)).unwrap(), "inf");
    assert_eq!(one("{:E}", Value::F64(f64::NEG_INFINITY)).unwrap(), "-INF");
    assert_eq!(one("{:05}", Value::F64(f64::NAN)).unwrap(), "  nan");
    assert_eq!(one("{:+f}", Value::F32(f32::NAN)).unwrap(), "+nan");
}

#[test]
fn test_float_rejects_integer_types() {
    assert_eq!(one("{:d}", Value::F64(1.0)), Err(FormatErrorKind::InvalidTypeSpec));
    assert_eq!(one("{:x}", Value::F32(1.0)), Err(FormatErrorKind::InvalidTypeSpec));
}

// ==================== Dynamic size tests ====================

#[test]
fn test_dynamic_width_and_precision() {
    let args = Args::new()
        .with(Value::F64(3.14159))
        .with(Value::U8(8))
        .with(Value::I16(2));
    assert_eq!(format(b"{:{}.{}f}", &args).unwrap(), "    3.14");
}

#[test]
fn test_dynamic_width_rejections() {
    let negative = Args::new().with(Value::I32(1)).with(Value::I32(-1));
    assert_eq!(
        format(b"{:{}}", &negative).unwrap_err().kind,
        FormatErrorKind::NegativeWidth
    );

    let boolean = Args::new().with(Value::I32(1)).with(Value::Bool(true));
    assert_eq!(
        format(b"{:{}}", &boolean).unwrap_err().kind,
        FormatErrorKind::WidthNotInteger
    );

    let float = Args::new().with(Value::I32(1)).with(Value::F64(2.0));
    assert_eq!(
        format(b"{:{}}", &float).unwrap_err().kind,
        FormatErrorKind::WidthNotInteger
    );

    let huge = Args::new().with(Value::I32(1)).with(Value::U64(u64::MAX));
    assert_eq!(
        format(b"{:{}}", &huge).unwrap_err().kind,
        FormatErrorKind::NumberTooBig
    );
}

// ==================== Spec grammar tests ====================

#[test]
fn test_spec_grammar_errors() {
    assert_eq!(one("{:.}", Value::F64(1.0)), Err(FormatErrorKind::MissingPrecision));
    assert_eq!(one("{:.", Value::F64(1.0)), Err(FormatErrorKind::UnmatchedOpenBrace));
    assert_eq!(one("{:99999999999}", Value::I32(1)), Err(FormatErrorKind::NumberTooBig));
    assert_eq!(one("{:>", Value::I32(1)), Err(FormatErrorKind::UnmatchedOpenBrace));
    assert_eq!(one("{:dd}", Value::I32(1)), Err(FormatErrorKind::InvalidFormatSpec));
    assert_eq!(one("{:{<5}", Value::I32(1)), Err(FormatErrorKind::InvalidFormatSpec));
}

#[test]
fn test_width_limit() {
    assert_eq!(one("{:70000}", Value::I32(1)), Err(FormatErrorKind::LimitExceeded));
    assert_eq!(one("{:.5000f}", Value::F64(1.0)), Err(FormatErrorKind::LimitExceeded));

    let formatter = Formatter::new(Limits {
        max_width: 4,
        ..Limits::default()
    });
    let args = Args::new().with(Value::I32(1));
    assert!(formatter.format(b"{:4}", &args).is_ok());
    assert_eq!(
        formatter.format(b"{:5}", &args).unwrap_err().kind,
        FormatErrorKind::LimitExceeded
    );
}

#[test]
fn test_error_offsets_point_into_template() {
    let err = format(b"abc {:.} def", &Args::new().with(Value::F64(1.0))).unwrap_err();
    assert_eq!(err.kind, FormatErrorKind::MissingPrecision);
    assert_eq!(err.offset, 7);
}

// ==================== Chrono tests ====================

#[test]
fn test_duration_suffixes() {
    let cases = [
        (Ratio::new(1, 1_000_000_000_000_000_000), "7as"),
        (Ratio::new(1, 1_000_000_000), "7ns"),
        (Ratio::new(1, 1_000_000), "7µs"),
        (Ratio::new(1, 100), "7cs"),
        (Ratio::new(10, 1), "7das"),
        (Ratio::new(1_000_000_000_000_000_000, 1), "7Es"),
    ];
    for (ratio, expected) in cases {
        let d = Value::Duration(Duration::new(Count::Int(7), ratio));
        assert_eq!(one("{}", d).unwrap(), expected);
    }
}

#[test]
fn test_duration_fill() {
    let d = Value::Duration(Duration::new(Count::Int(5), Ratio::SECOND));
    assert_eq!(one("{:*^6}", d).unwrap(), "**5s**");
}

#[test]
fn test_calendar_time_from_negative_seconds() {
    let t = Value::Time(CalendarTime::from_unix_seconds(-1).unwrap());
    assert_eq!(one("{}", t).unwrap(), "1969-12-31 23:59:59");
    assert_eq!(one("{:%a %u %w}", t).unwrap(), "Wed 3 3");
}

#[test]
fn test_calendar_time_far_years() {
    for secs in [-8_000_000_000_000, 8_000_000_000_000, 0, -86_400 * 366] {
        let t = Value::Time(CalendarTime::from_unix_seconds(secs).unwrap());
        assert!(one("{:%Y %C %y %F %j %G-W%V %U %W}", t).is_ok());
    }
}

#[test]
fn test_calendar_time_iso_week() {
    // 2021-01-01 is a Friday in ISO week 53 of 2020
    let t = Value::Time(CalendarTime::from_unix_seconds(1_609_459_200).unwrap());
    assert_eq!(one("{:%G-W%V %g}", t).unwrap(), "2020-W53 20");
}

// ==================== Output tests ====================

#[test]
fn test_format_to_appends() {
    let mut out = b"> ".to_vec();
    format_to(&mut out, b"{}!", &Args::new().with(Value::U8(1))).unwrap();
    assert_eq!(out, b"> 1!");
}

#[test]
fn test_named_and_positional_mix() {
    let args = Args::new()
        .with(Value::I32(1))
        .with_named(b"n", Value::I32(2));
    assert_eq!(format(b"{0}-{n}-{0}", &args).unwrap(), "1-2-1");
}
