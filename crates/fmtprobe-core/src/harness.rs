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

//! Invocation harness.
//!
//! Builds the engine's argument list from decoded fields, makes exactly one
//! engine call, and sorts the result into an [`Outcome`]. Template
//! rejections are ordinary outcomes; panics are not caught.

use fmtprobe_format::{Args, CalendarTime, Duration, FormatError, Value};
use tracing::trace;

use crate::config::FuzzConfig;
use crate::engine::{BuiltinEngine, Engine};
use crate::error::DecodeError;
use crate::repr::Scalar;
use crate::scale::Multiplier;

/// One engine argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Argument {
    Scalar(Scalar),
    /// A tick count with a decimal period.
    Duration { count: Scalar, scale: Multiplier },
    /// A broken-down UTC time.
    Calendar(CalendarTime),
}

impl Argument {
    /// The engine value. Fails for boolean counts and reserved scales,
    /// neither of which any decoder produces.
    pub fn to_value(&self) -> Result<Value, DecodeError> {
        match *self {
            Argument::Scalar(s) => Ok(s.to_value()),
            Argument::Duration { count, scale } => {
                let ticks = count
                    .to_count()
                    .ok_or_else(|| DecodeError::unknown_type(count.representation().selector()))?;
                let ratio = scale
                    .ratio()
                    .ok_or_else(|| DecodeError::unknown_scale(scale.selector().unwrap_or(0)))?;
                Ok(Value::Duration(Duration::new(ticks, ratio)))
            }
            Argument::Calendar(t) => Ok(Value::Time(t)),
        }
    }

    fn is_negative_duration(&self) -> bool {
        matches!(self, Argument::Duration { count, .. } if count.is_negative())
    }
}

/// The argument list of one engine call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call<'a> {
    Positional(Vec<Argument>),
    /// A single argument addressable as `{name}`.
    Named { name: &'a [u8], value: Argument },
}

impl<'a> Call<'a> {
    pub fn arguments(&self) -> &[Argument] {
        match self {
            Call::Positional(args) => args,
            Call::Named { value, .. } => std::slice::from_ref(value),
        }
    }

    fn to_args(&self) -> Result<Args<'a>, DecodeError> {
        let mut args = Args::new();
        match self {
            Call::Positional(values) => {
                for value in values {
                    args.push(value.to_value()?);
                }
            }
            Call::Named { name, value } => args.push_named(*name, value.to_value()?),
        }
        Ok(args)
    }
}

/// What happened to one input.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The input was declined before any engine call.
    Skipped(DecodeError),
    /// The engine produced output.
    Formatted(Vec<u8>),
    /// The engine rejected the template or arguments.
    Rejected(FormatError),
    /// One outcome per multiplier of a duration sweep.
    Swept(Vec<Outcome>),
}

impl Outcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    pub fn is_formatted(&self) -> bool {
        matches!(self, Outcome::Formatted(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    /// The formatted bytes, if any.
    pub fn output(&self) -> Option<&[u8]> {
        match self {
            Outcome::Formatted(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Number of engine calls this outcome records.
    pub fn engine_calls(&self) -> usize {
        match self {
            Outcome::Skipped(_) => 0,
            Outcome::Formatted(_) | Outcome::Rejected(_) => 1,
            Outcome::Swept(outcomes) => outcomes.iter().map(Outcome::engine_calls).sum(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Skipped(_) => "skipped",
            Outcome::Formatted(_) => "formatted",
            Outcome::Rejected(_) => "rejected",
            Outcome::Swept(_) => "swept",
        }
    }
}

/// Drives an [`Engine`] under a [`FuzzConfig`].
#[derive(Debug, Clone)]
pub struct Harness<E = BuiltinEngine> {
    engine: E,
    config: FuzzConfig,
}

impl Harness<BuiltinEngine> {
    /// A harness over the bundled engine, with `config.limits` applied.
    pub fn new(config: FuzzConfig) -> Self {
        Self {
            engine: BuiltinEngine::new(config.limits.clone()),
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(FuzzConfig::from_env())
    }
}

impl Default for Harness<BuiltinEngine> {
    fn default() -> Self {
        Self::new(FuzzConfig::default())
    }
}

impl<E: Engine> Harness<E> {
    pub fn with_engine(engine: E, config: FuzzConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &FuzzConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Format `template` with the arguments of `call`.
    pub fn invoke(&self, call: &Call<'_>, template: &[u8]) -> Outcome {
        if self.config.reject_negative_durations
            && call.arguments().iter().any(Argument::is_negative_duration)
        {
            trace!(target: "fmtprobe::harness", "negative duration skipped");
            return Outcome::Skipped(DecodeError::NegativeDuration);
        }

        let args = match call.to_args() {
            Ok(args) => args,
            Err(e) => return Outcome::Skipped(e),
        };

        match self.engine.render(self.config.output, template, &args) {
            Ok(out) => {
                trace!(
                    target: "fmtprobe::harness",
                    template_len = template.len(),
                    output_len = out.len(),
                    "formatted"
                );
                Outcome::Formatted(out)
            }
            Err(e) => {
                trace!(
                    target: "fmtprobe::harness",
                    kind = %e.kind,
                    offset = e.offset,
                    "template rejected"
                );
                Outcome::Rejected(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::Representation;
    use fmtprobe_format::FormatErrorKind;

    fn harness() -> Harness {
        Harness::default()
    }

    // ==================== Invocation tests ====================

    #[test]
    fn test_formats_positional() {
        let call = Call::Positional(vec![
            Argument::Scalar(Scalar::I32(1)),
            Argument::Scalar(Scalar::Bool(false)),
        ]);
        assert_eq!(
            harness().invoke(&call, b"{} {}"),
            Outcome::Formatted(b"1 false".to_vec())
        );
    }

    #[test]
    fn test_formats_named() {
        let call = Call::Named {
            name: b"x",
            value: Argument::Scalar(Scalar::U8(9)),
        };
        let outcome = harness().invoke(&call, b"{x}{0}");
        assert_eq!(outcome.output(), Some(&b"99"[..]));
    }

    #[test]
    fn test_named_argument_is_not_found_under_other_name() {
        let call = Call::Named {
            name: b"abc",
            value: Argument::Scalar(Scalar::U8(9)),
        };
        match harness().invoke(&call, b"{abd}") {
            Outcome::Rejected(e) => assert_eq!(e.kind, FormatErrorKind::ArgumentNotFound),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_duration_argument() {
        let call = Call::Positional(vec![Argument::Duration {
            count: Scalar::I64(-5),
            scale: Multiplier::Milli,
        }]);
        assert_eq!(harness().invoke(&call, b"{}").output(), Some(&b"-5ms"[..]));
    }

    #[test]
    fn test_rejection_is_an_outcome() {
        let call = Call::Positional(vec![Argument::Scalar(Scalar::I32(42))]);
        let outcome = harness().invoke(&call, b"{");
        assert!(outcome.is_rejected());
        assert_eq!(outcome.engine_calls(), 1);
    }

    // ==================== Guard tests ====================

    #[test]
    fn test_negative_duration_guard() {
        let call = Call::Positional(vec![Argument::Duration {
            count: Scalar::I8(-1),
            scale: Multiplier::Kilo,
        }]);
        let config = FuzzConfig {
            reject_negative_durations: true,
            ..FuzzConfig::default()
        };
        assert_eq!(
            Harness::new(config).invoke(&call, b"{}"),
            Outcome::Skipped(DecodeError::NegativeDuration)
        );
        assert!(harness().invoke(&call, b"{}").is_formatted());
    }

    #[test]
    fn test_reserved_scale_is_skipped() {
        let call = Call::Positional(vec![Argument::Duration {
            count: Scalar::I8(1),
            scale: Multiplier::Yotta,
        }]);
        assert!(harness().invoke(&call, b"{}").is_skipped());
    }

    #[test]
    fn test_bool_count_is_skipped() {
        let arg = Argument::Duration {
            count: Scalar::Bool(true),
            scale: Multiplier::Milli,
        };
        assert_eq!(
            arg.to_value(),
            Err(DecodeError::unknown_type(Representation::Bool.selector()))
        );
    }

    #[test]
    fn test_swept_counts_calls() {
        let outcome = Outcome::Swept(vec![
            Outcome::Formatted(Vec::new()),
            Outcome::Rejected(FormatError::new(FormatErrorKind::InvalidChronoSpec, 0)),
        ]);
        assert_eq!(outcome.engine_calls(), 2);
        assert_eq!(outcome.label(), "swept");
    }
}
