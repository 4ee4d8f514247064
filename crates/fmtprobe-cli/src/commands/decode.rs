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

//! Decode command - show how an input is interpreted

use super::{read_input, ReportFormat};
use crate::error::CliError;
use colored::Colorize;
use fmtprobe_core::{Argument, Call, FuzzConfig, Harness, Outcome, Plan, Target};
use serde::Serialize;
use std::path::Path;

/// Everything `decode` knows about one input.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeReport {
    pub target: &'static str,
    pub size: usize,
    /// `decoded` or `skipped`
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<OutcomeReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    /// `single` or `sweep`
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub arguments: Vec<ArgumentReport>,
    pub template: String,
    pub template_len: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArgumentReport {
    /// `scalar`, `duration` or `calendar`
    pub kind: &'static str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<&'static str>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutcomeReport {
    pub label: &'static str,
    pub engine_calls: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ArgumentReport {
    fn new(argument: &Argument) -> Self {
        match argument {
            Argument::Scalar(s) => Self {
                kind: "scalar",
                ty: Some(s.representation().name()),
                value: s.to_string(),
                scale: None,
            },
            Argument::Duration { count, scale } => Self {
                kind: "duration",
                ty: Some(count.representation().name()),
                value: count.to_string(),
                scale: Some(scale.name()),
            },
            Argument::Calendar(t) => Self {
                kind: "calendar",
                ty: None,
                value: t.to_rfc3339(),
                scale: None,
            },
        }
    }
}

impl PlanReport {
    fn new(plan: &Plan<'_>) -> Self {
        let template = plan.template();
        let (kind, name, arguments) = match plan {
            Plan::Single { call, .. } => {
                let name = match call {
                    Call::Named { name, .. } => Some(String::from_utf8_lossy(name).into_owned()),
                    Call::Positional(_) => None,
                };
                let arguments = call.arguments().iter().map(ArgumentReport::new).collect();
                ("single", name, arguments)
            }
            Plan::Sweep { count, .. } => (
                "sweep",
                None,
                vec![ArgumentReport {
                    kind: "duration",
                    ty: Some(count.representation().name()),
                    value: count.to_string(),
                    scale: Some("all"),
                }],
            ),
        };
        Self {
            kind,
            name,
            arguments,
            template: String::from_utf8_lossy(template).into_owned(),
            template_len: template.len(),
        }
    }
}

impl OutcomeReport {
    fn new(outcome: &Outcome) -> Self {
        let (output, error) = match outcome {
            Outcome::Formatted(bytes) => (Some(String::from_utf8_lossy(bytes).into_owned()), None),
            Outcome::Rejected(e) => (None, Some(e.to_string())),
            Outcome::Skipped(e) => (None, Some(e.to_string())),
            Outcome::Swept(_) => (None, None),
        };
        Self {
            label: outcome.label(),
            engine_calls: outcome.engine_calls(),
            output,
            error,
        }
    }
}

impl DecodeReport {
    /// Decode `data` for `target`, and run it when `run` is set.
    pub fn build(target: Target, data: &[u8], run: bool) -> Self {
        let mut report = Self {
            target: target.name(),
            size: data.len(),
            status: "decoded",
            reason: None,
            plan: None,
            outcome: None,
        };
        match target.decode(data) {
            Ok(plan) => {
                report.plan = Some(PlanReport::new(&plan));
                if run {
                    let harness = Harness::new(FuzzConfig::from_env());
                    report.outcome = Some(OutcomeReport::new(&plan.execute(&harness)));
                }
            }
            Err(e) => {
                report.status = "skipped";
                report.reason = Some(e.to_string());
            }
        }
        report
    }

    fn print_text(&self) {
        println!("{} {} ({} bytes)", "target".bold(), self.target, self.size);
        match &self.plan {
            None => println!(
                "{} {}",
                "skipped".dimmed(),
                self.reason.as_deref().unwrap_or_default()
            ),
            Some(plan) => {
                println!("{} {}", "plan".bold(), plan.kind);
                if let Some(name) = &plan.name {
                    println!("  name: {}", name);
                }
                for (i, arg) in plan.arguments.iter().enumerate() {
                    let ty = arg.ty.unwrap_or("time");
                    match arg.scale {
                        Some(scale) => println!("  arg {}: {} {} ({})", i, ty, arg.value, scale),
                        None => println!("  arg {}: {} {}", i, ty, arg.value),
                    }
                }
                println!("  template: {:?} ({} bytes)", plan.template, plan.template_len);
            }
        }
        if let Some(outcome) = &self.outcome {
            print!("{} {}", "outcome".bold(), outcome.label);
            if let Some(output) = &outcome.output {
                print!(" {:?}", output);
            }
            if let Some(error) = &outcome.error {
                print!(": {}", error);
            }
            println!();
        }
    }
}

/// Print how `file` decodes for `target`.
pub fn decode(target: Target, file: &Path, format: ReportFormat, run: bool) -> Result<(), CliError> {
    let data = read_input(file)?;
    let report = DecodeReport::build(target, &data, run);
    match format {
        ReportFormat::Text => report.print_text(),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmtprobe_core::{InputBuilder, Multiplier, Scalar};

    #[test]
    fn test_scenario_a_report() {
        let data = [0x03, 0x05, 0x00, 0x00, 0x00, 0x2A, b'{', b'}'];
        let report = DecodeReport::build(Target::OneArg, &data, true);
        assert_eq!(report.status, "decoded");
        let plan = report.plan.unwrap();
        assert_eq!(plan.kind, "single");
        assert_eq!(plan.arguments[0].ty, Some("i32"));
        assert_eq!(plan.arguments[0].value, "42");
        assert_eq!(plan.template, "{}");
        let outcome = report.outcome.unwrap();
        assert_eq!(outcome.label, "formatted");
        assert_eq!(outcome.output.as_deref(), Some("42"));
    }

    #[test]
    fn test_skipped_report_has_reason() {
        let report = DecodeReport::build(Target::OneArg, &[0x03], false);
        assert_eq!(report.status, "skipped");
        assert!(report.reason.is_some());
        assert!(report.plan.is_none());
    }

    #[test]
    fn test_duration_and_calendar_arguments() {
        let data = InputBuilder::duration(Scalar::I16(-5), Multiplier::Kilo)
            .unwrap()
            .template(b"{}");
        let plan = DecodeReport::build(Target::Duration, &data, false).plan.unwrap();
        assert_eq!(plan.arguments[0].kind, "duration");
        assert_eq!(plan.arguments[0].scale, Some("kilo"));
        assert_eq!(plan.arguments[0].value, "-5");

        let data = InputBuilder::calendar(951_782_400).template(b"{}");
        let plan = DecodeReport::build(Target::OneArg, &data, false).plan.unwrap();
        assert_eq!(plan.arguments[0].value, "2000-02-29T00:00:00Z");
    }

    #[test]
    fn test_json_shape() {
        let data = InputBuilder::named(Scalar::U8(7), b"n").unwrap().template(b"{n}");
        let report = DecodeReport::build(Target::NamedArg, &data, false);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["plan"]["name"], "n");
        assert_eq!(json["plan"]["arguments"][0]["type"], "u8");
        assert!(json.get("outcome").is_none());
    }
}
