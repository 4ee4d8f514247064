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

//! Registry command - list type and scale selectors

use super::ReportFormat;
use crate::error::CliError;
use colored::Colorize;
use fmtprobe_core::{Multiplier, Representation, CALENDAR_SELECTOR};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TypeEntry {
    selector: u8,
    name: &'static str,
    width: usize,
    duration_count: bool,
}

#[derive(Debug, Serialize)]
struct ScaleEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    selector: Option<u8>,
    name: &'static str,
    exponent: i32,
    enabled: bool,
}

#[derive(Debug, Serialize)]
struct Registries {
    types: Vec<TypeEntry>,
    calendar_selector: u8,
    scales: Vec<ScaleEntry>,
}

fn registries() -> Registries {
    let types = Representation::ALL
        .iter()
        .map(|&r| TypeEntry {
            selector: r.selector(),
            name: r.name(),
            width: r.width(),
            duration_count: r.is_duration_count(),
        })
        .collect();
    let mut scales: Vec<ScaleEntry> = Multiplier::ALL
        .iter()
        .chain(Multiplier::RESERVED.iter())
        .map(|&m| ScaleEntry {
            selector: m.selector(),
            name: m.name(),
            exponent: m.exponent(),
            enabled: m.selector().is_some(),
        })
        .collect();
    scales.sort_by_key(|s| s.exponent);
    Registries {
        types,
        calendar_selector: CALENDAR_SELECTOR,
        scales,
    }
}

/// Print the type and scale registries.
pub fn registry(format: ReportFormat) -> Result<(), CliError> {
    let registries = registries();
    if format == ReportFormat::Json {
        println!("{}", serde_json::to_string_pretty(&registries)?);
        return Ok(());
    }

    println!("{}", "Types".bold());
    for t in &registries.types {
        println!("  {:>2}  {:<5} {:>2} bytes", t.selector, t.name, t.width);
    }
    println!(
        "  {:>2}  time  (one-arg only)",
        registries.calendar_selector
    );

    println!("{}", "Scales".bold());
    for s in &registries.scales {
        match s.selector {
            Some(sel) => println!("  {:>2}  {:<6} 10^{}", sel, s.name, s.exponent),
            None => println!(
                "  {}  {:<6} 10^{} {}",
                "--".dimmed(),
                s.name,
                s.exponent,
                "(reserved)".dimmed()
            ),
        }
    }
    Ok(())
}
