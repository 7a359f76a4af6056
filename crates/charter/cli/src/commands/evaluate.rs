//! Feature evaluation commands: policy, invariants, drift, report,
//! preflight and run.

use std::path::Path;

use charter_drift::{compute_drift_score, DriftBand, DriftInput, DriftScore};
use charter_policy::{evaluate_invariant_violations, evaluate_policy};
use charter_report::{MaintenanceBot, MaintenanceReport, PreflightResult, ReportInput};
use charter_types::FeatureInput;
use colored::*;
use tabled::Tabled;
use tracing::debug;

use super::{Context, ExitCode, EXIT_GATE_FAILED, EXIT_OK};
use crate::error::CliResult;
use crate::input::read_input;
use crate::output::{
    message_rows, print_failure, print_single, print_success, print_table, print_warning,
    OutputFormat,
};

#[derive(Tabled)]
struct DriftRow {
    #[tabled(rename = "Factor")]
    label: String,
    #[tabled(rename = "Count")]
    count: u32,
    #[tabled(rename = "Penalty")]
    penalty: String,
}

fn load_feature(path: &Path, ctx: &Context) -> CliResult<FeatureInput> {
    let mut feature: FeatureInput = read_input(path)?;
    ctx.config.apply(&mut feature);
    debug!(feature = %feature.resolved_feature_name(), "Feature input parsed");
    Ok(feature)
}

fn load_report_input(path: &Path, ctx: &Context) -> CliResult<ReportInput> {
    let mut input: ReportInput = read_input(path)?;
    ctx.config.apply(&mut input.feature);
    Ok(input)
}

pub fn policy(path: &Path, ctx: &Context) -> CliResult<ExitCode> {
    let feature = load_feature(path, ctx)?;
    let result = evaluate_policy(&feature);

    if ctx.format != OutputFormat::Table {
        print_single(&result, ctx.format)?;
        return Ok(EXIT_OK);
    }

    if result.ok() {
        print_success(&format!("Feature '{}' is within policy", result.feature_name()));
    } else {
        print_failure(&format!(
            "Feature '{}' violates policy ({} violations)",
            result.feature_name(),
            result.violations().len()
        ));
    }
    print_table(message_rows(result.violations(), result.warnings()));
    Ok(EXIT_OK)
}

pub fn invariants(path: &Path, ctx: &Context) -> CliResult<ExitCode> {
    let feature = load_feature(path, ctx)?;
    let evaluation = evaluate_invariant_violations(&feature);

    if ctx.format != OutputFormat::Table {
        print_single(&evaluation, ctx.format)?;
        return Ok(EXIT_OK);
    }

    if evaluation.is_clean() {
        print_success("All invariants hold");
    }
    print_table(message_rows(&evaluation.violations, &evaluation.warnings));
    Ok(EXIT_OK)
}

pub fn drift(path: &Path, ctx: &Context) -> CliResult<ExitCode> {
    let input: DriftInput = read_input(path)?;
    let score = compute_drift_score(&input);

    if ctx.format != OutputFormat::Table {
        print_single(&score, ctx.format)?;
        return Ok(EXIT_OK);
    }

    print_drift(&score);
    Ok(EXIT_OK)
}

pub fn report(path: &Path, ctx: &Context) -> CliResult<ExitCode> {
    let input = load_report_input(path, ctx)?;
    let report = MaintenanceBot::new().report(&input);

    if ctx.format != OutputFormat::Table {
        print_single(&report, ctx.format)?;
        return Ok(EXIT_OK);
    }

    print_report(&report);
    Ok(EXIT_OK)
}

pub fn preflight(path: &Path, ctx: &Context) -> CliResult<ExitCode> {
    let feature = load_feature(path, ctx)?;
    let result = MaintenanceBot::new().preflight(&feature);

    if ctx.format == OutputFormat::Table {
        print_preflight(&result);
    } else {
        print_single(&result, ctx.format)?;
    }
    Ok(gate_exit(result.passed()))
}

pub fn run(path: &Path, ctx: &Context) -> CliResult<ExitCode> {
    let input = load_report_input(path, ctx)?;
    let run = MaintenanceBot::new().run(&input);

    if ctx.format == OutputFormat::Table {
        print_preflight(&run.preflight);
        println!();
        print_report(&run.report);
        if let Some(fallback) = &run.fallback {
            println!();
            print_warning(&format!(
                "{} - automation disabled, human intervention required",
                "SAFE_MODE".yellow().bold()
            ));
            println!("  {}", fallback.reason());
        }
    } else {
        print_single(&run, ctx.format)?;
    }
    Ok(gate_exit(!run.halted()))
}

fn gate_exit(passed: bool) -> ExitCode {
    if passed {
        EXIT_OK
    } else {
        EXIT_GATE_FAILED
    }
}

fn colorize_band(score: &DriftScore) -> ColoredString {
    let text = format!("{}/100 ({})", score.score(), score.band().as_str());
    match score.band() {
        DriftBand::Healthy => text.green(),
        DriftBand::Degraded => text.yellow(),
        DriftBand::Critical => text.red(),
    }
}

fn print_drift(score: &DriftScore) {
    println!("Drift score: {}", colorize_band(score));
    let rows = score
        .lines()
        .iter()
        .map(|line| DriftRow {
            label: line.label.clone(),
            count: line.count,
            penalty: format!("{}/{}", line.penalty, line.weight),
        })
        .collect();
    print_table::<DriftRow>(rows);
}

fn print_report(report: &MaintenanceReport) {
    println!("Report {} at {}", report.version(), report.timestamp().to_rfc3339());
    print_drift(report.drift_score());
    println!();
    print_table(message_rows(report.invariant_violations(), report.warnings()));
    println!("\nRecommendations:");
    for recommendation in report.recommendations() {
        println!("  - {}", recommendation);
    }
}

fn print_preflight(result: &PreflightResult) {
    if result.passed() {
        print_success(&format!("Preflight {}", result.status()));
    } else {
        print_failure(&format!(
            "Preflight {} - outcome {}",
            result.status(),
            result.terminal_outcome()
        ));
        for reason in result.reasons() {
            println!("  {} {}", "-".dimmed(), reason);
        }
    }
}
