//! Result rendering shared by subcommands and the menu.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::domain::{BuildReport, Outcome, ServiceRoster};

use super::output;

#[derive(Tabled)]
struct BuildRow {
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Image")]
    image: String,
    #[tabled(rename = "Result")]
    result: String,
}

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Service")]
    name: String,
    #[tabled(rename = "Alias")]
    alias: String,
    #[tabled(rename = "Context")]
    context: String,
}

fn builds_json(report: &BuildReport) -> serde_json::Value {
    report
        .results
        .iter()
        .map(|r| {
            json!({
                "service": r.service,
                "image": r.image,
                "result": r.outcome.to_string(),
                "ok": r.is_success(),
            })
        })
        .collect()
}

fn build_table(report: &BuildReport) {
    let rows: Vec<BuildRow> = report
        .results
        .iter()
        .map(|r| BuildRow {
            service: r.service.clone(),
            image: r.image.clone(),
            result: r.outcome.to_string(),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
}

/// Render a build batch as a table plus a one-line summary.
pub fn build_report(command: &str, report: &BuildReport) {
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "status": if report.is_clean() { "ok" } else { "degraded" },
            "builds": builds_json(report),
        }));
        return;
    }

    if report.is_empty() {
        return;
    }
    output::section("Images");
    build_table(report);
    let summary = format!(
        "{} of {} images built and loaded",
        report.succeeded(),
        report.len()
    );
    if report.is_clean() {
        output::success(&summary);
    } else {
        output::warning(&summary);
    }
}

/// Render an operation outcome.
///
/// Warnings were already shown as they happened; text mode only summarizes.
pub fn outcome(command: &str, outcome: &Outcome, done: &str) {
    if output::is_json() {
        let status = if outcome.is_declined() {
            "declined"
        } else if outcome.is_clean() {
            "ok"
        } else {
            "degraded"
        };
        let warnings: Vec<String> = outcome.warnings.iter().map(ToString::to_string).collect();
        output::json_output(json!({
            "command": command,
            "status": status,
            "warnings": warnings,
            "builds": builds_json(&outcome.builds),
        }));
        return;
    }

    if !outcome.builds.is_empty() {
        build_table(&outcome.builds);
    }
    if outcome.is_declined() {
        output::note("Cancelled, nothing was changed.");
    } else if outcome.is_clean() {
        output::success(done);
    } else {
        let count = outcome.warnings.len();
        let noun = if count == 1 { "warning" } else { "warnings" };
        output::warning(&format!("{done} with {count} {noun}"));
    }
}

/// Render the service roster.
pub fn roster(roster: &ServiceRoster) {
    if output::is_json() {
        let services: Vec<_> = roster
            .iter()
            .map(|s| {
                json!({
                    "name": s.name,
                    "alias": s.alias,
                    "context": s.build_context().directory.display().to_string(),
                })
            })
            .collect();
        output::json_output(json!({
            "command": "services",
            "services": services,
        }));
        return;
    }

    let rows: Vec<ServiceRow> = roster
        .iter()
        .map(|s| ServiceRow {
            name: s.name.clone(),
            alias: s.alias.clone().unwrap_or_default(),
            context: s.build_context().directory.display().to_string(),
        })
        .collect();
    output::section("Services");
    output::lines(&Table::new(rows).to_string());
}
