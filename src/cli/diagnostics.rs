use anyhow::{bail, Result};

use super::CommonArgs;
use crate::diagnostics::{run_diagnostics, DiagnosticsReport, ProbeStatus};

pub async fn run(common: CommonArgs) -> Result<()> {
    let config = common.load_config()?;
    let report = run_diagnostics(&config, common.dry_run).await;
    print_report(&report);

    if !report.healthy() {
        bail!(
            "{}",
            report
                .error
                .as_deref()
                .unwrap_or("No candidate model produced a response")
        );
    }
    Ok(())
}

fn print_report(report: &DiagnosticsReport) {
    println!();
    for (var, present) in &report.env.present {
        let mark = if *present { "\u{2713}" } else { "\u{2717}" };
        println!("  {} {}", mark, var);
    }
    println!("  Active key source: {}", report.env.active_key_source);
    println!();
    for check in &report.models {
        let mark = match check.status {
            ProbeStatus::Success => "\u{2713}",
            ProbeStatus::EmptyResponse => "!",
            ProbeStatus::Failed => "\u{2717}",
        };
        match &check.error {
            Some(err) => println!("  {} {}: {}", mark, check.model, err),
            None => println!("  {} {}", mark, check.model),
        }
    }
    println!();
}
