//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use fundline_core::{AccountStatus, ScenarioReport};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn status_cell(status: AccountStatus) -> Cell {
    let color = match status {
        AccountStatus::Active => Color::Green,
        AccountStatus::Dormant => Color::Yellow,
        AccountStatus::Closed => Color::Red,
    };
    Cell::new(status.as_str()).fg(color)
}

/// Print a scenario replay as a step table plus summary
pub fn print_report(report: &ScenarioReport) {
    info(&format!(
        "Account {} for {} (dormant after {}s idle)",
        report.account_id, report.holder, report.dormancy_threshold_seconds
    ));
    println!();

    let mut table = create_table();
    table.set_header(vec!["#", "Step", "Result", "Status", "Balance", "Notified"]);

    for step in &report.steps {
        let result = if step.result.success {
            Cell::new(step.result.data.as_deref().unwrap_or("ok"))
        } else {
            Cell::new(step.result.error.as_deref().unwrap_or("failed")).fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(step.index),
            Cell::new(&step.label),
            result,
            status_cell(step.status),
            Cell::new(step.balance),
            Cell::new(step.notifications),
        ]);
    }

    println!("{}", table);
    println!();

    let summary = format!(
        "Final: {} with balance {} ({} step(s) refused, {} reactivation notice(s))",
        report.final_status,
        report.final_balance,
        report.rejected(),
        report.notifications
    );
    if report.final_status == AccountStatus::Closed {
        println!("{}", summary.bold());
    } else {
        success(&summary);
    }
}
