//! Plain-text rendering of roster pages, record details and form outcomes.

use std::fmt::Write;

use forms::model::{ErrorMap, SubmitOutcome};
use listing_core::SortDir;
use roster::model::{DisplayStatus, RecordDetail, RosterDisplay};

const NO_RESULTS: &str = "No users found";

pub fn roster_table(display: &RosterDisplay) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    match &display.status {
        DisplayStatus::Loading => {
            writeln!(out, "Loading users...")?;
            return Ok(out);
        }
        DisplayStatus::Failed(message) if !display.stale => {
            writeln!(out, "Failed to load users: {}", message)?;
            return Ok(out);
        }
        DisplayStatus::Failed(message) => {
            writeln!(out, "Refresh failed ({}), showing previous data", message)?;
        }
        DisplayStatus::Ready => {}
    }

    let headers: Vec<String> = display
        .columns
        .iter()
        .map(|c| {
            let mut label = c.label().to_string();
            if display.state.sort.key == *c {
                label.push_str(match display.state.sort.dir {
                    SortDir::Asc => " ^",
                    SortDir::Desc => " v",
                });
            }
            label
        })
        .collect();
    let rows: Vec<Vec<String>> = display
        .page
        .items
        .iter()
        .map(|r| display.columns.iter().map(|c| c.value(r)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    write_row(&mut out, &headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(&mut out, &rule, &widths)?;
    if rows.is_empty() {
        writeln!(out, "{}", NO_RESULTS)?;
    }
    for row in &rows {
        write_row(&mut out, row, &widths)?;
    }

    let info = &display.page.page_info;
    writeln!(
        out,
        "Page {} of {} | {} of {} users | {} per page",
        info.page_index,
        info.page_count,
        display.filtered_count,
        display.total_count,
        info.page_size
    )?;
    Ok(out)
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize]) -> std::fmt::Result {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect();
    writeln!(out, "{}", line.join(" | ").trim_end())
}

pub fn record_detail(detail: &RecordDetail) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let width = detail
        .fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or_default();
    for (label, value) in &detail.fields {
        writeln!(out, "{:<width$}  {}", label, value, width = width)?;
    }
    Ok(out)
}

pub fn field_errors(errors: &ErrorMap) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    for (field, message) in errors {
        writeln!(out, "  {}: {}", field, message)?;
    }
    Ok(out)
}

/// One-line summary of a submit attempt.
pub fn outcome_line(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Blocked(blocked) => format!("Form not submitted: {}", blocked),
        SubmitOutcome::InFlight => "Form is already being submitted".to_string(),
        SubmitOutcome::Rejected { message } => message.clone(),
        SubmitOutcome::Accepted { message, .. } => message.clone(),
    }
}
