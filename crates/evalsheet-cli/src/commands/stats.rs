//! The `evalsheet stats` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use serde::Serialize;

use evalsheet_core::filter::FilterSelection;
use evalsheet_core::model::{EvaluationRecord, JudgmentCategory};
use evalsheet_core::statistics::{aggregate, pending_overview, AggregationResult};
use evalsheet_report::chart::{distribution, generate_bar_chart, Bar};

#[derive(Serialize)]
struct StatsOutput<'a> {
    cohort_id: &'a str,
    filter: &'a FilterSelection,
    aggregation: &'a AggregationResult,
    distribution: Vec<Bar>,
    pending: PendingOutput<'a>,
}

#[derive(Serialize)]
struct PendingOutput<'a> {
    trainees: usize,
    competencies: usize,
    completed: usize,
    records: Vec<&'a EvaluationRecord>,
}

pub fn execute(
    file: PathBuf,
    trainee: Option<String>,
    competency: Option<String>,
    format: String,
    chart: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, sheet) = super::load(&file, config_path.as_deref())?;
    let selection = super::selection(&sheet, &file, trainee.as_deref(), competency)?;

    let view = sheet.view(&selection);
    let result = aggregate(&view);
    let pending = pending_overview(&view);
    let bars = distribution(&result);

    if let Some(path) = &chart {
        let title = format!("Judgments - cohort {}", sheet.metadata.cohort_id);
        std::fs::write(path, generate_bar_chart(&title, &bars))
            .with_context(|| format!("failed to write chart to {}", path.display()))?;
        tracing::info!("chart written to {}", path.display());
    }

    match format.as_str() {
        "json" => {
            let output = StatsOutput {
                cohort_id: &sheet.metadata.cohort_id,
                filter: &selection,
                aggregation: &result,
                distribution: bars,
                pending: PendingOutput {
                    trainees: pending.trainees,
                    competencies: pending.competencies,
                    completed: pending.completed,
                    records: pending.records,
                },
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "text" => {
            println!("Cohort {} - {}", sheet.metadata.cohort_id, describe(&selection));
            println!("Total records: {}", result.total);

            let mut table = Table::new();
            table.set_header(vec!["Judgment", "Count", "Share"]);
            for category in JudgmentCategory::ALL {
                let count = result.count(category);
                if count == 0 && category == JudgmentCategory::Other {
                    continue;
                }
                table.add_row(vec![
                    Cell::new(category.label()),
                    Cell::new(count),
                    Cell::new(format!("{:.1}%", result.share(category))),
                ]);
            }
            println!("{table}");

            println!(
                "\nPending: {} record(s) across {} trainee(s) and {} competency(ies); {} completed",
                pending.records.len(),
                pending.trainees,
                pending.competencies,
                pending.completed
            );
            if !pending.records.is_empty() {
                let mut table = Table::new();
                table.set_header(vec!["Trainee", "Competency", "LearningOutcome"]);
                for record in &pending.records {
                    table.add_row(vec![
                        Cell::new(record.trainee()),
                        Cell::new(&record.competency),
                        Cell::new(&record.learning_outcome),
                    ]);
                }
                println!("{table}");
            }
        }
        other => anyhow::bail!("unknown stats format '{other}' (expected text or json)"),
    }

    Ok(())
}

fn describe(selection: &FilterSelection) -> String {
    if selection.is_empty() {
        return "all records".to_string();
    }
    let mut parts = Vec::new();
    if let Some(trainee) = &selection.trainee {
        parts.push(format!("trainee {trainee}"));
    }
    if let Some(competency) = &selection.competency {
        parts.push(format!("competency {competency}"));
    }
    parts.join(", ")
}
