//! CSV report adapter.
//!
//! Writes the weekly value series as a wide table (`week,<strategy>...`) and
//! a per-strategy summary next to it as `<stem>_summary.csv`.

use crate::domain::comparison::ComparisonReport;
use crate::domain::error::StockError;
use crate::ports::report_port::ReportPort;
use std::path::{Path, PathBuf};

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Path of the summary file written alongside `output_path`.
    pub fn summary_path(output_path: &Path) -> PathBuf {
        let stem = output_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());
        output_path.with_file_name(format!("{stem}_summary.csv"))
    }

    fn write_values(report: &ComparisonReport, path: &Path) -> Result<(), StockError> {
        let mut wtr = csv::Writer::from_path(path).map_err(csv_error)?;

        let mut header = vec!["week".to_string()];
        header.extend(report.results.iter().map(|r| r.name.clone()));
        wtr.write_record(&header).map_err(csv_error)?;

        for (row, week) in report.weeks().into_iter().enumerate() {
            let mut record = vec![week.to_string()];
            for result in &report.results {
                let cell = result
                    .values
                    .get(row)
                    .map(|p| format!("{:.2}", p.value))
                    .unwrap_or_default();
                record.push(cell);
            }
            wtr.write_record(&record).map_err(csv_error)?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn write_summary(report: &ComparisonReport, path: &Path) -> Result<(), StockError> {
        let mut wtr = csv::Writer::from_path(path).map_err(csv_error)?;
        wtr.write_record([
            "strategy",
            "teams",
            "final_value",
            "percent_return",
            "average_weekly_return",
            "max_drawdown",
        ])
        .map_err(csv_error)?;

        for summary in &report.summaries {
            wtr.write_record([
                summary.name.clone(),
                summary.teams.join(";"),
                format!("{:.2}", summary.final_value),
                format!("{:.4}", summary.percent_return),
                format!("{:.4}", summary.average_weekly_return),
                format!("{:.4}", summary.max_drawdown),
            ])
            .map_err(csv_error)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, report: &ComparisonReport, output_path: &Path) -> Result<(), StockError> {
        Self::write_values(report, output_path)?;
        let summary_path = Self::summary_path(output_path);
        Self::write_summary(report, &summary_path)?;
        tracing::info!(
            values = %output_path.display(),
            summary = %summary_path.display(),
            "wrote report"
        );
        Ok(())
    }
}

fn csv_error(e: csv::Error) -> StockError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => StockError::Io(io),
        other => StockError::Io(std::io::Error::other(format!("{:?}", other))),
    }
}
