//! Report generation port trait.

use crate::domain::comparison::ComparisonReport;
use crate::domain::error::StockError;
use std::path::Path;

/// Port for writing strategy comparison reports.
pub trait ReportPort {
    fn write(&self, report: &ComparisonReport, output_path: &Path) -> Result<(), StockError>;
}
