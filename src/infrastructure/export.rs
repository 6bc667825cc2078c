use crate::domain::{GateTruthTable, HistoryEntry, SymbolConfig};
use std::io;
use thiserror::Error;

pub const DEFAULT_HISTORY_CSV: &str = "history.csv";
pub const DEFAULT_TABLE_CSV: &str = "truth_table.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("nothing to export")]
    Empty,
}

pub struct CsvExporter;

impl CsvExporter {
    /// Writes the gate truth table, booleans spelled with `config`.
    pub fn export_truth_table(config: &SymbolConfig, filename: &str) -> Result<String, ExportError> {
        let mut writer = csv::Writer::from_path(filename)?;
        writer.write_record(GateTruthTable::HEADERS)?;
        for row in GateTruthTable::generate().to_string_rows(config) {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(filename.to_string())
    }

    /// Writes one line per history entry, each result spelled with the symbols it was computed under.
    pub fn export_history(history: &[HistoryEntry], filename: &str) -> Result<String, ExportError> {
        if history.is_empty() {
            return Err(ExportError::Empty);
        }

        let mut writer = csv::Writer::from_path(filename)?;
        writer.write_record(["expression", "postfix", "result"])?;
        for entry in history {
            writer.write_record([
                entry.expression.as_str(),
                entry.postfix.as_str(),
                entry.result_symbol().to_string().as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(filename.to_string())
    }
}
