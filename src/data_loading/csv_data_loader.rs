use super::data_loader::DataLoader;
use super::table::{Column, Table};
use crate::error::{PipelineError, Result};
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Reprezentácie chýbajúcej hodnoty (rovnaké ako pandas)
const NULL_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// CSV Data Loader - implementácia Strategy pattern pre CSV súbory
pub struct CsvDataLoader {
    delimiter: u8,
    numeric_columns: Vec<String>,
}

impl CsvDataLoader {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            numeric_columns: Vec::new(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Stĺpce, ktoré musia byť číselné. Nečíselná bunka v nich je `ParseError`.
    pub fn with_numeric_columns(mut self, columns: Vec<String>) -> Self {
        self.numeric_columns = columns;
        self
    }

    /// Helper pre parsovanie CSV do stĺpcov
    fn parse_csv<R: Read>(&self, reader: R) -> Result<(Vec<String>, Vec<Vec<Option<String>>>)> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| PipelineError::Parse(format!("cannot read CSV header: {}", e)))?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(PipelineError::Parse("CSV has no header row".to_string()));
        }

        let mut seen = HashSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(PipelineError::Parse(format!(
                    "duplicate column '{}' in header",
                    header
                )));
            }
        }

        let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        for (idx, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(idx as u64 + 2);
                PipelineError::Parse(format!("line {}: {}", line, e))
            })?;

            for (col, val) in record.iter().enumerate() {
                let val = val.trim();
                columns[col].push(if NULL_TOKENS.contains(&val) {
                    None
                } else {
                    Some(val.to_string())
                });
            }
        }

        Ok((headers, columns))
    }

    /// Odvodí typ stĺpca: číselný, ak sa dá každá neprázdna bunka parsovať
    fn infer_column(&self, name: &str, cells: Vec<Option<String>>) -> Result<Column> {
        let declared_numeric = self.numeric_columns.iter().any(|c| c == name);

        let mut parsed = Vec::with_capacity(cells.len());
        let mut numeric = true;
        for (row, cell) in cells.iter().enumerate() {
            match cell {
                None => parsed.push(None),
                Some(text) => match text.parse::<f64>() {
                    Ok(value) => parsed.push(Some(value)),
                    Err(_) if declared_numeric => {
                        return Err(PipelineError::Parse(format!(
                            "value '{}' in column '{}' (row {}) is not a number",
                            text,
                            name,
                            row + 1
                        )));
                    }
                    Err(_) => {
                        numeric = false;
                        break;
                    }
                },
            }
        }

        if numeric {
            Ok(Column::Numeric(parsed))
        } else {
            Ok(Column::Text(cells))
        }
    }

    fn build_table(&self, data: impl Read) -> Result<Table> {
        let (headers, raw_columns) = self.parse_csv(data)?;

        for declared in &self.numeric_columns {
            if !headers.contains(declared) {
                return Err(PipelineError::Schema(format!(
                    "declared numeric column '{}' is not in the header",
                    declared
                )));
            }
        }

        let columns = headers
            .into_iter()
            .zip(raw_columns)
            .map(|(name, cells)| {
                let column = self.infer_column(&name, cells)?;
                debug!(column = %name, kind = column.type_name(), "inferred column type");
                Ok((name, column))
            })
            .collect::<Result<Vec<_>>>()?;

        Table::new(columns)
    }
}

impl DataLoader for CsvDataLoader {
    fn get_name(&self) -> &str {
        "CSV Data Loader"
    }

    fn load(&self, path: &Path) -> Result<Table> {
        debug!(path = %path.display(), delimiter = %(self.delimiter as char), "reading CSV file");
        let file = File::open(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => PipelineError::NotFound(path.display().to_string()),
            _ => PipelineError::Io(err),
        })?;

        let table = self.build_table(file)?;
        debug!(rows = table.n_rows(), columns = table.n_cols(), "CSV file parsed");
        Ok(table)
    }

    fn load_from_string(&self, data: &str) -> Result<Table> {
        self.build_table(data.as_bytes())
    }
}

impl Default for CsvDataLoader {
    fn default() -> Self {
        Self::new()
    }
}
