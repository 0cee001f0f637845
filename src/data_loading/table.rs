use crate::error::{PipelineError, Result};
use std::collections::HashSet;

/// Jeden stĺpec tabuľky. `None` je chýbajúca hodnota.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Numeric(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Numeric(_) => "numeric",
            Column::Text(_) => "text",
        }
    }

    pub fn is_null(&self, row: usize) -> bool {
        match self {
            Column::Numeric(values) => values[row].is_none(),
            Column::Text(values) => values[row].is_none(),
        }
    }

    pub fn null_count(&self) -> usize {
        match self {
            Column::Numeric(values) => values.iter().filter(|v| v.is_none()).count(),
            Column::Text(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    fn take(&self, rows: &[usize]) -> Column {
        match self {
            Column::Numeric(values) => Column::Numeric(rows.iter().map(|&r| values[r]).collect()),
            Column::Text(values) => {
                Column::Text(rows.iter().map(|&r| values[r].clone()).collect())
            }
        }
    }
}

/// Tabuľka s pomenovanými stĺpcami rovnakej dĺžky.
///
/// Názvy stĺpcov sú unikátne a poradie stĺpcov sa zachováva.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<(String, Column)>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut table = Table::default();

        for (name, column) in columns {
            if !seen.insert(name.clone()) {
                return Err(PipelineError::Schema(format!("duplicate column '{}'", name)));
            }
            if let Some(first) = table.columns.first() {
                if first.len() != column.len() {
                    return Err(PipelineError::Schema(format!(
                        "column '{}' has {} rows, expected {}",
                        name,
                        column.len(),
                        first.len()
                    )));
                }
            }
            table.names.push(name);
            table.columns.push(column);
        }

        Ok(table)
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Column)> {
        self.names.iter().zip(self.columns.iter())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|idx| &self.columns[idx])
    }

    /// Vráti stĺpec alebo `SchemaError`, ak neexistuje
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| self.missing(name))
    }

    /// Nahradí existujúci stĺpec novým stĺpcom rovnakej dĺžky
    pub fn replace_column(&mut self, name: &str, column: Column) -> Result<()> {
        let idx = self.position(name).ok_or_else(|| self.missing(name))?;
        if column.len() != self.n_rows() {
            return Err(PipelineError::ShapeMismatch {
                expected: self.n_rows(),
                got: column.len(),
            });
        }
        self.columns[idx] = column;
        Ok(())
    }

    /// Zahodí vymenované stĺpce. Ak niektorý chýba, tabuľka sa nezmení.
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        for name in names {
            self.require(name.as_ref())?;
        }
        let drop: HashSet<&str> = names.iter().map(|n| n.as_ref()).collect();
        let (names, columns): (Vec<_>, Vec<_>) = std::mem::take(&mut self.names)
            .into_iter()
            .zip(std::mem::take(&mut self.columns))
            .filter(|(name, _)| !drop.contains(name.as_str()))
            .unzip();
        self.names = names;
        self.columns = columns;
        Ok(())
    }

    /// Ponechá len číselné stĺpce
    pub fn select_numeric(self) -> Table {
        let (names, columns) = self
            .names
            .into_iter()
            .zip(self.columns)
            .filter(|(_, column)| column.is_numeric())
            .unzip();
        Table { names, columns }
    }

    /// Nová tabuľka z vybraných riadkov (v danom poradí)
    pub fn take_rows(&self, rows: &[usize]) -> Table {
        Table {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
        }
    }

    /// Indexy riadkov bez chýbajúcej hodnoty v ktoromkoľvek stĺpci
    pub fn complete_rows(&self) -> Vec<usize> {
        (0..self.n_rows())
            .filter(|&row| self.columns.iter().all(|c| !c.is_null(row)))
            .collect()
    }

    pub fn null_count(&self) -> usize {
        self.columns.iter().map(Column::null_count).sum()
    }

    /// Číselný stĺpec bez chýbajúcich hodnôt
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        match self.require(name)? {
            Column::Numeric(values) => values
                .iter()
                .enumerate()
                .map(|(row, v)| {
                    v.ok_or_else(|| {
                        PipelineError::Schema(format!(
                            "column '{}' has a missing value at row {}",
                            name, row
                        ))
                    })
                })
                .collect(),
            Column::Text(_) => Err(PipelineError::Schema(format!(
                "column '{}' is text, expected numeric",
                name
            ))),
        }
    }

    /// Riadková matica pre model. Všetky stĺpce musia byť číselné a úplné.
    pub fn to_row_major(&self) -> Result<Vec<Vec<f64>>> {
        let columns: Vec<Vec<f64>> = self
            .names
            .iter()
            .map(|name| self.numeric_values(name))
            .collect::<Result<_>>()?;

        Ok((0..self.n_rows())
            .map(|row| columns.iter().map(|col| col[row]).collect())
            .collect())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    fn missing(&self, name: &str) -> PipelineError {
        PipelineError::Schema(format!(
            "column '{}' not found, available: {:?}",
            name, self.names
        ))
    }
}
