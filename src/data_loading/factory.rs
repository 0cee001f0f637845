use super::csv_data_loader::CsvDataLoader;
use super::data_loader::DataLoader;
use crate::error::{PipelineError, Result};
use std::path::Path;

/// Factory pre vytváranie data loaderov podľa typu
pub struct DataLoaderFactory;

impl DataLoaderFactory {
    /// Vytvorí loader na základe typu
    pub fn create(loader_type: &str) -> Result<Box<dyn DataLoader>> {
        match loader_type.to_lowercase().as_str() {
            "csv" => Ok(Box::new(CsvDataLoader::new())),
            "tsv" => Ok(Box::new(CsvDataLoader::new().with_delimiter(b'\t'))),
            _ => Err(PipelineError::InvalidConfig(format!(
                "unknown loader type: {}, supported: {}",
                loader_type,
                Self::available_formats().join(", ")
            ))),
        }
    }

    /// Vyberie loader podľa prípony súboru; explicitný oddeľovač má prednosť.
    ///
    /// Stĺpce v `numeric_columns` musia byť v hlavičke a každá ich neprázdna
    /// bunka musí byť číslo, inak loader vráti `ParseError`.
    pub fn create_from_path(
        path: &Path,
        delimiter: Option<char>,
        numeric_columns: &[String],
    ) -> Result<Box<dyn DataLoader>> {
        let delimiter = match delimiter {
            Some(delimiter) => Some(delimiter),
            None => Self::delimiter_for_extension(path)?,
        };
        let mut loader = CsvDataLoader::new().with_numeric_columns(numeric_columns.to_vec());
        if let Some(delimiter) = delimiter {
            let byte = u8::try_from(delimiter).map_err(|_| {
                PipelineError::InvalidConfig(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    delimiter
                ))
            })?;
            loader = loader.with_delimiter(byte);
        }
        Ok(Box::new(loader))
    }

    fn delimiter_for_extension(path: &Path) -> Result<Option<char>> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("csv");
        match extension.to_lowercase().as_str() {
            "tsv" | "tab" => Ok(Some('\t')),
            "csv" | "txt" => Ok(None),
            other => Err(PipelineError::InvalidConfig(format!(
                "cannot pick a loader for extension '{}', supported: {}",
                other,
                Self::available_formats().join(", ")
            ))),
        }
    }

    /// Vráti zoznam všetkých podporovaných formátov
    pub fn available_formats() -> Vec<&'static str> {
        vec!["csv", "tsv"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_by_name() {
        assert_eq!(DataLoaderFactory::create("CSV").unwrap().get_name(), "CSV Data Loader");
        assert!(matches!(
            DataLoaderFactory::create("parquet"),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn picks_tab_for_tsv_extension() {
        let loader = DataLoaderFactory::create_from_path(Path::new("orders.tsv"), None, &[]).unwrap();
        let table = loader.load_from_string("a\tb\n1\t2\n").unwrap();
        assert_eq!(table.n_cols(), 2);
    }

    #[test]
    fn explicit_delimiter_wins() {
        let loader =
            DataLoaderFactory::create_from_path(Path::new("orders.csv"), Some(';'), &[]).unwrap();
        let table = loader.load_from_string("a;b\n1;2\n").unwrap();
        assert_eq!(table.n_cols(), 2);
    }

    #[test]
    fn unknown_extension_is_config_error() {
        assert!(matches!(
            DataLoaderFactory::create_from_path(Path::new("orders.xlsx"), None, &[]),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn declared_columns_reject_text_cells() {
        let numeric = vec!["score".to_string()];
        let loader = DataLoaderFactory::create_from_path(Path::new("orders.tsv"), None, &numeric).unwrap();

        let table = loader.load_from_string("id\tscore\n1\t4\n2\t\n").unwrap();
        assert_eq!(table.require("score").unwrap().null_count(), 1);

        match loader.load_from_string("id\tscore\n1\t4\n2\tfive\n") {
            Err(PipelineError::Parse(msg)) => assert!(msg.contains("five")),
            other => panic!("expected ParseError, got {:?}", other.map(|t| t.n_rows())),
        }
    }

    #[test]
    fn error_lists_supported_formats() {
        match DataLoaderFactory::create("xlsx") {
            Err(PipelineError::InvalidConfig(msg)) => {
                for format in DataLoaderFactory::available_formats() {
                    assert!(msg.contains(format), "{}", msg);
                }
            }
            _ => panic!("xlsx should not be supported"),
        }
    }
}
