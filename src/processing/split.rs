use super::{CleaningOutput, DataStrategy};
use crate::config::SplitConfig;
use crate::data_loading::Table;
use crate::error::{PipelineError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{error, info, warn};

/// Train/test rozdelenie jednej vyčistenej tabuľky.
///
/// `train_rows`/`test_rows` sú indexy riadkov vo vstupnej tabuľke v poradí,
/// v akom sú v `x_train`/`x_test`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSplit {
    pub x_train: Table,
    pub x_test: Table,
    pub y_train: Vec<f64>,
    pub y_test: Vec<f64>,
    pub train_rows: Vec<usize>,
    pub test_rows: Vec<usize>,
}

/// Oddelí label stĺpec a náhodne (so seedom) rozdelí riadky na train/test
pub struct DataSplitStrategy {
    config: SplitConfig,
}

impl DataSplitStrategy {
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    fn split(&self, data: Table) -> Result<DataSplit> {
        let label = self.config.label_column.as_str();
        let test_size = self.config.test_size;
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "test_size must be in (0, 1), got {}",
                test_size
            )));
        }

        data.require(label)?;
        if let Some((name, column)) = data.iter().find(|(_, column)| !column.is_numeric()) {
            return Err(PipelineError::Schema(format!(
                "split expects numeric columns only, '{}' is {}",
                name,
                column.type_name()
            )));
        }

        let complete = data.complete_rows();
        let dropped = data.n_rows() - complete.len();
        if dropped > 0 {
            warn!(dropped, "dropping rows with missing values before split");
        }

        let n_samples = complete.len();
        let n_test = (test_size * n_samples as f64).ceil() as usize;
        let n_train = n_samples.saturating_sub(n_test);
        if n_test == 0 || n_train == 0 {
            return Err(PipelineError::EmptyData(format!(
                "{} usable rows cannot be split with test_size {}",
                n_samples, test_size
            )));
        }

        let mut order = complete;
        let mut rng = StdRng::seed_from_u64(self.config.random_state);
        order.shuffle(&mut rng);
        let (test_rows, train_rows) = order.split_at(n_test);

        let (x_train, y_train) = Self::features_and_labels(&data, train_rows, label)?;
        let (x_test, y_test) = Self::features_and_labels(&data, test_rows, label)?;

        Ok(DataSplit {
            x_train,
            x_test,
            y_train,
            y_test,
            train_rows: train_rows.to_vec(),
            test_rows: test_rows.to_vec(),
        })
    }

    fn features_and_labels(data: &Table, rows: &[usize], label: &str) -> Result<(Table, Vec<f64>)> {
        let mut features = data.take_rows(rows);
        let labels = features.numeric_values(label)?;
        features.drop_columns(&[label])?;
        Ok((features, labels))
    }
}

impl Default for DataSplitStrategy {
    fn default() -> Self {
        Self::new(SplitConfig::default())
    }
}

impl DataStrategy for DataSplitStrategy {
    fn get_name(&self) -> &str {
        "split"
    }

    fn handle_data(&self, data: Table) -> Result<CleaningOutput> {
        let split = self.split(data).inspect_err(|err| {
            error!(strategy = self.get_name(), error = %err, "error in splitting data");
        })?;
        info!(
            train_rows = split.train_rows.len(),
            test_rows = split.test_rows.len(),
            features = split.x_train.n_cols(),
            seed = self.config.random_state,
            "data splitting finished"
        );
        Ok(CleaningOutput::Split(split))
    }

    fn produces_split(&self) -> bool {
        true
    }
}
