use super::table::Table;
use crate::error::Result;
use std::path::Path;

/// Strategy pattern pre načítanie dát z rôznych zdrojov
pub trait DataLoader {
    /// Názov loadera
    fn get_name(&self) -> &str;

    /// Načíta tabuľku zo súboru
    fn load(&self, path: &Path) -> Result<Table>;

    /// Načíta tabuľku zo stringu
    fn load_from_string(&self, data: &str) -> Result<Table>;
}
