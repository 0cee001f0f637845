use thiserror::Error;

/// Výsledok operácií pipeline
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Chyby, ktoré môže vrátiť ktorýkoľvek krok pipeline.
///
/// Každý krok chybu zaloguje a vráti ju volajúcemu nezmenenú.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Vstupný súbor neexistuje.
    #[error("input not found: {0}")]
    NotFound(String),
    /// Zdrojové dáta sú poškodené (nerovnaký počet stĺpcov, zlé číslo, ...).
    #[error("parse error: {0}")]
    Parse(String),
    /// Očakávaný stĺpec chýba alebo má zlý typ.
    #[error("schema error: {0}")]
    Schema(String),
    /// Dĺžky vstupov nesedia.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
    /// Neznámy názov modelu.
    #[error("model {0} is not supported")]
    UnsupportedModel(String),
    /// Numerické zlyhanie fitu (singulárna matica, NaN koeficienty).
    #[error("numerical error: {0}")]
    Numerical(String),
    /// Neplatná konfigurácia.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Po vyčistení/rozdelení nezostali žiadne dáta.
    #[error("empty data: {0}")]
    EmptyData(String),
    /// Metric sink zlyhal.
    #[error("tracking error: {0}")]
    Tracking(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Krátky názov druhu chyby pre logy
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::NotFound(_) => "NotFoundError",
            PipelineError::Parse(_) => "ParseError",
            PipelineError::Schema(_) => "SchemaError",
            PipelineError::ShapeMismatch { .. } => "ShapeMismatchError",
            PipelineError::UnsupportedModel(_) => "UnsupportedModelError",
            PipelineError::Numerical(_) => "NumericalError",
            PipelineError::InvalidConfig(_) => "ConfigError",
            PipelineError::EmptyData(_) => "EmptyDataError",
            PipelineError::Tracking(_) => "TrackingError",
            PipelineError::Io(_) => "IoError",
        }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::InvalidConfig(err.to_string())
    }
}
