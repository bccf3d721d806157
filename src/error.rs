use thiserror::Error;

/// Why a URI Template could not be parsed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unclosed expression starting at offset {0}")]
    Unclosed(usize),
    #[error("unexpected '}}' at offset {0}")]
    StrayClose(usize),
    #[error("empty expression at offset {0}")]
    EmptyExpression(usize),
    #[error("invalid variable name '{name}' at offset {offset}")]
    InvalidVariable { name: String, offset: usize },
    #[error("invalid prefix length '{value}' for variable '{name}'")]
    InvalidPrefix { name: String, value: String },
    #[error("reserved operator '{0}' is not supported")]
    ReservedOperator(char),
}

/// Failure modes of an interactive collection
#[derive(Debug, Error)]
pub enum CollectError {
    /// The user abandoned the collection at some prompt
    #[error("input cancelled by user")]
    Cancelled,
    #[error("malformed URI template: {0}")]
    Template(#[from] TemplateError),
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl From<dialoguer::Error> for CollectError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                CollectError::Cancelled
            }
            dialoguer::Error::IO(e) => CollectError::Terminal(e),
        }
    }
}

impl CollectError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CollectError::Cancelled)
    }
}
