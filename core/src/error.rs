use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Cannot fetch '{reference}': {reason}")]
    Fetch { reference: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Product '{product_id}' not found in pricing data")]
    UnknownProduct { product_id: String },

    #[error("Price change {percent}% outside allowed range [{min}%, {max}%]")]
    PriceChangeOutOfRange { percent: f64, min: f64, max: f64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type InsightsResult<T> = Result<T, InsightsError>;
