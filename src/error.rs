use thiserror::Error;

/// Errors that can occur while searching for recipes
#[derive(Error, Debug)]
pub enum FinderError {
    /// The ingredient input was empty after trimming
    #[error("Please enter at least one ingredient")]
    EmptyQuery,

    /// The recipe API answered with a non-success status
    #[error("HTTP Error: {status}")]
    HttpStatus { status: u16 },

    /// Failed to reach the recipe API or read its response
    #[error("Failed to fetch: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The recipe API returned a body we could not understand
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// No API key in the builder, config file or environment
    #[error("Spoonacular API key not found in config or environment")]
    MissingApiKey,

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Failed to read input or write output
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FinderError>;
