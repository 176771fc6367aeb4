use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbpagerError {
    #[error("catalog: {message}")]
    Catalog { message: String },

    #[error("source: {message}")]
    Source { message: String },

    #[error("connection: {message}")]
    Connection { message: String },

    #[error("unknown table: '{name}' is not in the catalog")]
    UnknownTable { name: String },

    #[error("config: {message}")]
    Config { message: String },

    #[error("format: {message}")]
    Format { message: String },

    #[error("terminal: {message}")]
    Terminal { message: String },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
