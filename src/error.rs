use miette::Diagnostic;
use thiserror::Error;

/// Main error type for vectile operations
#[derive(Error, Diagnostic, Debug)]
pub enum VectileError {
    #[error("IO error: {0}")]
    #[diagnostic(code(vectile::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(vectile::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Tile decode error: {message}")]
    #[diagnostic(code(vectile::decode))]
    Decode { message: String },

    #[error("Document error: {message}")]
    #[diagnostic(code(vectile::document))]
    Document {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, VectileError>;
