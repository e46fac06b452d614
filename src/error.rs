use miette::Diagnostic;
use thiserror::Error;

/// Main error type for reflexpx operations
#[derive(Error, Diagnostic, Debug)]
pub enum ReflexError {
    #[error("IO error: {0}")]
    #[diagnostic(code(reflexpx::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(reflexpx::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(reflexpx::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(reflexpx::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Could not decode {path}: {message}")]
    #[diagnostic(code(reflexpx::image))]
    Image {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Watch error: {message}")]
    #[diagnostic(code(reflexpx::watch))]
    Watch { message: String },
}

pub type Result<T> = std::result::Result<T, ReflexError>;
