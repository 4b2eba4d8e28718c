//! Error types for grammar loading.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can occur while loading a grammar.
///
/// `name` is the upper-cased grammar name, e.g. `ZX`.
#[derive(Error, Debug)]
pub enum GrammarLoadError {
    #[error("Error loading {name} grammar: entry point returned a null language")]
    NullLanguage { name: String },

    #[error("Error loading {name} grammar: ABI version {version} is outside the supported range {min}..={max}")]
    IncompatibleVersion {
        name: String,
        version: usize,
        min: usize,
        max: usize,
    },

    #[error("Error loading {name} grammar: parser rejected the language")]
    ParserRejected {
        name: String,
        #[source]
        source: tree_sitter::LanguageError,
    },

    #[error("Error loading {name} grammar: cannot open library {}", .path.display())]
    Library {
        name: String,
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("Error loading {name} grammar: symbol '{symbol}' not found")]
    Symbol {
        name: String,
        symbol: String,
        #[source]
        source: libloading::Error,
    },

    #[error("Error loading {name} grammar: not compiled into this build")]
    NotLinked { name: String },
}

impl GrammarLoadError {
    /// The upper-cased name of the grammar that failed to load.
    pub fn grammar(&self) -> &str {
        match self {
            GrammarLoadError::NullLanguage { name }
            | GrammarLoadError::IncompatibleVersion { name, .. }
            | GrammarLoadError::ParserRejected { name, .. }
            | GrammarLoadError::Library { name, .. }
            | GrammarLoadError::Symbol { name, .. }
            | GrammarLoadError::NotLinked { name } => name,
        }
    }
}

/// Result type alias for grammar loading
pub type Result<T> = std::result::Result<T, GrammarLoadError>;
