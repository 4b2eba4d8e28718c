//! Where the ZX grammar comes from.

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{GrammarLoadError, Result};
use crate::library::{load_library, LoadedGrammar};
use crate::loader::{display_name, new_language};

/// Environment variable naming a compiled ZX grammar library.
pub const LIBRARY_ENV: &str = "ZX_GRAMMAR_LIBRARY";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GrammarSource {
    /// The grammar statically linked into `tree-sitter-zx`.
    #[default]
    Linked,
    /// A compiled grammar shared library.
    Library { path: PathBuf, symbol: String },
}

impl GrammarSource {
    /// A shared library exporting the standard `tree_sitter_zx` symbol.
    pub fn library(path: impl Into<PathBuf>) -> Self {
        GrammarSource::Library {
            path: path.into(),
            symbol: tree_sitter_zx::ENTRY_SYMBOL.to_string(),
        }
    }

    /// `Library` if `ZX_GRAMMAR_LIBRARY` is set and non-empty, `Linked`
    /// otherwise.
    pub fn from_env() -> Self {
        Self::from_var(std::env::var_os(LIBRARY_ENV))
    }

    /// Interpret a value of `ZX_GRAMMAR_LIBRARY`.
    pub fn from_var(value: Option<OsString>) -> Self {
        match value {
            Some(path) if !path.is_empty() => Self::library(path),
            _ => GrammarSource::Linked,
        }
    }

    pub fn load(&self) -> Result<LoadedGrammar> {
        match self {
            GrammarSource::Linked => {
                debug!("loading linked ZX grammar");
                let entry =
                    tree_sitter_zx::language_fn().ok_or_else(|| GrammarLoadError::NotLinked {
                        name: display_name(tree_sitter_zx::GRAMMAR_NAME),
                    })?;
                let language = new_language(entry)?;
                Ok(LoadedGrammar::linked(tree_sitter_zx::GRAMMAR_NAME, language))
            }
            GrammarSource::Library { path, symbol } => load_library(path, symbol),
        }
    }
}
