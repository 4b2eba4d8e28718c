//! Loading compiled grammars from shared libraries.
//!
//! Grammar libraries are never unloaded. A [`Language`] points into the
//! library's static tables and can be cloned into parsers that outlive any
//! single [`LoadedGrammar`], so opened libraries stay in a process-wide
//! registry keyed by path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

use libloading::{Library, Symbol};
use tracing::{debug, warn};
use tree_sitter::Language;
use tree_sitter_language::LanguageFn;

use crate::error::{GrammarLoadError, Result};
use crate::loader::{display_name, new_named_language, parser_for};

static LIBRARIES: OnceLock<Mutex<HashMap<PathBuf, &'static Library>>> = OnceLock::new();

/// A loaded grammar and, for dynamic grammars, the library it came from.
pub struct LoadedGrammar {
    grammar: String,
    language: Language,
    library_path: Option<PathBuf>,
}

impl LoadedGrammar {
    pub(crate) fn linked(grammar: &str, language: Language) -> Self {
        Self {
            grammar: grammar.to_string(),
            language,
            library_path: None,
        }
    }

    /// Grammar name, e.g. `zx`.
    pub fn grammar(&self) -> &str {
        &self.grammar
    }

    /// The validated language handle.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// True if the grammar came from a shared library rather than the
    /// linked binding.
    pub fn is_dynamic(&self) -> bool {
        self.library_path.is_some()
    }

    /// Path of the shared library, for dynamic grammars.
    pub fn library_path(&self) -> Option<&Path> {
        self.library_path.as_deref()
    }

    /// A parser already configured for this grammar. It stays valid after
    /// `self` is dropped.
    pub fn parser(&self) -> Result<tree_sitter::Parser> {
        parser_for(&self.grammar, &self.language)
    }
}

impl std::fmt::Debug for LoadedGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedGrammar")
            .field("grammar", &self.grammar)
            .field("abi_version", &self.language.abi_version())
            .field("library_path", &self.library_path)
            .finish()
    }
}

/// Whether the library at `path` was opened by [`load_library`] and is
/// being kept loaded.
pub fn is_retained(path: impl AsRef<Path>) -> bool {
    LIBRARIES
        .get()
        .map(|libraries| {
            libraries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .contains_key(path.as_ref())
        })
        .unwrap_or(false)
}

/// Open `path` once and keep it loaded for the rest of the process.
fn open_retained(path: &Path, grammar: &str) -> Result<&'static Library> {
    let mut libraries = LIBRARIES
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(&library) = libraries.get(path) {
        return Ok(library);
    }

    // Safety: loading a library runs its initialisers; compiled grammars
    // have none beyond static data.
    let library = unsafe { Library::new(path) }.map_err(|source| {
        warn!(path = %path.display(), error = %source, "cannot open grammar library");
        GrammarLoadError::Library {
            name: display_name(grammar),
            path: path.to_path_buf(),
            source,
        }
    })?;
    let library: &'static Library = Box::leak(Box::new(library));
    libraries.insert(path.to_path_buf(), library);
    Ok(library)
}

/// Grammar name from an entry symbol: `tree_sitter_zx` -> `zx`.
fn grammar_from_symbol(symbol: &str) -> &str {
    symbol.strip_prefix("tree_sitter_").unwrap_or(symbol)
}

/// Load a grammar from the shared library at `path` through its `symbol`
/// entry point.
pub fn load_library(path: impl AsRef<Path>, symbol: &str) -> Result<LoadedGrammar> {
    let path = path.as_ref();
    let grammar = grammar_from_symbol(symbol);
    debug!(path = %path.display(), symbol, "loading grammar library");

    let library = open_retained(path, grammar)?;

    // Safety: tree-sitter entry points are `const TSLanguage *(void)`.
    let func: Symbol<'static, unsafe extern "C" fn() -> *const ()> =
        unsafe { library.get(symbol.as_bytes()) }.map_err(|source| {
            warn!(symbol, error = %source, "grammar entry point not found");
            GrammarLoadError::Symbol {
                name: display_name(grammar),
                symbol: symbol.to_string(),
                source,
            }
        })?;
    let entry = unsafe { LanguageFn::from_raw(*func) };

    let language = new_named_language(grammar, entry)?;
    Ok(LoadedGrammar {
        grammar: grammar.to_string(),
        language,
        library_path: Some(path.to_path_buf()),
    })
}
