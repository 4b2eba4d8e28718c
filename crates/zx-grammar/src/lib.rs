//! Loading the ZX tree-sitter grammar.
//!
//! A grammar is only handed out as a [`tree_sitter::Language`] once its entry
//! point returned a non-null pointer with an ABI version this runtime
//! supports. Anything else is a [`GrammarLoadError`] reading
//! "Error loading ZX grammar: ...".
//!
//! # Example
//!
//! ```rust,no_run
//! let grammar = zx_grammar::load_zx().expect("Error loading ZX grammar");
//! let mut parser = grammar.parser().unwrap();
//! let tree = parser.parse("const x = 1;", None).unwrap();
//! println!("{}", tree.root_node().to_sexp());
//! ```

pub mod error;
pub mod library;
pub mod loader;
pub mod source;

pub use error::{GrammarLoadError, Result};
pub use library::{is_retained, load_library, LoadedGrammar};
pub use loader::{new_language, new_named_language, parser_for};
pub use source::{GrammarSource, LIBRARY_ENV};

/// Load the ZX grammar from `ZX_GRAMMAR_LIBRARY` if set, or from the linked
/// binding.
pub fn load_zx() -> Result<LoadedGrammar> {
    GrammarSource::from_env().load()
}
