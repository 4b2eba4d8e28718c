//! Tree-sitter language bindings for ZX.
//!
//! The generated grammar is compiled by the build script when its sources are
//! present. Without them the crate still builds, [`language_fn`] returns
//! `None` and [`LANGUAGE`] is not defined.
//!
//! ```
//! if let Some(language) = tree_sitter_zx::language_fn() {
//!     let mut parser = tree_sitter::Parser::new();
//!     parser
//!         .set_language(&language.into())
//!         .expect("Error loading ZX grammar");
//! }
//! ```

use tree_sitter_language::LanguageFn;

/// Name of the grammar, as passed to `tree-sitter generate`.
pub const GRAMMAR_NAME: &str = "zx";

/// Symbol exported by the compiled grammar.
pub const ENTRY_SYMBOL: &str = "tree_sitter_zx";

#[cfg(zx_grammar)]
extern "C" {
    fn tree_sitter_zx() -> *const ();
}

/// The tree-sitter [`LanguageFn`] for ZX.
#[cfg(zx_grammar)]
pub const LANGUAGE: LanguageFn = unsafe { LanguageFn::from_raw(tree_sitter_zx) };

/// The content of the grammar's `node-types.json`.
#[cfg(zx_node_types)]
pub const NODE_TYPES: &str = include_str!(concat!(env!("OUT_DIR"), "/node-types.json"));

/// The syntax highlighting query for ZX.
#[cfg(zx_highlights)]
pub const HIGHLIGHTS_QUERY: &str = include_str!(concat!(env!("OUT_DIR"), "/highlights.scm"));

/// The language injection query for ZX.
#[cfg(zx_injections)]
pub const INJECTIONS_QUERY: &str = include_str!(concat!(env!("OUT_DIR"), "/injections.scm"));

/// The local-variable query for ZX.
#[cfg(zx_locals)]
pub const LOCALS_QUERY: &str = include_str!(concat!(env!("OUT_DIR"), "/locals.scm"));

/// The symbol tagging query for ZX.
#[cfg(zx_tags)]
pub const TAGS_QUERY: &str = include_str!(concat!(env!("OUT_DIR"), "/tags.scm"));

/// Returns the grammar entry point, or `None` if the crate was built without
/// the generated grammar.
pub fn language_fn() -> Option<LanguageFn> {
    #[cfg(zx_grammar)]
    {
        Some(LANGUAGE)
    }
    #[cfg(not(zx_grammar))]
    {
        None
    }
}

/// Whether the generated grammar was compiled into this crate.
pub fn is_linked() -> bool {
    cfg!(zx_grammar)
}

/// Returns the JSON description of the node types, if the grammar shipped one.
pub fn node_types_json() -> Option<&'static str> {
    #[cfg(zx_node_types)]
    {
        Some(NODE_TYPES)
    }
    #[cfg(not(zx_node_types))]
    {
        None
    }
}
