//! Integration tests for loading the ZX grammar.
//!
//! Tests that need the compiled zx grammar are ignored when the binding was
//! built without it; tree-sitter-go stands in as a known-good grammar.

use std::ffi::OsString;
use std::io::Write;

use pretty_assertions::assert_eq;
use tree_sitter::{LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION};
use zx_grammar::{
    is_retained, load_library, new_language, new_named_language, parser_for, GrammarLoadError,
    GrammarSource,
};

// ============================================================================
// Smoke test
// ============================================================================

#[test]
#[cfg_attr(not(zx_grammar), ignore = "zx grammar not compiled into tree-sitter-zx")]
fn test_can_load_grammar() {
    let entry = tree_sitter_zx::language_fn().expect("Error loading ZX grammar");
    let language = new_language(entry).expect("Error loading ZX grammar");
    parser_for("zx", &language).expect("Error loading ZX grammar");
}

#[test]
fn test_linked_source_matches_build() {
    let result = GrammarSource::Linked.load();
    if tree_sitter_zx::is_linked() {
        let grammar = result.expect("Error loading ZX grammar");
        assert_eq!(grammar.grammar(), "zx");
        assert!(!grammar.is_dynamic());
        assert!(grammar.parser().is_ok());
    } else {
        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error loading ZX grammar: not compiled into this build"
        );
    }
}

// ============================================================================
// Known-good grammar
// ============================================================================

#[test]
fn known_good_grammar_is_in_abi_range() {
    let language = new_named_language("go", tree_sitter_go::LANGUAGE).unwrap();
    let version = language.abi_version();
    assert!(version >= MIN_COMPATIBLE_LANGUAGE_VERSION);
    assert!(version <= LANGUAGE_VERSION);
}

#[test]
fn repeated_loads_all_parse() {
    for _ in 0..5 {
        let language = new_named_language("go", tree_sitter_go::LANGUAGE).unwrap();
        let mut parser = parser_for("go", &language).unwrap();
        let tree = parser
            .parse("package main\n\nfunc main() {}\n", None)
            .unwrap();
        assert!(!tree.root_node().has_error());
    }
}

// ============================================================================
// Broken artifacts
// ============================================================================

unsafe extern "C" fn null_entry() -> *const () {
    std::ptr::null()
}

#[test]
fn null_grammar_pointer_fails() {
    let entry = unsafe { tree_sitter_language::LanguageFn::from_raw(null_entry) };
    let err = new_language(entry).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error loading ZX grammar: entry point returned a null language"
    );
}

#[test]
fn absent_library_fails() {
    let dir = tempfile::tempdir().unwrap();
    let source = GrammarSource::library(dir.path().join("zx.so"));
    let err = source.load().unwrap_err();
    assert!(matches!(err, GrammarLoadError::Library { .. }));
    assert_eq!(err.grammar(), "ZX");
}

#[test]
fn corrupt_library_fails() {
    let mut file = tempfile::Builder::new().suffix(".so").tempfile().unwrap();
    file.write_all(&[0x7f, b'E', b'L', b'F', 0, 0, 0, 0]).unwrap();
    file.flush().unwrap();

    let err = load_library(file.path(), "tree_sitter_zx").unwrap_err();
    assert!(err.to_string().starts_with("Error loading ZX grammar"));
}

// ============================================================================
// Dynamic grammars
// ============================================================================

/// Compiled grammar library for the dynamic tests, e.g. tree-sitter-go's
/// `parser.c` built with `cc -shared -fPIC`.
const TEST_LIBRARY_ENV: &str = "ZX_TEST_GRAMMAR_LIBRARY";
const TEST_SYMBOL_ENV: &str = "ZX_TEST_GRAMMAR_SYMBOL";

#[test]
#[ignore = "needs a compiled grammar library in ZX_TEST_GRAMMAR_LIBRARY"]
fn parser_outlives_loaded_grammar() {
    let path = std::env::var_os(TEST_LIBRARY_ENV).expect("ZX_TEST_GRAMMAR_LIBRARY not set");
    let symbol = std::env::var(TEST_SYMBOL_ENV).unwrap_or_else(|_| "tree_sitter_zx".to_string());

    let mut parser = load_library(&path, &symbol).unwrap().parser().unwrap();
    assert!(is_retained(&path));

    let tree = parser.parse("\n", None).unwrap();
    assert!(!tree.root_node().kind().is_empty());

    let reloaded = load_library(&path, &symbol).unwrap();
    assert!(reloaded.is_dynamic());
    assert_eq!(reloaded.library_path(), Some(std::path::Path::new(&path)));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn source_follows_library_variable() {
    assert_eq!(GrammarSource::from_var(None), GrammarSource::Linked);
    assert_eq!(
        GrammarSource::from_var(Some(OsString::new())),
        GrammarSource::Linked
    );
    assert_eq!(
        GrammarSource::from_var(Some(OsString::from("/opt/grammars/zx.so"))),
        GrammarSource::library("/opt/grammars/zx.so")
    );
}
