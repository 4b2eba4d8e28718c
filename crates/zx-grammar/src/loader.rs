//! Turning a grammar entry point into a [`Language`].

use tracing::{debug, warn};
use tree_sitter::{Language, Parser, LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION};
use tree_sitter_language::LanguageFn;

use crate::error::{GrammarLoadError, Result};

/// Upper-cased grammar name used in error messages.
pub(crate) fn display_name(grammar: &str) -> String {
    grammar.to_uppercase()
}

/// Build the ZX [`Language`] from its entry point.
///
/// Fails if the entry point returns null or a grammar generated for an ABI
/// this runtime does not support.
pub fn new_language(entry: LanguageFn) -> Result<Language> {
    new_named_language(tree_sitter_zx::GRAMMAR_NAME, entry)
}

/// Same as [`new_language`] for an arbitrary grammar; `grammar` only names it
/// in logs and errors.
pub fn new_named_language(grammar: &str, entry: LanguageFn) -> Result<Language> {
    let raw = entry.into_raw();
    // Safety: generated entry points take no arguments and return a pointer
    // to static grammar tables, or null.
    let ptr = unsafe { raw() };
    if ptr.is_null() {
        warn!(grammar, "grammar entry point returned null");
        return Err(GrammarLoadError::NullLanguage {
            name: display_name(grammar),
        });
    }

    // Safety: `ptr` is non-null and points at a `TSLanguage`, whose first
    // field is the `u32` ABI version.
    let version = unsafe { ptr.cast::<u32>().read() } as usize;
    if !(MIN_COMPATIBLE_LANGUAGE_VERSION..=LANGUAGE_VERSION).contains(&version) {
        warn!(
            grammar,
            version,
            min = MIN_COMPATIBLE_LANGUAGE_VERSION,
            max = LANGUAGE_VERSION,
            "grammar ABI version not supported"
        );
        return Err(GrammarLoadError::IncompatibleVersion {
            name: display_name(grammar),
            version,
            min: MIN_COMPATIBLE_LANGUAGE_VERSION,
            max: LANGUAGE_VERSION,
        });
    }

    debug!(grammar, version, "grammar loaded");
    // Safety: `raw` came out of a `LanguageFn` above.
    Ok(Language::new(unsafe { LanguageFn::from_raw(raw) }))
}

/// Create a parser and hand it `language`, as an editor would before the
/// first parse.
pub fn parser_for(grammar: &str, language: &Language) -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(language)
        .map_err(|source| GrammarLoadError::ParserRejected {
            name: display_name(grammar),
            source,
        })?;
    Ok(parser)
}
