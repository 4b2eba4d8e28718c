fn main() {
    println!("cargo:rustc-check-cfg=cfg(zx_grammar)");
    // Set by the tree-sitter-zx build script through its `links` key.
    println!("cargo:rerun-if-env-changed=DEP_TREE_SITTER_ZX_LINKED");
    if std::env::var("DEP_TREE_SITTER_ZX_LINKED").as_deref() == Ok("true") {
        println!("cargo:rustc-cfg=zx_grammar");
    }
}
