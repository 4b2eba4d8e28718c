use std::path::{Path, PathBuf};

const SRC_ENV: &str = "TREE_SITTER_ZX_SRC";

/// Query files shipped next to the grammar, with the cfg each one enables.
const QUERIES: &[(&str, &str)] = &[
    ("highlights.scm", "zx_highlights"),
    ("injections.scm", "zx_injections"),
    ("locals.scm", "zx_locals"),
    ("tags.scm", "zx_tags"),
];

fn main() {
    for cfg in ["zx_grammar", "zx_node_types"]
        .into_iter()
        .chain(QUERIES.iter().map(|(_, cfg)| *cfg))
    {
        println!("cargo:rustc-check-cfg=cfg({cfg})");
    }
    println!("cargo:rerun-if-env-changed={SRC_ENV}");

    let grammar_dir = match std::env::var_os(SRC_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => {
            let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap());
            manifest_dir
                .parent()
                .expect("crates dir")
                .parent()
                .expect("workspace root")
                .join("tree-sitter-zx")
                .join("src")
        }
    };
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());

    let parser = grammar_dir.join("parser.c");
    let scanner = grammar_dir.join("scanner.c");
    println!("cargo:rerun-if-changed={}", parser.display());
    println!("cargo:rerun-if-changed={}", scanner.display());

    if !parser.exists() {
        println!(
            "cargo:warning=ZX grammar not found at {}; building without tree_sitter_zx (run `tree-sitter generate` or set {SRC_ENV})",
            parser.display()
        );
        println!("cargo:linked=false");
        return;
    }

    let mut build = cc::Build::new();
    build
        .include(&grammar_dir)
        .flag_if_supported("-std=c11")
        .warnings(false)
        .file(&parser);
    if scanner.exists() {
        build.file(&scanner);
    }
    #[cfg(target_env = "msvc")]
    build.flag("-utf-8");
    build.compile("tree-sitter-zx");

    println!("cargo:rustc-cfg=zx_grammar");
    // Read by dependents' build scripts as DEP_TREE_SITTER_ZX_LINKED.
    println!("cargo:linked=true");

    bundle(
        &grammar_dir.join("node-types.json"),
        &out_dir.join("node-types.json"),
        "zx_node_types",
    );

    // `queries/` sits beside `src/`, as in the grammar's package layout.
    let queries_dir = grammar_dir
        .parent()
        .map(|root| root.join("queries"))
        .unwrap_or_else(|| grammar_dir.join("queries"));
    for (file, cfg) in QUERIES {
        bundle(&queries_dir.join(file), &out_dir.join(file), cfg);
    }
}

/// Copy `src` into OUT_DIR for `include_str!` and enable `cfg` if it exists.
fn bundle(src: &Path, dst: &Path, cfg: &str) {
    println!("cargo:rerun-if-changed={}", src.display());
    if !src.exists() {
        return;
    }
    std::fs::copy(src, dst)
        .unwrap_or_else(|e| panic!("failed to copy {}: {e}", src.display()));
    println!("cargo:rustc-cfg={cfg}");
}
