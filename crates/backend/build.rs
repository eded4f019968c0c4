use std::env;
use std::fs;
use std::path::Path;

/// Files copied from the workspace root next to the built binary,
/// where `load_config` and `resolve_path` look first.
const RUNTIME_FILES: &[&str] = &["config.toml", "data/index_patterns.json"];

fn main() {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let profile = env::var("PROFILE").expect("PROFILE is set by cargo");

    // OUT_DIR is target/<profile>/build/<pkg>-<hash>/out
    let Some(target_dir) = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
    else {
        println!("cargo:warning=target profile directory not found, runtime files not copied");
        return;
    };

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");

    for file in RUNTIME_FILES {
        println!("cargo:rerun-if-changed=../../{}", file);

        let source = workspace_root.join(file);
        if !source.exists() {
            println!("cargo:warning={} not found, using built-in defaults", file);
            continue;
        }

        let dest = target_dir.join(file);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Failed to create {}: {}", parent.display(), e));
        }
        fs::copy(&source, &dest)
            .unwrap_or_else(|e| panic!("Failed to copy {}: {}", file, e));
    }
}
