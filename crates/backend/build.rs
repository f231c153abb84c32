use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Кладёт config.toml из корня workspace рядом с собранным бинарником,
/// где его ищет `load_config()`
fn main() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .ancestors()
        .nth(2)
        .expect("backend crate must live in <root>/crates/backend");
    let source_config = workspace_root.join("config.toml");
    println!("cargo:rerun-if-changed={}", source_config.display());

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let profile = env::var("PROFILE").expect("PROFILE is set by cargo");
    // OUT_DIR: target/<profile>/build/returns-backend-xxx/out
    let Some(target_dir) = out_dir.ancestors().find(|p| p.ends_with(&profile)) else {
        println!("cargo:warning=profile directory not found above {:?}", out_dir);
        return;
    };

    copy_config(&source_config, &target_dir.join("config.toml"));
}

fn copy_config(from: &Path, to: &Path) {
    if !from.exists() {
        println!("cargo:warning=config.toml not found at {:?}, embedded defaults apply", from);
        return;
    }
    if let Err(e) = fs::copy(from, to) {
        panic!("Failed to copy config.toml to {:?}: {}", to, e);
    }
}
