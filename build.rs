use std::env;
use std::fs;
use std::path::Path;

// files the binary looks for next to itself
const RUNTIME_FILES: [&str; 2] = ["config.toml", "scene.json"];

fn main() {
    // Get the output directory from cargo
    let out_dir = env::var("OUT_DIR").unwrap();

    // OUT_DIR is target/<profile>/build/<pkg>/out; the binary lives three levels up
    let target_dir = Path::new(&out_dir)
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .parent()
        .unwrap();

    for file in RUNTIME_FILES {
        println!("cargo:rerun-if-changed={}", file);
        let source = Path::new(file);
        if source.exists() {
            fs::copy(source, target_dir.join(file)).unwrap();
        }
    }
}
