use std::{env, path::PathBuf};

use wiregen::Generator;

fn main() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let schemas = manifest_dir.join("schemas");
    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));

    println!("cargo:rerun-if-changed={}", schemas.display());

    let report = Generator::builder("conformance")
        .build()
        .generate(&[&schemas], &out_dir)
        .unwrap_or_else(|err| panic!("{err}"));
    for path in &report.written {
        println!("cargo:rerun-if-changed={}", path.display());
    }
}
