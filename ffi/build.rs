//! Generates `note_ffi.h` from the `extern "C"` surface into `$OUT_DIR/include`.

use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));
    let Ok(out_dir) = std::env::var("OUT_DIR") else {
        println!("cargo:warning=note_ffi.h not generated: OUT_DIR is not set");
        return;
    };
    let include_dir = PathBuf::from(out_dir).join("include");

    let bindings = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("NOTE_FFI_H")
        .with_no_includes()
        .with_sys_include("stdbool.h")
        .with_sys_include("stddef.h")
        .with_sys_include("stdint.h")
        .generate();

    let bindings = match bindings {
        Ok(bindings) => bindings,
        Err(err) => {
            println!("cargo:warning=note_ffi.h not generated: {err}");
            return;
        }
    };
    if let Err(err) = std::fs::create_dir_all(&include_dir) {
        println!("cargo:warning=cannot create {}: {err}", include_dir.display());
        return;
    }
    let header = include_dir.join("note_ffi.h");
    // `write_to_file` returns false when the header was already up to date.
    bindings.write_to_file(&header);
    if !header.is_file() {
        println!("cargo:warning=note_ffi.h missing at {}", header.display());
    }
}
