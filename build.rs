// Build script that runs wasm-pack into static/pkg and copies static/ to dist/.
use std::process::Command;
use std::{env, fs, path::Path};

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static/index.html");
    println!("cargo:rerun-if-changed=static/style.css");
    println!("cargo:rerun-if-env-changed=EMAILJS_SERVICE_ID");
    println!("cargo:rerun-if-env-changed=EMAILJS_TEMPLATE_ID");
    println!("cargo:rerun-if-env-changed=EMAILJS_PUBLIC_KEY");

    // Only run the wasm-pack build when targeting wasm32, and never from
    // inside wasm-pack itself.
    let target = env::var("TARGET").unwrap_or_default();
    let nested = env::var_os("INKFOLIO_NESTED_BUILD").is_some();
    if target == "wasm32-unknown-unknown" && !nested {
        let status = Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .env("INKFOLIO_NESTED_BUILD", "1")
            .status();

        match status {
            Ok(st) if !st.success() => println!("cargo:warning=wasm-pack build failed"),
            Ok(_) => {}
            Err(_) => println!("cargo:warning=wasm-pack not installed – skipping"),
        }
    }

    // Copy static/ to dist/
    let out_dir = Path::new("dist");
    if out_dir.exists() {
        fs::remove_dir_all(out_dir).ok();
    }
    fs::create_dir_all(out_dir).ok();

    let static_dir = Path::new("static");
    if static_dir.exists() {
        let options = CopyOptions::new().content_only(true).overwrite(true);
        if let Err(err) = copy(static_dir, out_dir, &options) {
            println!("cargo:warning=copying static assets failed: {err}");
        }
    }
}
