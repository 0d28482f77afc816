//! Generate UniFFI Swift bindings for emojikit
//!
//! Run: cargo run --bin generate-bindings [-- <host package dir>]
//!
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │ Inputs:                                                                     │
//! │   target/release/libemojikit.dylib     ← Built library for bindgen          │
//! │                                                                             │
//! │ Outputs (under the host package dir, default: workspace root):              │
//! │   Sources/EmojiKitFFI/emojikitFFI.h           ← C header                    │
//! │   Sources/EmojiKitFFI/module.modulemap        ← Clang module map            │
//! │   Sources/EmojiKitFFI/libemojikit.a           ← Universal static lib        │
//! │   Sources/EmojiKit/emojikit.swift             ← Swift bindings              │
//! └─────────────────────────────────────────────────────────────────────────────┘

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() -> Result<()> {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = crate_dir.parent().context("crate has no parent directory")?;
    let package_root = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| workspace_root.to_path_buf());

    // Match the deployment target of the Swift package
    env::set_var("MACOSX_DEPLOYMENT_TARGET", "15.0");

    println!("Building Rust library...");
    run_cmd("cargo", &["build", "--release", "-p", "emojikit"], workspace_root)?;

    let generated = workspace_root.join("target/generated");
    println!("Generating Swift bindings...");
    run_cmd(
        "cargo",
        &[
            "run",
            "-p",
            "emojikit",
            "--bin",
            "uniffi-bindgen",
            "generate",
            "--library",
            "target/release/libemojikit.dylib",
            "--language",
            "swift",
            "--out-dir",
            &generated.to_string_lossy(),
        ],
        workspace_root,
    )?;

    let ffi_dest = package_root.join("Sources/EmojiKitFFI");
    let swift_dest = package_root.join("Sources/EmojiKit");
    fs::create_dir_all(&ffi_dest)?;
    fs::create_dir_all(&swift_dest)?;

    // Swift 6 strict concurrency + renamed FFI module
    println!("Copying generated Swift file...");
    let swift_content = fs::read_to_string(generated.join("emojikit.swift"))
        .context("reading generated Swift bindings")?
        .replace(
            "private var initializationResult",
            "nonisolated(unsafe) private var initializationResult",
        )
        .replace("#if canImport(emojikitFFI)", "#if canImport(EmojiKitFFI)")
        .replace("import emojikitFFI", "import EmojiKitFFI");
    fs::write(swift_dest.join("emojikit.swift"), swift_content)?;

    fs::copy(generated.join("emojikitFFI.h"), ffi_dest.join("emojikitFFI.h"))
        .context("copying C header")?;

    println!("Writing modulemap...");
    fs::write(
        ffi_dest.join("module.modulemap"),
        "module EmojiKitFFI {\n    header \"emojikitFFI.h\"\n    export *\n}\n",
    )?;

    println!("Building universal static library...");
    for target in ["aarch64-apple-darwin", "x86_64-apple-darwin"] {
        run_cmd("cargo", &["build", "--release", "-p", "emojikit", "--target", target], workspace_root)?;
    }
    run_cmd(
        "lipo",
        &[
            "-create",
            "target/aarch64-apple-darwin/release/libemojikit.a",
            "target/x86_64-apple-darwin/release/libemojikit.a",
            "-output",
            &ffi_dest.join("libemojikit.a").to_string_lossy(),
        ],
        workspace_root,
    )?;

    println!("Done! Bindings regenerated successfully.");
    println!("  - {}/emojikit.swift", swift_dest.display());
    println!("  - {}/emojikitFFI.h", ffi_dest.display());
    println!("  - {}/module.modulemap", ffi_dest.display());
    println!("  - {}/libemojikit.a", ffi_dest.display());
    Ok(())
}

fn run_cmd(program: &str, args: &[&str], dir: &Path) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("failed to run {program}"))?;

    if !status.success() {
        bail!("{program} failed with status: {status}");
    }
    Ok(())
}
