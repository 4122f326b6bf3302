//! Build script for the ChromaticBot backend.
//!
//! Copies the `.env.example` template into the platform data directory so a
//! fresh install finds a documented configuration next to where
//! `config::load_env` looks for the real `.env`.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` to `<data_local_dir>/chromabot/.env.example`.
///
/// - Linux: `~/.local/share/chromabot/.env.example`
/// - macOS: `~/Library/Application Support/chromabot/.env.example`
/// - Windows: `%LOCALAPPDATA%/chromabot/.env.example`
///
/// A missing template only produces a cargo warning. Failing to create the
/// target directory or to write the copy fails the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("chromabot");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
