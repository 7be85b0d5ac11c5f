//! Build script for the top tracks sync server.
//!
//! Copies the `.env.example` template next to the location where
//! `config::load_env` looks for the user's `.env`, so a fresh install has a
//! ready-to-edit example at:
//! - Linux: `~/.local/share/topsync/.env.example`
//! - macOS: `~/Library/Application Support/topsync/.env.example`
//! - Windows: `%LOCALAPPDATA%/topsync/.env.example`
//!
//! Failing to copy never fails the build; it is reported as a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Re-run if the template changes
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("topsync");

    let copied = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")));
    if let Err(e) = copied {
        println!(
            "cargo:warning=could not copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
