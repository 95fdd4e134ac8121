//! `xtask` — workspace automation for the project.
//!
//! Keeps the checked-in office map fixture in step with the generator:
//! `regen-map` rewrites it, `check-map` fails when it has drifted.
use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail};
use log::info;
use officemap::{MapDocument, generate_map};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixture path, relative to the workspace root, that the engine loads.
const DEFAULT_FIXTURE: &str = "godot-src/office_demo_generated.json";

/// Top-level CLI entry point for the xtask binary.
#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks
    Check,
    /// Regenerate the office map fixture from the built-in layout.
    RegenMap {
        /// Fixture to write
        #[arg(long, default_value = DEFAULT_FIXTURE)]
        path: PathBuf,
    },
    /// Fail if the fixture on disk differs from a fresh generation.
    CheckMap {
        /// Fixture to compare
        #[arg(long, default_value = DEFAULT_FIXTURE)]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();
    let cli = Cli::parse();
    let root = env::current_dir()?;
    match cli.command {
        Commands::Check => check_map(&root.join(DEFAULT_FIXTURE)),
        Commands::RegenMap { path } => regen_map(&root.join(path)),
        Commands::CheckMap { path } => check_map(&root.join(path)),
    }
}

/// Writes a freshly generated map to `path`, creating parent directories as needed.
fn regen_map(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let document = generate_map()?;
    document.write(path).wrap_err_with(|| format!("writing {}", path.display()))?;
    info!("wrote {} ({:016x})", path.display(), document.fingerprint()?);
    println!("Regenerated {}", path.display());
    Ok(())
}

/// Compares the fixture at `path` byte-for-byte against a fresh generation.
///
/// The fixture must also load as a well-formed map document, so a hand-edited
/// file that still parses is reported separately from one that does not.
fn check_map(path: &Path) -> Result<()> {
    let on_disk = fs::read_to_string(path)
        .wrap_err_with(|| format!("reading fixture {}", path.display()))?;
    MapDocument::from_json(&on_disk)
        .wrap_err_with(|| format!("fixture {} is not a valid map", path.display()))?;

    let fresh = generate_map()?.to_json_pretty()?;
    if on_disk != fresh {
        bail!("{} is stale; run `cargo xtask regen-map`", path.display());
    }
    println!("{} is up to date.", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regenerated_fixture_passes_check() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("godot-src").join("office_demo_generated.json");

        regen_map(&path)?;
        check_map(&path)?;
        Ok(())
    }

    #[test]
    fn edited_fixture_is_reported_stale() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("office.json");
        regen_map(&path)?;

        let edited =
            fs::read_to_string(&path)?.replacen("\"special\": \"spawn\"", "\"special\": \"\"", 1);
        fs::write(&path, edited)?;

        let err = check_map(&path).unwrap_err();
        assert!(err.to_string().contains("is stale"));
        Ok(())
    }

    #[test]
    fn unparseable_fixture_is_rejected() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("office.json");
        fs::write(&path, "{\"dimensions\": {}}")?;

        let err = check_map(&path).unwrap_err();
        assert!(err.to_string().contains("is not a valid map"));
        Ok(())
    }

    #[test]
    fn missing_fixture_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        assert!(check_map(&temp.path().join("absent.json")).is_err());
    }
}
