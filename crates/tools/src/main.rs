use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use officemap::{MapGenerator, OfficeLayout};

const DEFAULT_OUTPUT: &str = "godot-src/office_demo_generated.json";

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate the static office map JSON", long_about = None)]
struct Args {
    /// Where to write the map JSON. The parent directory must already exist.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// TOML layout to generate instead of the built-in demo office
    #[arg(short, long)]
    layout: Option<PathBuf>,
    /// Skip the summary report
    #[arg(short, long)]
    quiet: bool,
}

fn load_layout(path: Option<&PathBuf>) -> Result<OfficeLayout> {
    match path {
        Some(path) => OfficeLayout::load(path)
            .with_context(|| format!("Failed to load layout file: {}", path.display())),
        None => Ok(OfficeLayout::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !args.quiet {
        println!("Generating office map...");
    }

    let layout = load_layout(args.layout.as_ref())?;
    let generator = MapGenerator::new(layout).with_context(|| "Layout failed validation")?;
    let layout = generator.layout();
    info!(
        "layout {}x{} with {} zones ({} enclosed)",
        layout.width,
        layout.height,
        layout.zones.len(),
        layout.enclosed_zones().count()
    );
    let document = generator.generate().with_context(|| "Map generation failed")?;
    info!("generated {} tiles across {} zones", document.tilemap.len(), document.zones.len());

    document
        .write(&args.output)
        .with_context(|| format!("Failed to write map file: {}", args.output.display()))?;

    if !args.quiet {
        println!("Office map generated: {}", args.output.display());
        println!("{}", document.summary()?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_targets_the_engine_fixture() {
        let args = Args::try_parse_from(["generate_office_map"]).unwrap();
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(args.layout.is_none());
        assert!(!args.quiet);
    }

    #[test]
    fn flags_override_output_and_layout() {
        let args = Args::try_parse_from([
            "generate_office_map",
            "-o",
            "out/map.json",
            "--layout",
            "office.toml",
            "-q",
        ])
        .unwrap();
        assert_eq!(args.output, PathBuf::from("out/map.json"));
        assert_eq!(args.layout, Some(PathBuf::from("office.toml")));
        assert!(args.quiet);
    }

    #[test]
    fn missing_layout_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = load_layout(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn default_layout_is_the_demo_office() {
        assert_eq!(load_layout(None).unwrap(), OfficeLayout::default());
    }
}
