use std::{
    fs::{read, write},
    io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use font_instancer::{AxisLocation, instantiate};
use skrifa::MetadataProvider;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Parse(#[from] read_fonts::ReadError),
    #[error("{0}")]
    Instancer(#[from] font_instancer::Error),
    #[error("expected TAG=VALUE, got '{0}'")]
    BadLocation(String),
    #[error("axis tag must be 4 characters: '{0}'")]
    BadTag(String),
    #[error("not a number: '{0}'")]
    BadValue(String),
}

#[derive(Parser)]
#[command(name = "font-instancer", version)]
#[command(about = "Pin variable font axes to produce a static instance")]
struct Cli {
    /// Variable TTF to instantiate
    input: PathBuf,

    /// Axis pins as TAG=VALUE (e.g. wght=700)
    locations: Vec<String>,

    /// Output path (default: INPUT-static.ttf next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the font's variation axes and exit
    #[arg(long)]
    axes: bool,

    /// Suppress output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let data = read(&cli.input)?;

    if cli.axes {
        return list_axes(&data);
    }

    let locations = cli
        .locations
        .iter()
        .map(|s| parse_location(s))
        .collect::<Result<Vec<_>, _>>()?;

    let static_data = instantiate(&data, &locations)?;

    let output = cli.output.unwrap_or_else(|| default_output(&cli.input));
    write(&output, &static_data)?;

    if !cli.quiet {
        println!("Wrote {}", output.display());
    }

    Ok(())
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}-static.ttf"))
}

fn parse_location(spec: &str) -> Result<AxisLocation, CliError> {
    let (tag, value) = spec
        .split_once('=')
        .ok_or_else(|| CliError::BadLocation(spec.to_string()))?;

    if tag.len() != 4 {
        return Err(CliError::BadTag(tag.to_string()));
    }

    let value: f32 = value
        .parse()
        .map_err(|_| CliError::BadValue(value.to_string()))?;

    Ok(AxisLocation::new(tag, value))
}

fn list_axes(data: &[u8]) -> Result<(), CliError> {
    let font = skrifa::FontRef::new(data)?;

    let axes = font.axes();
    if axes.is_empty() {
        println!("Not a variable font");
        return Ok(());
    }

    for axis in axes.iter() {
        println!(
            "{:4}  {:6.0} .. {:6.0} (default {:6.0})",
            axis.tag(),
            axis.min_value(),
            axis.max_value(),
            axis.default_value(),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_weight_pin() {
        let loc = parse_location("wght=700").unwrap();
        assert_eq!(loc.value, 700.0);
    }

    #[test]
    fn parses_negative_float() {
        let loc = parse_location("slnt=-12.5").unwrap();
        assert_eq!(loc.value, -12.5);
    }

    #[test]
    fn rejects_missing_equals() {
        assert!(matches!(
            parse_location("wght700"),
            Err(CliError::BadLocation(_))
        ));
    }

    #[test]
    fn rejects_short_tag() {
        assert!(matches!(parse_location("wg=700"), Err(CliError::BadTag(_))));
    }

    #[test]
    fn rejects_non_numeric_value() {
        assert!(matches!(
            parse_location("wght=bold"),
            Err(CliError::BadValue(_))
        ));
    }

    #[test]
    fn default_output_sits_next_to_input() {
        let out = default_output(Path::new("fonts/FiraCode[wght].ttf"));
        assert_eq!(out, Path::new("fonts/FiraCode[wght]-static.ttf"));
    }
}
