//! img2raw - converts an image to raw pixel data and palette files.
//!
//! Thin front end over `img2raw-core`: parses arguments, sets up logging,
//! and turns any error into a one-line message and a non-zero exit status.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use img2raw_core::{convert_file, ConvertOptions, PaletteMode};

#[derive(Parser, Debug)]
#[command(name = "img2raw", version)]
#[command(about = "Converts input image to raw image and palette data")]
struct Cli {
    /// Save all colors - including unused
    #[arg(short = 'p', long)]
    full_palette: bool,

    /// If output exists, the tool will overwrite it
    #[arg(short, long)]
    force: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Input image filename
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output files basename (without extension)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            force: self.force,
            palette_mode: if self.full_palette {
                PaletteMode::Full
            } else {
                PaletteMode::Used
            },
        }
    }

    fn default_log_filter(&self) -> &'static str {
        if self.quiet {
            "img2raw=warn,img2raw_core=warn"
        } else {
            "img2raw=info,img2raw_core=info"
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.default_log_filter().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let input = absolute(&cli.input)?;
    let output = absolute(&cli.output)?;

    let report = convert_file(&input, &output, &cli.options())?;

    tracing::debug!(
        kind = ?report.kind,
        raw = %report.paths.raw.display(),
        "Conversion finished"
    );
    Ok(())
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_args() {
        let cli = Cli::try_parse_from(["img2raw", "in.png", "out/sprite"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.png"));
        assert_eq!(cli.output, PathBuf::from("out/sprite"));
        assert_eq!(cli.options(), ConvertOptions::default());
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from(["img2raw", "-f", "-p", "in.png", "out"]).unwrap();
        let options = cli.options();
        assert!(options.force);
        assert_eq!(options.palette_mode, PaletteMode::Full);

        let cli =
            Cli::try_parse_from(["img2raw", "--force", "--full-palette", "in.png", "out"]).unwrap();
        assert_eq!(cli.options(), options);
    }

    #[test]
    fn test_quiet_lowers_log_level() {
        let cli = Cli::try_parse_from(["img2raw", "-q", "in.png", "out"]).unwrap();
        assert!(cli.default_log_filter().contains("warn"));

        let cli = Cli::try_parse_from(["img2raw", "in.png", "out"]).unwrap();
        assert!(cli.default_log_filter().contains("info"));
    }

    #[test]
    fn test_missing_output_is_rejected() {
        assert!(Cli::try_parse_from(["img2raw", "in.png"]).is_err());
    }

    #[test]
    fn test_run_reports_missing_input() {
        let dir = std::env::temp_dir().join("img2raw-cli-missing-input");
        let cli = Cli::try_parse_from([
            std::ffi::OsStr::new("img2raw"),
            dir.join("absent.png").as_os_str(),
            dir.join("out").as_os_str(),
        ])
        .unwrap();

        let err = run(&cli).unwrap_err();
        assert!(err.to_string().starts_with("Input file does not exist"));
    }
}
