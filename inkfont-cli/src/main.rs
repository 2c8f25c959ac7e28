//! Build a font from hand-drawn glyph images.
//!
//! Reads a JSON manifest listing one PNG per character, traces each image
//! into outlines and writes a TrueType or WOFF file.

mod error;
mod manifest;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Parser;
use inkfont::{data_url, BuildOptions, Container, FontBuild};

use crate::{error::Error, manifest::Manifest};

#[derive(clap::ValueEnum, Copy, Clone, Default, Debug, PartialEq, Eq)]
enum Format {
    /// A plain TrueType file.
    #[default]
    Ttf,
    /// WOFF 1.0, for use on the web.
    Woff,
}

impl From<Format> for Container {
    fn from(format: Format) -> Self {
        match format {
            Format::Ttf => Container::Sfnt,
            Format::Woff => Container::Woff,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The manifest describing the glyphs to include.
    manifest: PathBuf,

    /// The output font file. Defaults to the family name in the current
    /// directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// The output format.
    #[arg(long, value_enum, default_value_t)]
    format: Format,

    /// Font family name, overriding the manifest.
    #[arg(long)]
    family: Option<String>,

    /// Font author, overriding the manifest.
    #[arg(long)]
    author: Option<String>,

    /// Creation time in seconds since the Unix epoch, for reproducible output.
    #[arg(long)]
    timestamp: Option<i64>,

    /// Also write the font as a base64 `data:` URL to this file.
    #[arg(long)]
    data_url: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let manifest = Manifest::load(&args.manifest)?;
    let base_dir = args.manifest.parent().unwrap_or(Path::new("."));

    let info = manifest.font_info(args.family.as_deref(), args.author.as_deref());
    let mut build = FontBuild::new(info);
    for entry in &manifest.glyphs {
        build.add(entry.load(base_dir)?)?;
    }

    let timestamp = match args.timestamp {
        Some(secs) => DateTime::<Utc>::from_timestamp(secs, 0).ok_or(Error::Timestamp(secs))?,
        None => Utc::now(),
    };
    let mut options = BuildOptions::with_timestamp(timestamp);
    options.source = manifest.source;

    let output = build.build(&options)?;
    let container = Container::from(args.format);
    let encoded = output.encode(container)?;
    for warning in encoded.warnings() {
        eprintln!("warning: skipped {:?}: {warning}", warning.char());
    }
    let bytes = encoded.into_data();
    let path = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "{}.{}",
            output.font().info().postscript_name(),
            container.extension()
        ))
    });
    write(&path, &bytes)?;
    log::info!(
        "wrote {} glyphs to {} ({} bytes)",
        output.font().num_glyphs(),
        path.display(),
        bytes.len()
    );

    if let Some(url_path) = &args.data_url {
        write(url_path, data_url(&bytes, container).as_bytes())?;
    }
    Ok(())
}

fn write(path: &Path, data: &[u8]) -> Result<(), Error> {
    std::fs::write(path, data).map_err(|source| Error::Write {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_args() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn parse_flags() {
        let args = Args::parse_from([
            "inkfont",
            "glyphs.json",
            "-o",
            "out.woff",
            "--format",
            "woff",
            "--timestamp",
            "1700000000",
        ]);
        assert_eq!(args.format, Format::Woff);
        assert_eq!(args.output, Some(PathBuf::from("out.woff")));
        assert_eq!(args.timestamp, Some(1_700_000_000));
        assert_eq!(Container::from(args.format), Container::Woff);
    }
}
