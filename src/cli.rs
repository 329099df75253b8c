use crate::config::load_config;
use crate::ir::{Direction, FamilyDocument};
use crate::layout::layout_document;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{LevelFilter, info, warn};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "ftlayout", version, about = "Auto-layout for family tree documents")]
pub struct Args {
    /// Input document (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout direction; overrides the document and config file
    #[arg(short = 'd', long = "direction", value_enum)]
    pub direction: Option<DirectionArg>,

    /// Layout config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Write the placement dump instead of the updated document
    #[arg(long = "dump")]
    pub dump: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum DirectionArg {
    Vertical,
    Horizontal,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Vertical => Direction::Vertical,
            DirectionArg::Horizontal => Direction::Horizontal,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(args.config.as_deref()).with_context(|| {
        format!(
            "loading config {}",
            args.config.as_deref().unwrap_or(Path::new("-")).display()
        )
    })?;
    let input = read_input(args.input.as_deref())?;
    let document = FamilyDocument::from_json(&input)?;
    for issue in document.validate() {
        warn!("{issue}");
    }

    // Precedence: flag, then the document, then the config file.
    let direction = args
        .direction
        .map(Direction::from)
        .or(document.direction)
        .unwrap_or(config.direction);
    let (laid_out, result) = layout_document(&document, Some(direction), &config.layout);
    info!(
        "laid out {} node(s) {} ({} x {})",
        result.nodes.len(),
        direction,
        result.width,
        result.height
    );

    match (args.dump, args.output.as_deref()) {
        (true, Some(path)) => write_layout_dump(path, &result)
            .with_context(|| format!("writing dump {}", path.display())),
        (true, None) => write_output(&LayoutDump::from_layout(&result).to_json_pretty()?, None),
        (false, path) => write_output(&laid_out.to_json_pretty()?, path),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    // A second init (tests calling run twice) is harmless.
    let _ = builder.try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()));
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(contents: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, contents)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
