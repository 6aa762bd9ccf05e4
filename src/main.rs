use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use lc2msxmml::converter::{config::defaults, Config, UnevenChannels};
use lc2msxmml::Converter;
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lc2msxmml")]
#[command(version = "0.1.0")]
#[command(about = "LovelyComposer to MSX-BASIC MML converter", long_about = None)]
struct Args {
    /// [LCFILE] BASFILE; LCFILE is read from stdin when omitted
    #[arg(required = true, num_args = 1..=2, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Start line number
    #[arg(long, default_value_t = defaults::START_LINE)]
    start: u32,

    /// Line number step
    #[arg(long, default_value_t = defaults::STEP)]
    step: u32,

    /// Default note length (1-64)
    #[arg(long, default_value_t = defaults::NOTE_LENGTH)]
    notelen: u32,

    /// Tempo (32-255)
    #[arg(long, default_value_t = defaults::TEMPO)]
    tempo: u32,

    /// Volume for all channels (0-15)
    #[arg(long, default_value_t = defaults::VOLUME)]
    volume: u32,

    /// Emit MSX-MUSIC extended BASIC statements
    #[arg(long)]
    extend: bool,

    /// Encode pitches with the N macro
    #[arg(long)]
    absolute: bool,

    /// Handling of channels with different line counts
    #[arg(long, value_enum, default_value_t = UnevenChannels::Pad)]
    uneven: UnevenChannels,

    /// Log conversion details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), lc2msxmml::Error> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();

    let (lcfile, basfile) = match args.files.as_slice() {
        [lcfile, basfile] => (lcfile.clone(), basfile.clone()),
        [basfile] => (read_source_name()?, basfile.clone()),
        _ => Args::command()
            .error(ErrorKind::WrongNumberOfValues, "expected [LCFILE] BASFILE")
            .exit(),
    };

    if !lcfile.is_file() || basfile.is_dir() {
        eprintln!("Invalid LovelyComposer file name given as {}.", lcfile.display());
        process::exit(1);
    }

    let config = Config {
        start_line: args.start,
        step: args.step,
        note_length: args.notelen,
        tempo: args.tempo,
        volume: args.volume,
        extended: args.extend,
        absolute_level: args.absolute,
        uneven: args.uneven,
    };

    Converter::new(config).convert_file(&lcfile, &basfile)?;

    Ok(())
}

/// Source file name piped on stdin
fn read_source_name() -> io::Result<PathBuf> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("No LovelyComposer file given.");
        process::exit(1);
    }
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(PathBuf::from(line.trim()))
}
