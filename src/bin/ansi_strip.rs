//! ANSI Strip
//!
//! Copies input to stdout with ANSI control sequences removed.
//! Reads from stdin or a file; optionally reports the decoded operations.

use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use ansi_filter::{
    AnsiHandler, AnsiOutputStream, FilterConfig, Operation, OperationLog, TextFallback,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Logs go to stderr so stdout only carries filtered output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut input_file: Option<PathBuf> = None;
    let mut config_file: Option<PathBuf> = None;
    let mut mode = Mode::Strip;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-f" | "--file" => {
                i += 1;
                if i < args.len() {
                    input_file = Some(PathBuf::from(&args[i]));
                }
            },
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(PathBuf::from(&args[i]));
                }
            },
            "-o" | "--operations" => {
                mode = Mode::Operations;
            },
            "-a" | "--approximate" => {
                mode = Mode::Approximate;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            _ => {
                // Treat as input file if no flag
                if input_file.is_none() && !args[i].starts_with('-') {
                    input_file = Some(PathBuf::from(&args[i]));
                }
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let config = match &config_file {
        Some(path) => match FilterConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            },
        },
        None => FilterConfig::default(),
    };

    let input: Box<dyn Read> = match &input_file {
        Some(path) => match std::fs::File::open(path) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("Error opening file '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            },
        },
        None => Box::new(io::stdin().lock()),
    };

    let result = match mode {
        Mode::Strip => filter(input, ansi_filter::Discard, &config).map(drop),
        Mode::Approximate => filter(input, TextFallback, &config).map(drop),
        Mode::Operations => filter(input, OperationLog::new(report), &config).map(drop),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // A closed pipe downstream (e.g. `| head`) is not a failure
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Filtering failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

#[derive(Clone, Copy)]
enum Mode {
    Strip,
    Approximate,
    Operations,
}

/// Stream `input` through the filter into stdout
fn filter<H: AnsiHandler>(
    mut input: Box<dyn Read>,
    handler: H,
    config: &FilterConfig,
) -> io::Result<H> {
    let stdout = BufWriter::new(io::stdout().lock());
    let mut stream = AnsiOutputStream::with_config(stdout, handler, config);
    io::copy(&mut input, &mut stream)?;
    let (_, handler) = stream.finish()?;
    Ok(handler)
}

/// Print one decoded operation to stderr as a JSON line
fn report(operation: Operation) -> io::Result<()> {
    let mut stderr = io::stderr().lock();
    serde_json::to_writer(&mut stderr, &operation)?;
    stderr.write_all(b"\n")
}

fn print_help() {
    println!("ANSI Strip");
    println!();
    println!("Usage: ansi-strip [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -f, --file <PATH>    Read input from file");
    println!("  -c, --config <PATH>  Load filter settings from a JSON file");
    println!("  -o, --operations     Print decoded operations to stderr as JSON lines");
    println!("  -a, --approximate    Render cursor-right as spaces and next-line as newlines");
    println!("  -h, --help           Show this help message");
    println!();
    println!("If no input file is specified, reads from stdin.");
    println!();
    println!("Examples:");
    println!("  ls --color=always | ansi-strip");
    println!("  ansi-strip -o build.log > build.txt 2> operations.jsonl");
}
