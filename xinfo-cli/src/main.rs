use std::{
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use xinfo_parser::{ExtraInfo, Options, Validation};

mod error;

/// Parses Tor extra-info descriptors and prints them as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Descriptor files to parse
    #[arg(conflicts_with = "stdin", required_unless_present = "stdin")]
    files: Vec<PathBuf>,

    /// Read a single descriptor from stdin
    #[arg(long)]
    stdin: bool,

    /// Never reject a descriptor, malformed fields keep their defaults
    #[arg(long, conflicts_with = "validation")]
    lenient: bool,

    /// Validation mode to parse descriptors with
    #[arg(long, value_parser = clap::value_parser!(Validation), default_value = "strict")]
    validation: Validation,

    /// Pretty print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn options(&self) -> Options {
        let builder = Options::builder().with_validation(self.validation);
        if self.lenient {
            builder.with_lenient().build()
        } else {
            builder.build()
        }
    }
}

/// A descriptor read from disk or stdin, along with how parsing it went.
struct Outcome {
    path: PathBuf,
    source: String,
    result: Result<ExtraInfo, xinfo_parser::Error>,
}

fn main() -> Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let options = args.options();

    let outcomes = if args.stdin {
        let mut source = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut source)
            .context("failed to read descriptor from stdin")?;
        vec![parse_source(PathBuf::from("<stdin>"), source, &options)]
    } else {
        parse_files(&args.files, &options)?
    };

    let rejected = print_outcomes(&outcomes, args.pretty)?;
    if rejected > 0 {
        eprintln!("\nRejected {rejected} of {} descriptor(s)", outcomes.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

#[tracing::instrument(skip(options))]
fn parse_files(files: &[PathBuf], options: &Options) -> Result<Vec<Outcome>> {
    files
        .par_iter()
        .map(|path| {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(parse_source(path.clone(), source, options))
        })
        .collect()
}

fn parse_source(path: PathBuf, source: String, options: &Options) -> Outcome {
    let result = xinfo_parser::parse(&source, options);
    if let Err(e) = &result {
        tracing::debug!(path = %path.display(), error = %e, "descriptor rejected");
    }
    Outcome {
        path,
        source,
        result,
    }
}

// Writes every parsed record to stdout and every rejection to stderr, in input order.
// Returns how many descriptors were rejected.
fn print_outcomes(outcomes: &[Outcome], pretty: bool) -> Result<usize> {
    let mut stdout = io::stdout().lock();
    let mut rejected = 0;

    for Outcome {
        path,
        source,
        result,
    } in outcomes
    {
        match result {
            Ok(record) => write_record(&mut stdout, record, pretty)?,
            Err(e) => {
                rejected += 1;
                eprintln!("{:?}", error::report(e, path, source));
            }
        }
    }
    stdout.flush()?;
    Ok(rejected)
}

fn write_record<W: Write>(writer: &mut W, record: &ExtraInfo, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, record)?;
    } else {
        serde_json::to_writer(&mut *writer, record)?;
    }
    writeln!(writer)?;
    Ok(())
}
