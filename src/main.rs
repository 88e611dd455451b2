use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use seq_name_search::{FileFormat, ScanOptions, SequenceSearcher, Strategy, write_report};

#[derive(Parser)]
#[command(name = "seq_search")]
#[command(about = "Find FASTA/FASTQ records whose name contains a substring")]
#[command(version)]
#[command(after_help = "Example:\n  seq_search data.fasta seq123")]
struct Cli {
    /// FASTA (.fa/.fasta) or FASTQ (.fq/.fastq) file
    filename: PathBuf,

    /// Substring to look for in record names (case-sensitive)
    partial_sequence_name: String,

    /// How the file is read: stream, buffer or mmap
    #[arg(long, default_value_t = Strategy::Stream)]
    strategy: Strategy,

    /// Force the record layout instead of detecting it
    #[arg(long)]
    format: Option<FileFormat>,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let opts = ScanOptions {
        strategy: cli.strategy,
        ..ScanOptions::default()
    };
    let searcher = match cli.format {
        Some(format) => SequenceSearcher::with_format(&cli.filename, format, opts),
        None => SequenceSearcher::open(&cli.filename, opts)?,
    };
    log::info!(
        "searching {} ({}) with {} strategy",
        cli.filename.display(),
        searcher.format(),
        cli.strategy
    );

    let matches = searcher.search_all(&cli.partial_sequence_name)?;

    let mut out = io::stdout().lock();
    write_report(&mut out, &cli.partial_sequence_name, &matches)?;
    out.flush()?;
    Ok(())
}
