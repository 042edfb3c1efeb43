use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use wordrun::{CountOptions, DEFAULT_BUFFER_SIZE, Strategy, count_path};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    " ",
    env!("BUILD_DATE"),
    " ",
    env!("BUILD_TARGET"),
    ")"
);

/// Exit status when --verify finds the strategies disagree
const EXIT_MISMATCH: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Print the number of words in FILE.",
    long_about = r#"Print the number of words in FILE.
A word is a maximal run of bytes other than space, tab, newline, carriage return, vertical tab and form feed."#
)]
struct WordRunArgs {
    /// Input file; use '-' for stdin
    #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    file: PathBuf,

    /// Counting strategy
    #[arg(short = 's', long = "strategy", value_enum, default_value_t = Strategy::Simd)]
    strategy: Strategy,

    /// Worker threads for the parallel strategy [default: available CPUs - 1]
    #[arg(short = 'j', long = "threads", value_parser = clap::value_parser!(u16).range(1..))]
    threads: Option<u16>,

    /// Read size in bytes for the stream strategy
    #[arg(
        short = 'b',
        long = "buffer-size",
        default_value_t = DEFAULT_BUFFER_SIZE as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    buffer_size: u64,

    /// Also count with the scalar reference scan and fail if the results differ
    #[arg(long = "verify", action = ArgAction::SetTrue)]
    verify: bool,

    /// Log diagnostics to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, thiserror::Error)]
#[error("strategy '{strategy}' counted {got} words but the scalar scan counted {expected}")]
struct VerifyMismatch {
    strategy: Strategy,
    got: usize,
    expected: usize,
}

fn main() -> ExitCode {
    let args = WordRunArgs::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(words) => {
            println!("{}", words);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("wordrun: {:#}", e);
            if e.is::<VerifyMismatch>() {
                ExitCode::from(EXIT_MISMATCH)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(args: &WordRunArgs) -> Result<usize> {
    let options = CountOptions {
        strategy: args.strategy,
        threads: args.threads.map(usize::from),
        buffer_size: usize::try_from(args.buffer_size).unwrap_or(usize::MAX),
    };
    debug!(?options, file = %args.file.display(), "starting");

    if !args.verify {
        return Ok(count_path(&args.file, &options)?);
    }

    if args.file.as_os_str() == "-" {
        bail!("--verify needs a file path, stdin can only be read once");
    }

    let words = count_path(&args.file, &options)?;
    let reference = count_path(
        &args.file,
        &CountOptions {
            strategy: Strategy::Scalar,
            ..options
        },
    )
    .context("failed to re-read input for verification")?;

    if words != reference {
        return Err(VerifyMismatch {
            strategy: options.strategy,
            got: words,
            expected: reference,
        }
        .into());
    }
    info!(words, strategy = %options.strategy, "verified against scalar scan");

    Ok(words)
}

/// Log to stderr; level comes only from the -v count
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::new(format!("wordrun={level},warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose >= 2)
                .with_thread_ids(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init();
}
