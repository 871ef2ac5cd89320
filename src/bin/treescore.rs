//! Command-line evaluation of a system-output corpus against gold

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use treescore::{MaskPolicy, evaluate_files};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Score a parsed corpus against gold-standard CoNLL-U annotations
#[derive(Debug, Parser)]
#[command(name = "treescore", version, about)]
struct Args {
    /// Gold-standard CoNLL-U file (plain or .gz)
    gold: PathBuf,

    /// System-output CoNLL-U file (plain or .gz)
    system: PathBuf,

    /// Score punctuation tokens instead of ignoring them
    #[arg(long)]
    keep_punct: bool,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let policy = if args.keep_punct {
        MaskPolicy::KeepAll
    } else {
        MaskPolicy::IgnorePunct
    };

    match evaluate_files(&args.gold, &args.system, policy) {
        Ok(result) => {
            if args.json {
                match serde_json::to_string_pretty(&result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("error: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("UAS: {:.2}", result.uas);
                println!("LAS: {:.2}", result.las);
                println!("({})", result.raw);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
