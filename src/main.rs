//! Command-line entry point
//!
//! Two modes: `--serve` runs the persistent stdin/stdout request loop;
//! a single FILE argument extracts one document and prints its record.

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;

use docx_extract::document::DocxConverter;
use docx_extract::language::WhatlangClassifier;
use docx_extract::{pipeline, server};

#[derive(Parser)]
#[command(
    name = "docx-extract",
    version,
    about = "Extract structured text from DOCX documents"
)]
struct Args {
    /// Document to extract once; the result record is printed to stdout
    #[arg(required_unless_present = "serve")]
    file: Option<PathBuf>,

    /// Run as a persistent server reading one path per stdin line
    #[arg(long, conflicts_with = "file")]
    serve: bool,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries only result records.
    env_logger::init();

    let args = Args::parse();
    let classifier = WhatlangClassifier;

    if args.serve {
        let stdin = io::stdin();
        let stdout = io::stdout();
        return server::serve(
            || Ok(DocxConverter::new()),
            &classifier,
            stdin.lock(),
            stdout.lock(),
        );
    }

    // One-shot mode: errors go to stderr as a JSON record, non-zero exit.
    let Some(file) = args.file else {
        anyhow::bail!("no input file provided");
    };
    if !file.exists() {
        eprintln!(
            "{}",
            serde_json::json!({"error": format!("File not found: {}", file.display())})
        );
        std::process::exit(1);
    }

    let converter = DocxConverter::new();
    match pipeline::extract(&converter, &classifier, &file) {
        Ok(result) => {
            println!("{}", serde_json::to_string(&result)?);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", serde_json::json!({"error": err.to_string()}));
            std::process::exit(1);
        }
    }
}
