#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the response code generator.
//!
//! Reads a response code catalog (PDF, flattened text or an HTML page,
//! from disk or a URL) and prints the generated enum and lookup tables to
//! stdout. Logs go to stderr; set `RUST_LOG` to control verbosity.

use std::io::Write as _;

use clap::Parser;
use response_codes_catalog_models::SourceVariant;
use response_codes_cli::{PipelineOptions, run};
use response_codes_codegen::{CxxOptions, ModelOptions, OutputFormat, RenderOptions};

#[derive(Parser)]
#[command(
    name = "response_codes",
    about = "Generate response code enums from vendor documentation"
)]
struct Cli {
    /// Path or URL of the catalog document
    source: String,

    /// Extraction variant (`text` or `html`). Detected from the document
    /// when omitted.
    #[arg(long)]
    variant: Option<String>,

    /// Output format (`cxx`, `rust` or `json`)
    #[arg(long, default_value = "cxx")]
    format: String,

    /// Namespace wrapping the generated C++ code
    #[arg(long, default_value = "ews")]
    namespace: String,

    /// Append each record's comments to its description
    #[arg(long)]
    with_comments: bool,

    /// Print the sanitized records as JSON instead of generated code
    #[arg(long)]
    dump_records: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let variant = cli
        .variant
        .as_deref()
        .map(|value| {
            value
                .parse::<SourceVariant>()
                .map_err(|e| format!("Unknown variant '{value}': {e}"))
        })
        .transpose()?;
    let format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| format!("Unknown format '{}': {e}", cli.format))?;

    let options = PipelineOptions {
        variant,
        model: ModelOptions {
            include_comments: cli.with_comments,
        },
        render: RenderOptions {
            format,
            cxx: CxxOptions::default().with_namespace(&cli.namespace),
            ..RenderOptions::default()
        },
        dump_records: cli.dump_records,
    };

    let output = run(&cli.source, &options).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
