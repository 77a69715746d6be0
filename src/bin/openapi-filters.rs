//! OpenAPI filters CLI
//!
//! Command-line interface for post-processing generated OpenAPI documents.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use openapi_filters::{load_document_auto, FilterKind, FilterSet, Manifest, NamingPolicy};

#[derive(Parser)]
#[command(name = "openapi-filters")]
#[command(about = "Post-process generated OpenAPI documents")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the filters over a document
    Apply {
        /// Document source: file path or URL (http:// or https://)
        document: String,

        /// Manifest with type and endpoint metadata
        #[arg(long, short)]
        manifest: Option<PathBuf>,

        /// Filter to leave out (repeatable)
        #[arg(long, value_enum)]
        skip: Vec<FilterArg>,

        /// Whether schema keys are camel-cased property names (overrides the manifest)
        #[arg(long, action = clap::ArgAction::Set)]
        camel_case: Option<bool>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    ErrorResponses,
    OperationIds,
    RequiredValueTypes,
}

impl From<FilterArg> for FilterKind {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::ErrorResponses => FilterKind::ErrorResponses,
            FilterArg::OperationIds => FilterKind::OperationIds,
            FilterArg::RequiredValueTypes => FilterKind::RequiredValueTypes,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Apply {
            document,
            manifest,
            skip,
            camel_case,
            output,
            pretty,
        } => run_apply(ApplyArgs {
            document,
            manifest,
            skip,
            camel_case,
            output,
            pretty,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // RUST_LOG still takes precedence when set
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

struct ApplyArgs {
    document: String,
    manifest: Option<PathBuf>,
    skip: Vec<FilterArg>,
    camel_case: Option<bool>,
    output: Option<PathBuf>,
    pretty: bool,
}

fn run_apply(args: ApplyArgs) -> Result<(), u8> {
    let ApplyArgs {
        document: source,
        manifest,
        skip,
        camel_case,
        output,
        pretty,
    } = args;

    let mut document = load_document_auto(&source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let manifest = match manifest {
        Some(path) => Manifest::from_path(&path).map_err(|e| {
            eprintln!("Error loading manifest: {}", e);
            e.exit_code() as u8
        })?,
        None => {
            log::info!("no manifest given, only error responses can be flagged");
            Manifest::default()
        }
    };

    let mut filters = FilterSet::all();
    for kind in skip {
        filters = filters.without(kind.into());
    }
    if let Some(camel_case) = camel_case {
        filters = filters.naming(NamingPolicy::from_camel_case_flag(camel_case));
    }

    filters.apply(&mut document, &manifest).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let json_output = if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}
