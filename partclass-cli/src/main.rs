//! PartClass CLI - MPN classification and replacement checks from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use partclass::{Classification, ClassifierEngine, ComponentType, HandlerId};
use std::process;

#[derive(Parser)]
#[command(name = "partclass")]
#[command(about = "Manufacturer part number classification tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an MPN into component types
    Classify {
        /// Manufacturer part number
        #[arg(value_name = "MPN")]
        mpn: String,

        /// Restrict the query to one component type (e.g. "microcontroller")
        #[arg(short = 't', long, value_name = "TYPE")]
        component_type: Option<ComponentType>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Extract the series identifier under one handler
    Series {
        /// Handler name (see `partclass handlers`)
        #[arg(value_name = "HANDLER")]
        handler: String,

        /// Manufacturer part number
        #[arg(value_name = "MPN")]
        mpn: String,
    },

    /// Extract the package code under one handler
    Package {
        /// Handler name (see `partclass handlers`)
        #[arg(value_name = "HANDLER")]
        handler: String,

        /// Manufacturer part number
        #[arg(value_name = "MPN")]
        mpn: String,
    },

    /// Judge whether REPLACEMENT may substitute for ORIGINAL
    Replace {
        /// Handler name (see `partclass handlers`)
        #[arg(value_name = "HANDLER")]
        handler: String,

        /// The part being replaced
        #[arg(value_name = "ORIGINAL")]
        original: String,

        /// The candidate replacement
        #[arg(value_name = "REPLACEMENT")]
        replacement: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List registered handlers and their supported types
    Handlers,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for CI/CD
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let engine = match ClassifierEngine::with_builtin_handlers() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: failed to assemble classification engine: {e}");
            process::exit(2);
        }
    };

    let exit_code = match cli.command {
        Commands::Classify {
            mpn,
            component_type,
            format,
        } => handle_classify(&engine, &mpn, component_type, format),
        Commands::Series { handler, mpn } => {
            handle_extract(&engine, &handler, &mpn, Extraction::Series)
        }
        Commands::Package { handler, mpn } => {
            handle_extract(&engine, &handler, &mpn, Extraction::Package)
        }
        Commands::Replace {
            handler,
            original,
            replacement,
            format,
        } => handle_replace(&engine, &handler, &original, &replacement, format),
        Commands::Handlers => {
            handle_handlers(&engine);
            0
        }
    };

    process::exit(exit_code);
}

fn handle_classify(
    engine: &ClassifierEngine,
    mpn: &str,
    component_type: Option<ComponentType>,
    format: OutputFormat,
) -> i32 {
    let claims = engine.classify(mpn, component_type);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&claims).unwrap());
        }
        OutputFormat::Human => {
            if claims.is_empty() {
                println!("No handler claims {mpn}");
            } else {
                println!("{} claim(s) for {mpn}:", claims.len());
                for Classification {
                    handler,
                    component_type,
                } in &claims
                {
                    println!("  {handler}: {component_type}");
                }
            }
        }
    }

    if claims.is_empty() {
        1
    } else {
        0
    }
}

enum Extraction {
    Series,
    Package,
}

fn handle_extract(
    engine: &ClassifierEngine,
    handler: &str,
    mpn: &str,
    extraction: Extraction,
) -> i32 {
    let Some(handler) = resolve_handler(engine, handler) else {
        return 2;
    };

    let value = match extraction {
        Extraction::Series => engine.extract_series(mpn, handler),
        Extraction::Package => engine.extract_package_code(mpn, handler),
    };

    match value {
        Some(value) => {
            println!("{value}");
            0
        }
        None => {
            eprintln!("{handler} cannot decode {mpn}");
            1
        }
    }
}

fn handle_replace(
    engine: &ClassifierEngine,
    handler: &str,
    original: &str,
    replacement: &str,
    format: OutputFormat,
) -> i32 {
    let Some(handler) = resolve_handler(engine, handler) else {
        return 2;
    };

    let Some(verdict) = engine.replacement_verdict(original, replacement, handler) else {
        eprintln!("Error: handler {handler} is not registered");
        return 2;
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&verdict).unwrap());
        }
        OutputFormat::Human => {
            println!(
                "{original} -> {replacement} under {handler}: {}",
                if verdict.accepted() {
                    "official replacement"
                } else {
                    "NOT a replacement"
                }
            );
            println!("  series:     {:?}", verdict.series);
            println!("  package:    {:?}", verdict.package);
            println!("  attributes: {:?}", verdict.attributes);
        }
    }

    if verdict.accepted() {
        0
    } else {
        1
    }
}

fn handle_handlers(engine: &ClassifierEngine) {
    println!("Registered handlers:");
    for handler in engine.handlers() {
        let types: Vec<&str> = handler
            .supported_types()
            .iter()
            .map(|t| t.as_str())
            .collect();
        println!("  {} ({}): {}", handler.id(), handler.name(), types.join(", "));
    }
}

fn resolve_handler(engine: &ClassifierEngine, name: &str) -> Option<HandlerId> {
    match engine.handler_id(name) {
        Some(id) => Some(id),
        None => {
            let known: Vec<&str> = engine
                .handlers()
                .iter()
                .map(|h| h.id().as_str())
                .collect();
            eprintln!(
                "Error: unknown handler '{name}' (known handlers: {})",
                known.join(", ")
            );
            None
        }
    }
}
