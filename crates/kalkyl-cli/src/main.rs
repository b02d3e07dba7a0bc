mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kalkyl",
    version,
    about = "Floor plan analysis and construction cost estimation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an OCR payload into rooms, areas and a full cost estimate
    Analyze {
        /// Path to OCR payload JSON ({"text": ..., "blocks": [...]})
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the analysis to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Extract and classify rooms only (without pricing)
    Rooms {
        /// Path to OCR payload JSON
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List the price-reference registry with sources
    Prices {
        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input_file,
            output,
            out,
        } => commands::analyze::run(input_file, &output, out),
        Commands::Rooms { input_file, output } => commands::rooms::run(input_file, &output),
        Commands::Prices { output } => commands::prices::run(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
