mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ficha",
    version,
    about = "Extract enrollment records from SENA characterization-form PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one record per PDF and export them as a table
    Extract {
        /// PDF files to process
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the export to a file (CSV unless the file ends in .json)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// JSON export config (header style, source column, delimiter)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Header style: letters or names (overrides config)
        #[arg(long, value_name = "STYLE")]
        header: Option<String>,

        /// Add a column with the source file name (overrides config)
        #[arg(long)]
        include_source: bool,

        /// Process documents one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,
    },
    /// Show the text and tables extracted from one PDF (diagnostics)
    Inspect {
        /// Path to PDF file
        input_file: PathBuf,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,
    },
    /// List the export columns
    Columns,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_files,
            output,
            out,
            config,
            header,
            include_source,
            sequential,
        } => commands::extract::run(commands::extract::ExtractArgs {
            input_files,
            output_format: output,
            output_file: out,
            config_file: config,
            header,
            include_source,
            sequential,
        }),
        Commands::Inspect { input_file, output } => commands::inspect::run(input_file, &output),
        Commands::Columns => commands::columns::list(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
