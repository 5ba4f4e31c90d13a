//! evalsheet CLI: inspect evaluation sheets and export reports.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use evalsheet_core::SheetError;

mod commands;

#[derive(Parser)]
#[command(
    name = "evalsheet",
    version,
    about = "Trainee evaluation sheet statistics and reports"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show cohort metadata and headline counts
    Inspect {
        /// Evaluation sheet (.xlsx, .xls, .xlsb, .ods or .csv)
        #[arg(long)]
        file: PathBuf,
    },

    /// List trainee and competency filter options
    List {
        #[arg(long)]
        file: PathBuf,

        /// Only list competencies evaluated for this trainee
        #[arg(long)]
        trainee: Option<String>,
    },

    /// Judgment statistics for a filter selection
    Stats {
        #[arg(long)]
        file: PathBuf,

        /// Trainee full name
        #[arg(long)]
        trainee: Option<String>,

        /// Competency name
        #[arg(long)]
        competency: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Write an SVG distribution chart to this path
        #[arg(long)]
        chart: Option<PathBuf>,
    },

    /// Export the per-trainee summary document
    Summary {
        #[arg(long)]
        file: PathBuf,

        /// Restrict the summary to one competency
        #[arg(long)]
        competency: Option<String>,

        /// Output format: html, md, json (default from config)
        #[arg(long)]
        format: Option<String>,

        /// Output directory (default from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the document instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Export the judgments detail document
    Report {
        #[arg(long)]
        file: PathBuf,

        /// Report a single trainee instead of the whole cohort
        #[arg(long)]
        trainee: Option<String>,

        /// Restrict the report to one competency
        #[arg(long)]
        competency: Option<String>,

        /// Output format: html, md, json (default from config)
        #[arg(long)]
        format: Option<String>,

        /// Output directory (default from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the document instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Create a starter evalsheet.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("evalsheet=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Inspect { file } => commands::inspect::execute(file, config),
        Commands::List { file, trainee } => commands::list::execute(file, trainee, config),
        Commands::Stats {
            file,
            trainee,
            competency,
            format,
            chart,
        } => commands::stats::execute(file, trainee, competency, format, chart, config),
        Commands::Summary {
            file,
            competency,
            format,
            output,
            stdout,
        } => commands::summary::execute(file, competency, format, output, stdout, config),
        Commands::Report {
            file,
            trainee,
            competency,
            format,
            output,
            stdout,
        } => commands::report::execute(file, trainee, competency, format, output, stdout, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        if let Some(SheetError::MissingColumns { .. }) = e.downcast_ref::<SheetError>() {
            eprintln!(
                "Hint: the header row must contain Nombre, Apellidos, Competencia, \
                 Resultado de Aprendizaje and Juicio de Evaluación (labels are set in [layout.columns])."
            );
        }
        process::exit(1);
    }
}
