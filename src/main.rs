use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clariscore::benchmark::BenchmarkRepository;
use clariscore::config::EngineConfig;

const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

const DEFAULT_RESULTS_FILE: &str = "ClariScore_Results.csv";
const DEFAULT_TEMPLATE_FILE: &str = "ClariScore_Input_Template.csv";

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Csv,
    Json,
    Table,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every building in an input CSV
    Score {
        /// Benchmark sheet CSV, or a directory holding `<sheet>.csv`
        #[arg(short, long)]
        benchmarks: PathBuf,

        /// Input table with one building per row
        #[arg(short, long)]
        input: PathBuf,

        /// Where CSV results are written
        #[arg(short, long, default_value = DEFAULT_RESULTS_FILE)]
        out: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },
    /// Write an empty input template plus the reference listing
    Template {
        #[arg(short, long)]
        benchmarks: PathBuf,

        #[arg(short, long, default_value = DEFAULT_TEMPLATE_FILE)]
        out: PathBuf,
    },
    /// Print the selectable building types and regions
    Reference {
        #[arg(short, long)]
        benchmarks: PathBuf,
    },
    /// Write the default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "clariscore")]
#[command(about = "Score building energy use against regional benchmarks", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/clariscore/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Benchmark sheet name, overriding the config
    #[arg(long, global = true)]
    sheet: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = cli.command {
        let path = match config_path.or_else(clariscore::config::get_config_path) {
            Some(p) => p,
            None => {
                eprintln!("Could not determine home directory for config file");
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = clariscore::config::write_default_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Wrote default config to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    let mut config = match clariscore::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Some(sheet) = cli.sheet {
        config.sheet_name = sheet;
    }

    if let Err(errors) = clariscore::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = clariscore::output::should_use_colors();

    match cli.command {
        Commands::Score {
            benchmarks,
            input,
            out,
            format,
        } => {
            let repository = load_repository(&benchmarks, &config).await;

            let input_table = match clariscore::files::read_input(&input).await {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_IO);
                }
            };

            let pipeline = clariscore::pipeline::ComputePipeline::new(&repository, &config);
            let table = match pipeline.compute(&input_table) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Input error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            match format {
                OutputFormat::Csv => {
                    if let Err(e) = clariscore::files::write_results(&out, &table).await {
                        eprintln!("Failed to write results: {:#}", e);
                        std::process::exit(EXIT_IO);
                    }
                    write_reference_file(&clariscore::files::reference_path(&out), &repository)
                        .await;
                    info!(path = %out.display(), "wrote results");
                }
                OutputFormat::Json => match clariscore::output::format_json(&table) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize results: {}", e);
                        std::process::exit(EXIT_IO);
                    }
                },
                OutputFormat::Table => {
                    println!(
                        "{}",
                        clariscore::output::format_results_table(&table, use_colors)
                    );
                }
            }

            eprintln!(
                "{}",
                clariscore::output::format_summary(&table.summary(), use_colors)
            );
            if cli.verbose {
                eprintln!("Finished in {:?}", start_time.elapsed());
            }
        }
        Commands::Template { benchmarks, out } => {
            let repository = load_repository(&benchmarks, &config).await;

            if let Err(e) = clariscore::files::write_template(&out).await {
                eprintln!("Failed to write template: {:#}", e);
                std::process::exit(EXIT_IO);
            }
            let reference = clariscore::files::reference_path(&out);
            write_reference_file(&reference, &repository).await;

            println!("Template: {}", out.display());
            println!("Reference: {}", reference.display());
        }
        Commands::Reference { benchmarks } => {
            let repository = load_repository(&benchmarks, &config).await;
            println!(
                "{}",
                clariscore::output::format_reference(&repository.reference(), use_colors)
            );
        }
        Commands::Init { .. } => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Read and parse the benchmark sheet, exiting on failure.
async fn load_repository(path: &Path, config: &EngineConfig) -> BenchmarkRepository {
    let sheet = match clariscore::files::read_sheet(path, &config.sheet_name).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Benchmark error: {:#}", e);
            std::process::exit(EXIT_IO);
        }
    };

    match BenchmarkRepository::from_sheet(&sheet, config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Benchmark error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

async fn write_reference_file(path: &Path, repository: &BenchmarkRepository) {
    if let Err(e) = clariscore::files::write_reference(path, &repository.reference()).await {
        eprintln!("Failed to write reference listing: {:#}", e);
        std::process::exit(EXIT_IO);
    }
}
