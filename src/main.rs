#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use cirkit_bench::{run_cmd, table_cmd};

#[derive(Parser, Debug)]
#[command(name = "cirkit-bench")]
#[command(about = "Benchmark harness for cirkit logic-network optimization flows", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set CIRKIT_BENCH_LOG)
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the optimization flow over the benchmark suite
    Run {
        /// Directory containing benchmark circuit descriptions (<name>.aig)
        #[arg(long, default_value = "benchmarks")]
        benchmarks: std::path::PathBuf,
        /// Directory for optimized circuit descriptions
        #[arg(long, default_value = "results")]
        results: std::path::PathBuf,
        /// Suite definition (TOML); defaults to the built-in EPFL suite
        #[arg(long)]
        config: Option<std::path::PathBuf>,
        /// Path to the synthesis shell binary
        #[arg(long)]
        engine_path: Option<std::path::PathBuf>,
        /// Additional args passed to the synthesis shell at spawn
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        engine_args: Vec<String>,
        /// Path to the equivalence checker binary
        #[arg(long)]
        abc_path: Option<std::path::PathBuf>,
        /// Restrict the run to these benchmarks (repeatable)
        #[arg(long = "benchmark")]
        benchmark: Vec<String>,
        /// Restrict the run to these representations (repeatable: aig, mig, xag, xmg)
        #[arg(long = "repr")]
        repr: Vec<String>,
        /// Skip equivalence checking entirely
        #[arg(long)]
        no_verify: bool,
        /// Append machine-readable run records to this JSONL file
        #[arg(long)]
        jsonl: Option<std::path::PathBuf>,
        /// Write a flat CSV export of the run records to this file
        #[arg(long)]
        csv: Option<std::path::PathBuf>,
    },

    /// Render the comparison table from stored run records
    Table {
        /// JSONL file written by a previous run
        #[arg(long)]
        jsonl: std::path::PathBuf,
    },

    /// List the benchmark suite
    List {
        /// Suite definition (TOML); defaults to the built-in EPFL suite
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("CIRKIT_BENCH_LOG").unwrap_or_else(|_| {
        if verbose { "cirkit_bench=debug".to_string() } else { "cirkit_bench=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            benchmarks,
            results,
            config,
            engine_path,
            engine_args,
            abc_path,
            benchmark,
            repr,
            no_verify,
            jsonl,
            csv,
        } => run_cmd::run(
            benchmarks,
            results,
            config,
            engine_path,
            engine_args,
            abc_path,
            benchmark,
            repr,
            no_verify,
            jsonl,
            csv,
        ),
        Commands::Table { jsonl } => table_cmd::run(jsonl),
        Commands::List { config } => run_cmd::list(config),
    };

    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
