//! CLI entrypoint for `flag-matrix`.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use flag_matrix::cli::Args;
use flag_matrix::config;
use flag_matrix::error::MatrixError;

fn main() -> Result<(), MatrixError> {
    init_tracing();
    run()
}

fn run() -> Result<(), MatrixError> {
    let args = Args::parse();
    let generator_config = config::load(&args)?;
    flag_matrix::generate(&generator_config)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
