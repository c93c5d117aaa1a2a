use clap::Parser;
use std::process;
use taxonomy_stratifier::cli::{self, Args};

fn main() {
    // Parse command line arguments
    let args = Args::parse();
    cli::setup_logging(args.verbose);

    // Extraction runs on the runtime's blocking pool
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(cli::run(args)) {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Outputs are all or nothing, so a failed run leaves no partial results
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
