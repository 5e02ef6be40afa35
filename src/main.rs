use clap::Parser;
use px_processor::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(px_processor::Error::processing_interrupted(
                    "Processing interrupted by user".to_string()
                ).into())
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("PX Processor - PC-Axis Statistical File Parser");
    println!("==============================================");
    println!();
    println!("Parse PC-Axis (PX) files from disk or HTTP into flat tables,");
    println!("JSON-Stat datasets and metadata reports.");
    println!();
    println!("USAGE:");
    println!("    px-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse one document and export its table");
    println!("    inspect     Print metadata, dimensions and translations of one document");
    println!("    batch       Parse every PX file in a directory concurrently");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Parse a remote file and write it as CSV:");
    println!("    px-processor parse http://www.ine.es/jaxiT3/files/t/es/px/2184.px -o 2184.csv");
    println!();
    println!("    # Export a multilingual file in French as JSON-Stat:");
    println!("    px-processor parse data/population.px --language fr --format json-stat \\");
    println!("                       -o population.json");
    println!();
    println!("    # Show dimensions and translations:");
    println!("    px-processor inspect data/population.px --translations");
    println!();
    println!("    # Convert a directory of PX files with 8 workers:");
    println!("    px-processor batch data/ -o output/ -j 8");
    println!();
    println!("For detailed help on any command, use:");
    println!("    px-processor <COMMAND> --help");
}
