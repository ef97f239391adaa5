//! Callsheet server CLI
//!
//! Starts the webhook HTTP server.

use callsheet_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using defaults and environment");
        eprintln!("Usage: callsheet-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::from_env()?
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Callsheet - call summary webhook receiver");
    println!();
    println!("USAGE:");
    println!("    callsheet-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default '127.0.0.1')");
    println!("    - bind_port: Port number (default 8000)");
    println!("    - database_path: SQLite file (default 'callsheet.db')");
    println!("    - webhook_secret: HMAC-SHA256 secret for signature checks");
    println!("    - signature_header: Header carrying the signature");
    println!("    - require_signature: Reject unsigned requests (default false)");
    println!("    - last_payload_path: Debug snapshot file, '' to disable");
    println!("    - [extractor] max_depth, normalize_timestamps");
    println!();
    println!("ENVIRONMENT:");
    println!("    CALLSHEET_DATABASE_PATH, WEBHOOK_SECRET,");
    println!("    CALLSHEET_BIND_ADDRESS, CALLSHEET_BIND_PORT, RUST_LOG");
    println!();
}
