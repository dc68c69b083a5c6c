//! Binary entrypoint for `mocks3`.

use clap::Parser;

use mocks3::cli::Cli;
use mocks3::{config, net, observability, StorageService};

#[tokio::main]
async fn main() {
    let raw_args: Vec<String> = std::env::args().collect();
    let cli = Cli::parse_from(&raw_args);

    observability::logging::init(cli.silent);

    if let Err(err) = run(cli, &raw_args).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, raw_args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::resolve(cli, raw_args)?;
    let service = StorageService::new(&config)?;

    let running = net::start(&config, &service).await?;

    println!();
    println!(
        "mocks3 listening on {}:{}",
        running.primary.address, running.primary.port
    );
    if let Some(tls) = &running.secondary {
        println!("mocks3 also listening on {}:{} with TLS", tls.address, tls.port);
    }

    running.wait().await?;
    Ok(())
}
