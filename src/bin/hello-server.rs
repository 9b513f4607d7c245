//! Greeting server entry point.
//!
//! Parses the command line, initializes tracing, builds the trust
//! configuration and serves the greeting until SIGINT/SIGTERM.

use std::process::ExitCode;

use axum_server::Handle;
use clap::Parser;

use hello_tls::cli::ServerArgs;
use hello_tls::config::FAILURE_EXIT_CODE;
use hello_tls::http::{shutdown, start_server};
use hello_tls::routes::create_router;
use hello_tls::{logging, Error};

#[tokio::main]
async fn main() -> ExitCode {
    let args = ServerArgs::parse();
    logging::init(&args.log_options());

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Usage(usage)) => {
            println!("{usage}");
            ExitCode::from(FAILURE_EXIT_CODE)
        }
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            eprintln!("{e}");
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}

async fn run(args: &ServerArgs) -> Result<(), Error> {
    let settings = args.settings()?;

    let handle = Handle::new();
    shutdown::setup_shutdown_handler(handle.clone());

    let app = create_router(settings.trust.mode_name());
    start_server(app, &settings, handle).await?;

    tracing::info!("Server stopped");
    Ok(())
}
