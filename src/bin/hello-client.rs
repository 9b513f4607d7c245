//! Greeting client entry point.
//!
//! Sends one request, prints the status line, and exits non-zero unless the
//! server answered `200 OK` with the expected greeting.

use std::process::ExitCode;

use clap::Parser;

use hello_tls::cli::ClientArgs;
use hello_tls::config::FAILURE_EXIT_CODE;
use hello_tls::{client, logging, Error};

#[tokio::main]
async fn main() -> ExitCode {
    let args = ClientArgs::parse();
    logging::init(&args.log_options());

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Usage(usage)) => {
            println!("{usage}");
            ExitCode::from(FAILURE_EXIT_CODE)
        }
        Err(e) => {
            tracing::error!(error = %e, "Request failed");
            eprintln!("{e}");
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}

async fn run(args: &ClientArgs) -> Result<(), Error> {
    let settings = args.settings()?;

    let greeting = client::run(&settings).await?;
    println!("{}", greeting.status);
    greeting.validate()
}
