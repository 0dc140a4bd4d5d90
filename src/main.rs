use std::process::ExitCode;
use tidyup::cli::Cli;
use tidyup::error::{CleanupError, EXIT_USAGE};
use tidyup::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<CleanupError>() {
            // Already reported with the list of valid categories
            Some(err) if err.is_fatal() => ExitCode::from(EXIT_USAGE),
            _ => {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}
