use tracing_subscriber::EnvFilter;

use crate::Error;

/// Install the stderr subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init(verbose: bool) -> Result<(), Error> {
    let default = if verbose {
        "info,edubooster_client=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .map_err(|e| Error::Logging(e.to_string()))?;

    // stdout carries command output only.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(verbose)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
