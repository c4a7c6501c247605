// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use edubooster_client::models::Credentials;
use edubooster_client::{ClientConfig, LogNavigator, SessionClient, SessionContext};
use output::Output;
use tracing::{debug, error};

mod cli;
mod commands;
mod logging;
mod output;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    logging::init(args.verbose)?;

    let out = Output::new(args.json);
    if !args.command.needs_session() {
        return commands::version(&out);
    }

    let mut config = ClientConfig::from_env();
    if let Some(url) = &args.api_url {
        config.base_url = url.clone();
    }
    let navigator = Arc::new(LogNavigator::new());
    let client = SessionClient::new(config, navigator)?;
    let ctx = SessionContext::new(client);

    let logged_in = open_session(&ctx, &args).await?;
    let result = commands::dispatch(&args.command, &ctx, &out).await;

    // Cookies live only as long as this process; end the session we opened.
    if logged_in && !matches!(args.command, Commands::Logout) && ctx.session().is_authenticated() {
        ctx.logout().await;
    }

    result.map_err(|e| match e {
        Error::Client(err) if err.is_session_terminal() => Error::SessionExpired {
            location: ctx.client().config().session_expired_location(),
        },
        other => other,
    })
}

/// Log in with the supplied credentials, or fall back to an existing
/// session. Returns whether this run opened the session.
async fn open_session(ctx: &SessionContext, args: &Cli) -> Result<bool> {
    if let (Some(email), Some(password)) = (&args.email, &args.password) {
        ctx.login(&Credentials::new(email.as_str(), password.as_str()))
            .await?;
        return Ok(true);
    }

    debug!("no credentials supplied, checking for an existing session");
    if ctx.check_session().await.user().is_none() {
        return Err(Error::NotLoggedIn);
    }
    Ok(false)
}
