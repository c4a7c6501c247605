//! Subcommand handlers.

mod catalog;
mod dashboard;
mod people;

use chrono::{DateTime, Utc};
use edubooster_client::SessionContext;

use crate::Result;
use crate::cli::Commands;
use crate::output::Output;

pub async fn dispatch(command: &Commands, ctx: &SessionContext, out: &Output) -> Result<()> {
    let client = ctx.client();
    match command {
        Commands::Whoami => people::whoami(ctx, out),
        Commands::Logout => {
            ctx.logout().await;
            out.done("logged out")
        }
        Commands::Dashboard => dashboard::show(client, out).await,
        Commands::Users(cmd) => people::users(client, cmd, out).await,
        Commands::Provinces(cmd) => catalog::provinces(client, cmd, out).await,
        Commands::Sections(cmd) => catalog::sections(client, cmd, out).await,
        Commands::Courses(cmd) => catalog::courses(client, cmd, out).await,
        Commands::Subscriptions(cmd) => people::subscriptions(client, cmd, out).await,
        Commands::Notifications(cmd) => people::notifications(client, cmd, out).await,
        // `run` answers this before opening a session (see `needs_session`).
        Commands::Version => version(out),
    }
}

/// Binary name and version. Runs without a backend.
pub fn version(out: &Output) -> Result<()> {
    let name = env!("CARGO_BIN_NAME");
    let version = env!("CARGO_PKG_VERSION");
    out.emit(
        &serde_json::json!({"name": name, "version": version}),
        |_| vec![format!("{name} {version}")],
    )
}

/// `2025-06-01` or `-` when the backend omitted the date.
fn day(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".into())
}
