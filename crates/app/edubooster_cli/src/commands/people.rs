//! Accounts: the admin, platform users, subscriptions and notifications.

use edubooster_client::models::{Notification, Subscription, User};
use edubooster_client::resources::unread as unread_only;
use edubooster_client::{SessionClient, SessionContext};

use super::day;
use crate::cli::{NotificationsCmd, SubscriptionsCmd, UsersCmd};
use crate::output::Output;
use crate::{Error, Result};

pub fn whoami(ctx: &SessionContext, out: &Output) -> Result<()> {
    let user = ctx.session().user().ok_or(Error::NotLoggedIn)?;
    out.emit(&user, |u| {
        vec![format!(
            "{} <{}> role={}",
            u.display_name(),
            u.email,
            u.role.as_deref().unwrap_or("-")
        )]
    })
}

pub async fn users(client: &SessionClient, cmd: &UsersCmd, out: &Output) -> Result<()> {
    let users = client.users();
    match cmd {
        UsersCmd::List => {
            let list = users.list().await?;
            out.emit(&list, |list| list.iter().map(user_line).collect())
        }
        UsersCmd::Delete { id } => {
            users.remove(id).await?;
            out.done(&format!("user {id} deleted"))
        }
        UsersCmd::Restore { id } => {
            users.restore(id).await?;
            out.done(&format!("user {id} restored"))
        }
        UsersCmd::ToggleActive { id } => {
            let outcome = users.toggle_active(id).await?;
            let state = if outcome.is_active { "active" } else { "inactive" };
            out.done(
                &outcome
                    .message
                    .unwrap_or_else(|| format!("user {id} is now {state}")),
            )
        }
    }
}

fn user_line(u: &User) -> String {
    let flags = match (u.is_deleted, u.is_active) {
        (true, _) => "deleted",
        (false, true) => "active",
        (false, false) => "inactive",
    };
    format!(
        "{}  {:<32} {:<24} {:<8} {}",
        u.id,
        u.email,
        u.name.as_deref().unwrap_or("-"),
        flags,
        day(u.created_at)
    )
}

pub async fn subscriptions(
    client: &SessionClient,
    cmd: &SubscriptionsCmd,
    out: &Output,
) -> Result<()> {
    let subscriptions = client.subscriptions();
    match cmd {
        SubscriptionsCmd::List { page, status } => {
            let page = subscriptions.list(*page, *status).await?;
            out.emit(&page, |p| {
                let mut lines: Vec<String> = p.subscriptions.iter().map(subscription_line).collect();
                lines.push(format!("page {}/{}", p.current_page, p.total_pages));
                lines
            })
        }
        SubscriptionsCmd::Stats => {
            let summary = subscriptions.stats().await?;
            out.emit(&summary, |s| {
                let mut lines: Vec<String> = s
                    .stats
                    .iter()
                    .map(|row| {
                        format!(
                            "{:<8} count={} usd={} cdf={}",
                            row.status, row.total_count, row.total_revenue_usd, row.total_revenue_cdf
                        )
                    })
                    .collect();
                lines.push(format!("active premium users: {}", s.active_users));
                lines
            })
        }
        SubscriptionsCmd::Activate { id } => {
            subscriptions.activate(id).await?;
            out.done(&format!("subscription {id} activated"))
        }
    }
}

fn subscription_line(s: &Subscription) -> String {
    format!(
        "{}  {:<8} {} {}  {} <{}>  {}",
        s.id,
        s.status.as_str(),
        s.amount,
        s.currency,
        s.user.name,
        s.user.email,
        day(s.created_at)
    )
}

pub async fn notifications(
    client: &SessionClient,
    cmd: &NotificationsCmd,
    out: &Output,
) -> Result<()> {
    let notifications = client.notifications();
    match cmd {
        NotificationsCmd::List { unread } => {
            let all = notifications.list().await?;
            let shown: Vec<&Notification> = if *unread {
                unread_only(&all)
            } else {
                all.iter().collect()
            };
            out.emit(&shown, |list| list.iter().copied().map(notification_line).collect())
        }
        NotificationsCmd::Read { id } => {
            notifications.mark_read(id).await?;
            out.done(&format!("notification {id} marked as read"))
        }
    }
}

fn notification_line(n: &Notification) -> String {
    format!(
        "{} {}  {}  {}",
        if n.read { " " } else { "*" },
        day(n.created_at),
        n.title,
        n.body
    )
}
