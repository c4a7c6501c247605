use edubooster_client::stats::{DateBuckets, growth_percent};
use edubooster_client::{Dashboard, SessionClient};

use crate::Result;
use crate::output::Output;

pub async fn show(client: &SessionClient, out: &Output) -> Result<()> {
    let dashboard = Dashboard::load(client).await?;
    out.emit(&dashboard, |d| {
        vec![
            bucket_line("users", &d.users),
            bucket_line("provinces", &d.provinces),
            bucket_line("sections", &d.sections),
            format!(
                "{}  published={} draft={}",
                bucket_line("courses", &d.courses.dates),
                d.courses.published,
                d.courses.draft
            ),
            format!(
                "{}  active={} premium_users={} revenue={} USD / {} CDF",
                bucket_line("subscriptions", &d.subscriptions.dates),
                d.subscriptions.total_active_count,
                d.subscriptions.active_premium_count,
                d.subscriptions.total_revenue_usd,
                d.subscriptions.total_revenue_cdf
            ),
        ]
    })
}

fn bucket_line(label: &str, b: &DateBuckets) -> String {
    format!(
        "{label:<14} total={:<5} today={:<4} month={:<4} (+{}%)",
        b.total,
        b.today,
        b.this_month,
        growth_percent(b.this_month, b.total)
    )
}
