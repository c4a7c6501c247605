//! Dashboard statistics.
//!
//! Everything here is a pure function of the fetched collections and a
//! reference instant, except [`Dashboard::load`] which fetches them.

use chrono::{DateTime, Datelike, Local, TimeZone};
use serde::Serialize;
use tracing::debug;

use crate::error::ClientResult;
use crate::interceptor::SessionClient;
use crate::models::{Course, Dated, SubscriptionStats, SubscriptionSummary};

/// Revenue credited per active subscription, in USD.
pub const USD_PER_ACTIVE_SUBSCRIPTION: f64 = 10.0;

/// Creation-date buckets for a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateBuckets {
    pub total: usize,
    pub today: usize,
    pub this_month: usize,
}

impl DateBuckets {
    /// Count `items` against `now`, in `now`'s time zone. Items without a
    /// creation date count toward the total only.
    pub fn count<T, Tz>(items: &[T], now: &DateTime<Tz>) -> Self
    where
        T: Dated,
        Tz: TimeZone,
    {
        let mut buckets = DateBuckets {
            total: items.len(),
            ..Default::default()
        };
        for created in items.iter().filter_map(|item| item.created_at()) {
            let created = created.with_timezone(&now.timezone());
            if created.year() == now.year() && created.month() == now.month() {
                buckets.this_month += 1;
                if created.day() == now.day() {
                    buckets.today += 1;
                }
            }
        }
        buckets
    }

    pub fn growth_percent(&self) -> f64 {
        growth_percent(self.this_month, self.total)
    }
}

/// Share of `total` created this month, as a percentage with one decimal.
pub fn growth_percent(month: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (month as f64 / total as f64 * 1000.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CourseStats {
    #[serde(flatten)]
    pub dates: DateBuckets,
    pub published: usize,
    pub draft: usize,
}

impl CourseStats {
    pub fn compute<Tz: TimeZone>(courses: &[Course], now: &DateTime<Tz>) -> Self {
        let published = courses.iter().filter(|c| c.is_published()).count();
        Self {
            dates: DateBuckets::count(courses, now),
            published,
            draft: courses.len() - published,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SubscriptionStatsView {
    #[serde(flatten)]
    pub dates: DateBuckets,
    pub total_active_count: u64,
    pub total_revenue_usd: f64,
    pub total_revenue_cdf: f64,
    pub active_premium_count: u64,
}

impl SubscriptionStatsView {
    /// `dates` comes from the loaded page; the totals from the stats rows.
    pub fn compute(dates: DateBuckets, summary: &SubscriptionSummary) -> Self {
        let total_active_count = active_count(&summary.stats);
        Self {
            dates,
            total_active_count,
            total_revenue_usd: total_active_count as f64 * USD_PER_ACTIVE_SUBSCRIPTION,
            total_revenue_cdf: summary.stats.iter().map(|s| s.total_revenue_cdf).sum(),
            active_premium_count: summary.active_users,
        }
    }
}

fn active_count(rows: &[SubscriptionStats]) -> u64 {
    rows.iter()
        .find(|row| row.status == "ACTIVE")
        .map(|row| row.total_count)
        .unwrap_or(0)
}

/// Everything the overview screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub users: DateBuckets,
    pub provinces: DateBuckets,
    pub sections: DateBuckets,
    pub courses: CourseStats,
    pub subscriptions: SubscriptionStatsView,
}

impl Dashboard {
    /// Fetch every collection concurrently and aggregate against local time.
    ///
    /// All fetches share `client`, so an expired session triggers a single
    /// renewal no matter how many of them hit it.
    pub async fn load(client: &SessionClient) -> ClientResult<Self> {
        Self::load_at(client, &Local::now()).await
    }

    pub async fn load_at<Tz: TimeZone>(
        client: &SessionClient,
        now: &DateTime<Tz>,
    ) -> ClientResult<Self> {
        let users = client.users();
        let provinces = client.provinces();
        let sections = client.sections();
        let courses = client.courses();
        let subscriptions = client.subscriptions();

        let (users, provinces, sections, courses, page, summary) = futures::join!(
            users.list(),
            provinces.list(),
            sections.list(),
            courses.list(),
            subscriptions.list(1, None),
            subscriptions.stats(),
        );
        let (users, provinces, sections, courses, page, summary) =
            (users?, provinces?, sections?, courses?, page?, summary?);
        debug!(
            users = users.len(),
            provinces = provinces.len(),
            sections = sections.len(),
            courses = courses.len(),
            "dashboard loaded"
        );

        Ok(Self {
            users: DateBuckets::count(&users, now),
            provinces: DateBuckets::count(&provinces, now),
            sections: DateBuckets::count(&sections, now),
            courses: CourseStats::compute(&courses, now),
            subscriptions: SubscriptionStatsView::compute(
                DateBuckets::count(&page.subscriptions, now),
                &summary,
            ),
        })
    }
}
