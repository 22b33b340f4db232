//! Dashboard headline figures.

use chrono::{DateTime, Duration, Utc};

use crate::models::{growth_rate, Feedback};

/// How many recent received items the dashboard lists.
pub const RECENT_LIMIT: usize = 4;

/// One headline card: a value and its week-over-week change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    pub value: u32,
    pub change: i64,
}

impl Metric {
    pub fn new(value: u32, change: i64) -> Self {
        Self { value, change }
    }

    /// `+12%` style label.
    pub fn percent_label(&self) -> String {
        format!("{:+}%", self.change)
    }

    /// `+5pts` style label.
    pub fn points_label(&self) -> String {
        format!("{:+}pts", self.change)
    }

    /// `+2` style label.
    pub fn count_label(&self) -> String {
        format!("{:+}", self.change)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub received_this_week: Metric,
    pub sent_this_week: Metric,
    pub positivity: Metric,
    pub members: Metric,
    pub recent: Vec<Feedback>,
}

impl DashboardSummary {
    /// Build the summary from raw listings.
    ///
    /// Weekly figures count items created in the last seven days and compare
    /// them with the seven days before.
    pub fn from_parts(
        received: &[Feedback],
        sent: &[Feedback],
        positivity: Metric,
        members: Metric,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            received_this_week: weekly(received, now),
            sent_this_week: weekly(sent, now),
            positivity,
            members,
            recent: recent(received),
        }
    }
}

/// The newest [`RECENT_LIMIT`] items, newest first.
pub fn recent(received: &[Feedback]) -> Vec<Feedback> {
    let mut items = received.to_vec();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items.truncate(RECENT_LIMIT);
    items
}

fn weekly(items: &[Feedback], now: DateTime<Utc>) -> Metric {
    let week_start = now - Duration::days(7);
    let previous_start = now - Duration::days(14);

    let current = items.iter().filter(|f| f.created_at >= week_start).count() as u32;
    let previous = items
        .iter()
        .filter(|f| f.created_at >= previous_start && f.created_at < week_start)
        .count() as u32;

    Metric::new(current, growth_rate(current, previous))
}
