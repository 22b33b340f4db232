//! # Feedback list filtering
//!
//! Pure derivations of the displayed subset of an in-memory feedback list.
//! Nothing here touches the network or mutates its input; pages recompute the
//! whole output whenever the list or a selection changes.
//!
//! - [`CategoryFilter`] keeps `All` or exactly one [`Category`].
//! - [`TimeWindow`] keeps items created at or after `now - window`.
//! - [`FeedbackFilter`] combines both conjunctively. The two conditions are
//!   independent, so applying them in either order gives the same list.
//!
//! Every filter is stable: surviving items keep their original order.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::models::{Category, Feedback, UnknownCategory};

/// Category selection of a feedback list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// `All` followed by every category, in tab order.
    pub fn options() -> [CategoryFilter; 5] {
        [
            CategoryFilter::All,
            CategoryFilter::Only(Category::Gratitude),
            CategoryFilter::Only(Category::Admiration),
            CategoryFilter::Only(Category::Appreciation),
            CategoryFilter::Only(Category::Respect),
        ]
    }

    pub fn matches(&self, feedback: &Feedback) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => feedback.category == *category,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "すべて",
            CategoryFilter::Only(category) => category.label(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Time window relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    SevenDays,
    ThirtyDays,
    NinetyDays,
    #[default]
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time window: {0}")]
pub struct UnknownWindow(pub String);

impl TimeWindow {
    pub const OPTIONS: [TimeWindow; 4] = [
        TimeWindow::All,
        TimeWindow::SevenDays,
        TimeWindow::ThirtyDays,
        TimeWindow::NinetyDays,
    ];

    pub fn days(&self) -> Option<i64> {
        match self {
            TimeWindow::SevenDays => Some(7),
            TimeWindow::ThirtyDays => Some(30),
            TimeWindow::NinetyDays => Some(90),
            TimeWindow::All => None,
        }
    }

    /// Earliest creation time still inside the window.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.days().map(|d| now - Duration::days(d))
    }

    pub fn contains(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.cutoff(now) {
            Some(cutoff) => created_at >= cutoff,
            None => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::SevenDays => "7d",
            TimeWindow::ThirtyDays => "30d",
            TimeWindow::NinetyDays => "90d",
            TimeWindow::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::SevenDays => "過去7日間",
            TimeWindow::ThirtyDays => "過去30日間",
            TimeWindow::NinetyDays => "過去90日間",
            TimeWindow::All => "全期間",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = UnknownWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(TimeWindow::SevenDays),
            "30d" => Ok(TimeWindow::ThirtyDays),
            "90d" => Ok(TimeWindow::NinetyDays),
            "all" => Ok(TimeWindow::All),
            other => Err(UnknownWindow(other.to_string())),
        }
    }
}

/// Category and time window applied together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedbackFilter {
    pub category: CategoryFilter,
    pub window: TimeWindow,
}

impl FeedbackFilter {
    pub fn new(category: CategoryFilter, window: TimeWindow) -> Self {
        Self { category, window }
    }

    pub fn matches(&self, feedback: &Feedback, now: DateTime<Utc>) -> bool {
        self.category.matches(feedback) && self.window.contains(feedback.created_at, now)
    }

    pub fn apply(&self, items: &[Feedback], now: DateTime<Utc>) -> Vec<Feedback> {
        items
            .iter()
            .filter(|f| self.matches(f, now))
            .cloned()
            .collect()
    }
}

pub fn filter_by_category(items: &[Feedback], category: CategoryFilter) -> Vec<Feedback> {
    items.iter().filter(|f| category.matches(f)).cloned().collect()
}

pub fn filter_by_window(items: &[Feedback], window: TimeWindow, now: DateTime<Utc>) -> Vec<Feedback> {
    items
        .iter()
        .filter(|f| window.contains(f.created_at, now))
        .cloned()
        .collect()
}

/// Number of items per category, every category present.
pub fn category_counts(items: &[Feedback]) -> BTreeMap<Category, usize> {
    let mut counts: BTreeMap<Category, usize> = Category::ALL.iter().map(|c| (*c, 0)).collect();
    for item in items {
        *counts.entry(item.category).or_default() += 1;
    }
    counts
}
