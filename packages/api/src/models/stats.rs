//! # Statistics models
//!
//! Two shapes live here:
//!
//! - [`UserStats`], the per-user report from `GET /users/:id/stats?period=`.
//! - [`OrganizationStatistics`], the organisation-wide report shown on the
//!   statistics page, with the derived figures the page renders (growth rate,
//!   category share, chart scale).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::feedback::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatsTotals {
    pub sent_feedbacks_count: u32,
    pub received_feedbacks_count: u32,
    pub positivity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatsProfile {
    pub id: u64,
    pub display_name: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub stats: UserStatsTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub count: u32,
    pub name: String,
    pub emoji: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub period: String,
    pub sent_total: u32,
    pub received_total: u32,
    #[serde(default)]
    pub sent_by_category: BTreeMap<Category, CategoryCount>,
    #[serde(default)]
    pub received_by_category: BTreeMap<Category, CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTrend {
    pub week: String,
    pub sent: u32,
    pub received: u32,
    pub positivity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStats {
    pub total_sent: u32,
    pub total_received: u32,
    pub positivity_score: f64,
}

/// `GET /users/:id/stats` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub user: UserStatsProfile,
    pub period_stats: PeriodStats,
    #[serde(default)]
    pub weekly_trends: Vec<WeeklyTrend>,
    pub overall_stats: OverallStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedUser {
    pub id: u64,
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentShare {
    pub name: String,
    pub count: u32,
    pub percentage: u32,
}

/// Organisation-wide statistics for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationStatistics {
    pub total_feedbacks: u32,
    pub total_users: u32,
    pub feedbacks_by_category: BTreeMap<Category, u32>,
    pub feedbacks_this_month: u32,
    pub feedbacks_last_month: u32,
    pub top_senders: Vec<RankedUser>,
    pub top_receivers: Vec<RankedUser>,
    pub feedback_trends: Vec<DailyCount>,
    pub department_stats: Vec<DepartmentShare>,
}

impl OrganizationStatistics {
    /// All-zero report, shown when loading fails.
    pub fn empty() -> Self {
        Self {
            total_feedbacks: 0,
            total_users: 0,
            feedbacks_by_category: Category::ALL.iter().map(|c| (*c, 0)).collect(),
            feedbacks_this_month: 0,
            feedbacks_last_month: 0,
            top_senders: Vec::new(),
            top_receivers: Vec::new(),
            feedback_trends: Vec::new(),
            department_stats: Vec::new(),
        }
    }

    pub fn category_count(&self, category: Category) -> u32 {
        self.feedbacks_by_category.get(&category).copied().unwrap_or(0)
    }

    /// Rounded share of `category` in all feedback, 0 when there is none.
    pub fn category_percentage(&self, category: Category) -> u32 {
        if self.total_feedbacks == 0 {
            return 0;
        }
        let share = f64::from(self.category_count(category)) / f64::from(self.total_feedbacks);
        (share * 100.0).round() as u32
    }

    /// Month-over-month growth in percent.
    pub fn monthly_growth(&self) -> i64 {
        growth_rate(self.feedbacks_this_month, self.feedbacks_last_month)
    }

    /// Average feedback per day over the current month.
    pub fn daily_average(&self) -> u32 {
        (f64::from(self.feedbacks_this_month) / 30.0).round() as u32
    }

    /// Largest daily count, at least 1 so it can scale a bar chart.
    pub fn trend_max(&self) -> u32 {
        self.feedback_trends
            .iter()
            .map(|t| t.count)
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// Each trend day's bar height as a percentage of [`trend_max`](Self::trend_max).
    pub fn trend_heights(&self) -> Vec<u32> {
        let max = u64::from(self.trend_max());
        self.feedback_trends
            .iter()
            .map(|t| (u64::from(t.count) * 100 / max) as u32)
            .collect()
    }
}

/// Rounded percentage change from `previous` to `current`.
///
/// Growth from zero is 100 when anything happened and 0 otherwise.
pub fn growth_rate(current: u32, previous: u32) -> i64 {
    if previous == 0 {
        return if current > 0 { 100 } else { 0 };
    }
    let change = (f64::from(current) - f64::from(previous)) / f64::from(previous);
    (change * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_rate() {
        assert_eq!(growth_rate(156, 142), 10);
        assert_eq!(growth_rate(100, 200), -50);
        assert_eq!(growth_rate(5, 0), 100);
        assert_eq!(growth_rate(0, 0), 0);
    }

    #[test]
    fn test_category_percentage() {
        let mut stats = OrganizationStatistics::empty();
        assert_eq!(stats.category_percentage(Category::Gratitude), 0);

        stats.total_feedbacks = 156;
        stats.feedbacks_by_category.insert(Category::Gratitude, 45);
        assert_eq!(stats.category_percentage(Category::Gratitude), 29);
        assert_eq!(stats.category_percentage(Category::Respect), 0);
    }

    #[test]
    fn test_trend_heights_scale_large_counts() {
        let mut stats = OrganizationStatistics::empty();
        assert!(stats.trend_heights().is_empty());

        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        stats.feedback_trends = vec![
            DailyCount { date: day, count: u32::MAX },
            DailyCount { date: day, count: u32::MAX / 2 },
            DailyCount { date: day, count: 0 },
        ];
        assert_eq!(stats.trend_heights(), vec![100, 49, 0]);
    }

    #[test]
    fn test_trend_max_has_floor() {
        let mut stats = OrganizationStatistics::empty();
        assert_eq!(stats.trend_max(), 1);

        stats.feedback_trends = vec![
            DailyCount { date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), count: 4 },
            DailyCount { date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(), count: 9 },
        ];
        assert_eq!(stats.trend_max(), 9);
    }

    #[test]
    fn test_category_keyed_maps_use_wire_names() {
        let json = serde_json::json!({
            "period": "30",
            "sent_total": 3,
            "received_total": 4,
            "sent_by_category": {
                "gratitude": {"count": 3, "name": "ありがとう", "emoji": "🙏"}
            }
        });
        let stats: PeriodStats = serde_json::from_value(json).unwrap();
        assert_eq!(stats.sent_by_category[&Category::Gratitude].count, 3);
        assert!(stats.received_by_category.is_empty());
    }
}
