//! Sample data served by [`FixtureSource`](crate::source::FixtureSource).
//!
//! Timestamps are relative to the `now` passed in so relative-date rendering
//! looks the same whenever the app is started.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::dashboard::{self, DashboardSummary, Metric};
use crate::filter::TimeWindow;
use crate::models::{
    Category, DailyCount, Department, DepartmentShare, Feedback, OrganizationStatistics, Party,
    RankedUser, Role, User,
};

/// Number of days in the statistics trend chart.
pub const TREND_DAYS: u32 = 14;

fn department(id: u64, name: &str) -> Option<Department> {
    Some(Department {
        id,
        name: name.to_string(),
    })
}

fn user(id: u64, email: &str, name: &str, role: Role, dept: Option<Department>, now: DateTime<Utc>) -> User {
    User {
        id,
        email: email.to_string(),
        name: name.to_string(),
        role,
        active: true,
        department: dept,
        organization: None,
        created_at: now,
        updated_at: now,
    }
}

/// The user a restored fixture session resolves to.
pub fn placeholder_user(now: DateTime<Utc>) -> User {
    user(1, "taro@tech.example.com", "田中太郎", Role::User, None, now)
}

/// The user a fixture login produces for `email`.
pub fn login_user(email: &str, now: DateTime<Utc>) -> User {
    if email.contains("admin") {
        user(1, email, "管理者", Role::Admin, department(1, "管理部"), now)
    } else {
        user(2, email, "ユーザー", Role::User, department(1, "開発部"), now)
    }
}

pub fn users(now: DateTime<Utc>) -> Vec<User> {
    vec![
        user(1, "admin@tech.example.com", "管理者ユーザー", Role::Admin, department(1, "開発部"), now),
        user(2, "taro@tech.example.com", "田中太郎", Role::User, department(1, "開発部"), now),
        user(3, "hanako@tech.example.com", "佐藤花子", Role::User, department(2, "デザイン部"), now),
        user(4, "jiro@tech.example.com", "山田 次郎", Role::User, None, now),
    ]
}

struct Entry {
    id: u64,
    content: &'static str,
    category: Category,
    age: Duration,
    is_read: bool,
    is_anonymous: bool,
    reactions: u32,
    party: &'static str,
}

impl Entry {
    fn build(self, now: DateTime<Utc>, received: bool) -> Feedback {
        let party = Party {
            id: self.id + 100,
            name: self.party.to_string(),
        };
        let (sender, recipient) = if received {
            ((!self.is_anonymous).then_some(party), None)
        } else {
            (None, Some(party))
        };
        Feedback {
            id: self.id,
            content: self.content.to_string(),
            category: self.category,
            is_anonymous: self.is_anonymous,
            is_read: self.is_read,
            reactions_count: self.reactions,
            created_at: now - self.age,
            updated_at: now - self.age,
            sender,
            recipient,
        }
    }
}

pub fn received(now: DateTime<Utc>) -> Vec<Feedback> {
    [
        Entry {
            id: 1,
            content: "昨日のプレゼンテーション、とても分かりやすくて素晴らしかったです！お疲れ様でした。",
            category: Category::Gratitude,
            age: Duration::hours(2),
            is_read: false,
            is_anonymous: false,
            reactions: 3,
            party: "佐藤 花子",
        },
        Entry {
            id: 2,
            content: "新機能の実装、バグもなくスムーズでした。技術力の高さに感服です。",
            category: Category::Admiration,
            age: Duration::hours(5),
            is_read: true,
            is_anonymous: false,
            reactions: 5,
            party: "田中 太郎",
        },
        Entry {
            id: 3,
            content: "長時間の作業、本当にお疲れ様でした。体調に気をつけてくださいね。",
            category: Category::Appreciation,
            age: Duration::hours(24),
            is_read: false,
            is_anonymous: false,
            reactions: 0,
            party: "山田 次郎",
        },
        Entry {
            id: 4,
            content: "困難な状況でも的確な判断で問題を解決する能力、本当にさすがです。",
            category: Category::Respect,
            age: Duration::days(3),
            is_read: true,
            is_anonymous: false,
            reactions: 1,
            party: "鈴木 一郎",
        },
    ]
    .into_iter()
    .map(|e| e.build(now, true))
    .collect()
}

pub fn sent(now: DateTime<Utc>) -> Vec<Feedback> {
    [
        Entry {
            id: 1,
            content: "新機能の実装、本当にお疲れ様でした。バグも少なくて素晴らしいです！",
            category: Category::Appreciation,
            age: Duration::days(1),
            is_read: true,
            is_anonymous: false,
            reactions: 0,
            party: "田中 太郎",
        },
        Entry {
            id: 2,
            content: "プレゼンテーションの技術力とわかりやすさに感動しました。",
            category: Category::Admiration,
            age: Duration::days(3),
            is_read: false,
            is_anonymous: true,
            reactions: 0,
            party: "佐藤 花子",
        },
        Entry {
            id: 3,
            content: "昨日は本当にありがとうございました。とても助かりました！",
            category: Category::Gratitude,
            age: Duration::days(7),
            is_read: true,
            is_anonymous: false,
            reactions: 0,
            party: "山田 花子",
        },
    ]
    .into_iter()
    .map(|e| e.build(now, false))
    .collect()
}

/// Scale applied to every period-dependent figure.
pub fn multiplier(window: TimeWindow) -> f64 {
    match window {
        TimeWindow::SevenDays => 0.3,
        TimeWindow::ThirtyDays => 1.0,
        TimeWindow::NinetyDays => 2.5,
        TimeWindow::All => 4.0,
    }
}

fn scale(value: u32, factor: f64) -> u32 {
    (f64::from(value) * factor).floor() as u32
}

fn ranked(entries: &[(u64, &str, u32)], factor: f64) -> Vec<RankedUser> {
    entries
        .iter()
        .map(|(id, name, count)| RankedUser {
            id: *id,
            name: name.to_string(),
            count: scale(*count, factor),
        })
        .collect()
}

pub fn statistics(window: TimeWindow, today: NaiveDate) -> OrganizationStatistics {
    let m = multiplier(window);
    let monthly = if window == TimeWindow::All { 0.3 } else { 1.0 };

    let feedbacks_by_category: BTreeMap<Category, u32> = [
        (Category::Gratitude, 45),
        (Category::Admiration, 38),
        (Category::Appreciation, 42),
        (Category::Respect, 31),
    ]
    .into_iter()
    .map(|(category, count)| (category, scale(count, m)))
    .collect();

    let feedback_trends = (0..TREND_DAYS)
        .map(|i| DailyCount {
            date: today - Duration::days(i64::from(TREND_DAYS - 1 - i)),
            count: scale((i * 7 + 3) % 15, m.min(1.0)) + 2,
        })
        .collect();

    let department_stats = [("開発部", 68, 44), ("営業部", 42, 27), ("管理部", 28, 18), ("マーケティング部", 18, 11)]
        .into_iter()
        .map(|(name, count, percentage)| DepartmentShare {
            name: name.to_string(),
            count: scale(count, m),
            percentage,
        })
        .collect();

    OrganizationStatistics {
        total_feedbacks: scale(156, m),
        total_users: scale(24, m.min(1.5)),
        feedbacks_by_category,
        feedbacks_this_month: scale(156, monthly),
        feedbacks_last_month: scale(142, monthly),
        top_senders: ranked(
            &[(1, "田中 太郎", 23), (2, "佐藤 花子", 19), (3, "山田 健一", 17), (4, "鈴木 美咲", 15), (5, "高橋 修", 12)],
            m,
        ),
        top_receivers: ranked(
            &[(6, "渡辺 由美", 28), (7, "中村 和彦", 24), (8, "小林 真理", 21), (9, "森田 隆志", 18), (10, "井上 優子", 16)],
            m,
        ),
        feedback_trends,
        department_stats,
    }
}

pub fn dashboard(now: DateTime<Utc>) -> DashboardSummary {
    DashboardSummary {
        received_this_week: Metric::new(12, 12),
        sent_this_week: Metric::new(8, 8),
        positivity: Metric::new(85, 5),
        members: Metric::new(24, 2),
        recent: dashboard::recent(&received(now)),
    }
}
