//! Data models exchanged with the Posifeed API.

mod feedback;
mod organization;
mod settings;
mod stats;
mod user;

pub use feedback::{
    Category, Feedback, FeedbackFormData, FeedbackPatch, FeedbackScope, PageMeta, Paginated,
    Party, Reaction, ReactionType, ReactionUser, UnknownCategory,
};
pub use organization::{Health, Organization, OrganizationStats, OrganizationUsers};
pub use settings::NotificationSettings;
pub use stats::{
    growth_rate, CategoryCount, DailyCount, DepartmentShare, OrganizationStatistics, OverallStats,
    PeriodStats, RankedUser, UserStats, UserStatsProfile, UserStatsTotals, WeeklyTrend,
};
pub use user::{
    AuthResponse, Department, LoginRequest, OrganizationRef, PasswordChange, Role, User,
    UserPatch, Users,
};
