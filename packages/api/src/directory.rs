//! User directory filtering for the admin users page.

use crate::models::{Role, User};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoleFilter {
    #[default]
    All,
    Only(Role),
}

impl RoleFilter {
    pub fn matches(&self, user: &User) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(role) => user.role == *role,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleFilter::All => "all",
            RoleFilter::Only(role) => role.as_str(),
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => RoleFilter::Only(Role::Admin),
            "user" => RoleFilter::Only(Role::User),
            _ => RoleFilter::All,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn matches(&self, user: &User) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => user.active,
            StatusFilter::Inactive => !user.active,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "active" => StatusFilter::Active,
            "inactive" => StatusFilter::Inactive,
            _ => StatusFilter::All,
        }
    }
}

/// Conjunctive filter over the user list. Empty search and `None` department
/// match everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub search: String,
    pub department: Option<String>,
    pub role: RoleFilter,
    pub status: StatusFilter,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        let term = self.search.trim().to_lowercase();
        let search_ok = term.is_empty()
            || user.name.to_lowercase().contains(&term)
            || user.email.to_lowercase().contains(&term);
        let department_ok = match &self.department {
            None => true,
            Some(name) => user.department_name() == Some(name.as_str()),
        };
        search_ok && department_ok && self.role.matches(user) && self.status.matches(user)
    }

    pub fn apply(&self, users: &[User]) -> Vec<User> {
        users.iter().filter(|u| self.matches(u)).cloned().collect()
    }
}

/// Distinct department names in first-seen order.
pub fn departments(users: &[User]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in users.iter().filter_map(User::department_name) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use chrono::Utc;

    fn ids(users: &[User]) -> Vec<u64> {
        users.iter().map(|u| u.id).collect()
    }

    #[test]
    fn test_default_matches_everyone() {
        let users = fixtures::users(Utc::now());
        assert_eq!(ids(&UserFilter::default().apply(&users)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_and_email() {
        let users = fixtures::users(Utc::now());
        let filter = UserFilter {
            search: "HANAKO".to_string(),
            ..UserFilter::default()
        };
        assert_eq!(ids(&filter.apply(&users)), vec![3]);

        let filter = UserFilter {
            search: "田中".to_string(),
            ..UserFilter::default()
        };
        assert_eq!(ids(&filter.apply(&users)), vec![2]);
    }

    #[test]
    fn test_filters_combine() {
        let mut users = fixtures::users(Utc::now());
        users[1].active = false;

        let filter = UserFilter {
            department: Some("開発部".to_string()),
            role: RoleFilter::Only(Role::User),
            ..UserFilter::default()
        };
        assert_eq!(ids(&filter.apply(&users)), vec![2]);

        let filter = UserFilter {
            status: StatusFilter::Active,
            ..filter
        };
        assert!(filter.apply(&users).is_empty());

        let filter = UserFilter {
            status: StatusFilter::Inactive,
            ..UserFilter::default()
        };
        assert_eq!(ids(&filter.apply(&users)), vec![2]);
    }

    #[test]
    fn test_departments_first_seen() {
        let users = fixtures::users(Utc::now());
        assert_eq!(departments(&users), vec!["開発部", "デザイン部"]);
    }

    #[test]
    fn test_parse_select_values() {
        assert_eq!(RoleFilter::parse("admin"), RoleFilter::Only(Role::Admin));
        assert_eq!(RoleFilter::parse("all"), RoleFilter::All);
        assert_eq!(StatusFilter::parse("inactive"), StatusFilter::Inactive);
        assert_eq!(StatusFilter::parse("whatever"), StatusFilter::All);
    }
}
