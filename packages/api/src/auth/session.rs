//! Authentication state machine.

use crate::models::{User, UserPatch};

/// Where the session currently stands.
///
/// ```text
/// Uninitialized -> Loading -> Authenticated(user) | Unauthenticated
/// Authenticated -> Unauthenticated          (logout)
/// Authenticated -> Authenticated            (update_user, login)
/// Unauthenticated -> Authenticated          (login)
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    #[default]
    Uninitialized,
    Loading,
    Authenticated(User),
    Unauthenticated,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// True until the startup session check has finished.
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Uninitialized | AuthState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// Enter `Loading`. Returns false if initialization already started, in
    /// which case nothing changes.
    pub fn begin(&mut self) -> bool {
        if *self != AuthState::Uninitialized {
            return false;
        }
        *self = AuthState::Loading;
        true
    }

    /// Finish the startup check. Ignored unless currently `Loading`.
    pub fn resolve(&mut self, user: Option<User>) {
        if *self != AuthState::Loading {
            return;
        }
        *self = match user {
            Some(user) => AuthState::Authenticated(user),
            None => AuthState::Unauthenticated,
        };
    }

    pub fn sign_in(&mut self, user: User) {
        *self = AuthState::Authenticated(user);
    }

    pub fn sign_out(&mut self) {
        *self = AuthState::Unauthenticated;
    }

    /// Shallow-merge `patch` into the current user. Without a user this does
    /// nothing.
    pub fn update_user(&mut self, patch: UserPatch) {
        if let AuthState::Authenticated(user) = self {
            user.merge(patch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use chrono::Utc;

    #[test]
    fn test_startup_goes_through_loading() {
        let mut state = AuthState::default();
        assert!(state.is_loading());

        state.resolve(Some(fixtures::placeholder_user(Utc::now())));
        assert_eq!(state, AuthState::Uninitialized);

        assert!(state.begin());
        assert!(!state.begin());
        assert!(state.is_loading());

        state.resolve(None);
        assert_eq!(state, AuthState::Unauthenticated);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_resolve_only_once() {
        let user = fixtures::placeholder_user(Utc::now());
        let mut state = AuthState::default();
        state.begin();
        state.resolve(Some(user.clone()));
        assert_eq!(state.user(), Some(&user));

        state.resolve(None);
        assert!(state.is_authenticated());
    }

    #[test]
    fn test_update_user_without_user_is_noop() {
        let mut state = AuthState::Unauthenticated;
        state.update_user(UserPatch::default().name("誰か"));
        assert_eq!(state, AuthState::Unauthenticated);

        let mut state = AuthState::Loading;
        state.update_user(UserPatch::default().name("誰か"));
        assert!(state.user().is_none());
    }

    #[test]
    fn test_update_user_merges_shallowly() {
        let user = fixtures::login_user("taro@tech.example.com", Utc::now());
        let mut state = AuthState::Authenticated(user.clone());

        state.update_user(UserPatch::default().name("田中 太郎"));

        let updated = state.user().unwrap();
        assert_eq!(updated.name, "田中 太郎");
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.department, user.department);
        assert_eq!(updated.role, user.role);
    }

    #[test]
    fn test_sign_in_replaces_identity() {
        let now = Utc::now();
        let mut state = AuthState::Authenticated(fixtures::login_user("taro@tech.example.com", now));
        state.sign_in(fixtures::login_user("admin@tech.example.com", now));
        assert!(state.user().unwrap().is_admin());

        state.sign_out();
        assert!(state.user().is_none());
        assert!(!state.is_loading());
    }
}
