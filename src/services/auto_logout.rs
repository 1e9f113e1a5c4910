use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// How long the app may sit in the background before the next foreground
/// forces a logout.
const BACKGROUND_LOGOUT_THRESHOLD_SECS: i64 = 4 * 60;

/// Decides whether a background stay was long enough to end the session.
/// Timestamps are injected so the policy is a pure clock comparison; the
/// app-lifecycle owner feeds it background/foreground transitions. The CLI
/// driver has no background state, so only the shell integration uses this.
#[allow(dead_code)]
pub struct AutoLogoutPolicy {
    threshold: Duration,
    backgrounded_at: Mutex<Option<DateTime<Utc>>>,
}

impl Default for AutoLogoutPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl AutoLogoutPolicy {
    pub fn new() -> Self {
        Self::with_threshold(Duration::seconds(BACKGROUND_LOGOUT_THRESHOLD_SECS))
    }

    pub fn with_threshold(threshold: Duration) -> Self {
        Self {
            threshold,
            backgrounded_at: Mutex::new(None),
        }
    }

    pub fn note_background(&self, at: DateTime<Utc>) {
        *self.backgrounded_at.lock() = Some(at);
    }

    /// Called on foreground. Returns true when the session should end. The
    /// background mark is consumed either way.
    pub fn note_foreground(&self, at: DateTime<Utc>) -> bool {
        let backgrounded = self.backgrounded_at.lock().take();
        match backgrounded {
            Some(since) => at - since >= self.threshold,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_background_stay_keeps_session() {
        let policy = AutoLogoutPolicy::new();
        let t0 = Utc::now();
        policy.note_background(t0);
        assert!(!policy.note_foreground(t0 + Duration::seconds(30)));
    }

    #[test]
    fn test_long_background_stay_ends_session() {
        let policy = AutoLogoutPolicy::new();
        let t0 = Utc::now();
        policy.note_background(t0);
        assert!(policy.note_foreground(t0 + Duration::minutes(5)));
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let policy = AutoLogoutPolicy::new();
        let t0 = Utc::now();
        policy.note_background(t0);
        assert!(policy.note_foreground(t0 + Duration::minutes(4)));
    }

    #[test]
    fn test_foreground_without_background_mark_is_noop() {
        let policy = AutoLogoutPolicy::new();
        assert!(!policy.note_foreground(Utc::now()));
    }

    #[test]
    fn test_expired_background_stay_drives_store_logout() {
        use crate::session::{LogoutReason, SessionStore, SessionVault};
        use crate::models::{AccountType, LoginOutcome};

        let store = SessionStore::new(SessionVault::temporary().unwrap());
        store
            .login_succeeded(LoginOutcome {
                auth_token: "tok".to_string(),
                account_id: "ACC-1".to_string(),
                account_type: AccountType::Individual,
            })
            .unwrap();

        let policy = AutoLogoutPolicy::new();
        let t0 = Utc::now();
        policy.note_background(t0);

        // The lifecycle owner's foreground handler.
        if policy.note_foreground(t0 + Duration::minutes(6)) {
            store.logout(LogoutReason::AutoLogout).unwrap();
        }
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_mark_is_consumed_after_foreground() {
        let policy = AutoLogoutPolicy::new();
        let t0 = Utc::now();
        policy.note_background(t0);
        assert!(policy.note_foreground(t0 + Duration::minutes(10)));
        // Second foreground without a new background stay.
        assert!(!policy.note_foreground(t0 + Duration::minutes(20)));
    }
}
