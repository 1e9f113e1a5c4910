use parking_lot::{Mutex, RwLock};

use crate::errors::AppError;
use crate::models::{AccountOption, AccountType, LinkedAccount, LoginOutcome, Session};
use crate::session::vault::SessionVault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    UserRequested,
    /// Backgrounded past the auto-logout threshold.
    #[allow(dead_code)]
    AutoLogout,
    ForcedUpdate,
}

/// What observers get told about. `AccountSwitched` is the cue to reset the
/// navigation stack for the new account type (family-group accounts get a
/// different screen stack).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn(Session),
    LoggedOut(LogoutReason),
    AccountSwitched {
        account_id: String,
        account_type: AccountType,
    },
}

type Observer = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// The one piece of cross-component shared state: the active session.
///
/// Explicit and injected rather than ambient; every consumer holds a
/// reference. Each mutation persists to the vault before notifying observers
/// synchronously, so an observer never sees a state the vault does not.
pub struct SessionStore {
    session: RwLock<Option<Session>>,
    observers: Mutex<Vec<Observer>>,
    vault: SessionVault,
}

impl SessionStore {
    pub fn new(vault: SessionVault) -> Self {
        Self {
            session: RwLock::new(None),
            observers: Mutex::new(Vec::new()),
            vault,
        }
    }

    pub fn subscribe(&self, observer: impl Fn(&SessionEvent) + Send + Sync + 'static) {
        self.observers.lock().push(Box::new(observer));
    }

    pub fn session(&self) -> Option<Session> {
        self.session.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    /// Rehydrate from the vault at startup. No event is emitted; restore is
    /// not a login.
    pub fn restore(&self) -> Result<bool, AppError> {
        match self.vault.load()? {
            Some(session) => {
                *self.session.write() = Some(session);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn login_succeeded(&self, outcome: LoginOutcome) -> Result<(), AppError> {
        let session = Session {
            auth_token: outcome.auth_token,
            account_id: outcome.account_id,
            account_type: outcome.account_type,
        };
        self.vault.save(&session)?;
        *self.session.write() = Some(session.clone());
        tracing::info!("session established for account {}", session.account_id);
        self.notify(&SessionEvent::LoggedIn(session));
        Ok(())
    }

    pub fn logout(&self, reason: LogoutReason) -> Result<(), AppError> {
        self.vault.wipe()?;
        *self.session.write() = None;
        tracing::info!("session cleared ({:?})", reason);
        self.notify(&SessionEvent::LoggedOut(reason));
        Ok(())
    }

    /// Replace the active account in place without leaving the
    /// authenticated state.
    pub fn switch_account(
        &self,
        account_id: &str,
        account_type: AccountType,
    ) -> Result<(), AppError> {
        let session = {
            let mut guard = self.session.write();
            let session = guard.as_mut().ok_or(AppError::NoSession)?;
            session.account_id = account_id.to_string();
            session.account_type = account_type;
            session.clone()
        };
        self.vault.save(&session)?;
        tracing::info!("active account switched to {}", account_id);
        self.notify(&SessionEvent::AccountSwitched {
            account_id: account_id.to_string(),
            account_type,
        });
        Ok(())
    }

    /// Build the account-switch list: the active account first, then the
    /// linked entity accounts, skipping a linked entry that duplicates the
    /// active one.
    pub fn account_options(&self, linked: &[LinkedAccount]) -> Vec<AccountOption> {
        let Some(session) = self.session() else {
            return Vec::new();
        };

        let mut options = vec![AccountOption {
            key: session.account_id.clone(),
            label: session.account_id.clone(),
            account_type: session.account_type,
        }];

        for account in linked {
            if account.account_id == session.account_id {
                continue;
            }
            options.push(AccountOption {
                key: account.account_id.clone(),
                label: account.account_name.clone(),
                account_type: account.account_type,
            });
        }
        options
    }

    fn notify(&self, event: &SessionEvent) {
        for observer in self.observers.lock().iter() {
            observer(event);
        }
    }
}
