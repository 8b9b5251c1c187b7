//! Session state and its transitions.
//!
//! `SessionState` is what the UI renders: the signed-in account (if any),
//! a loading flag, the last error message and the new-player hint.
//! Transitions are pure functions returning a new value; the account
//! store and the session vault are their only collaborators. Everything
//! here is synchronous; the loading flag exists for the UI contract,
//! not because any transition suspends.

use super::account::{Account, AccountStore};
use super::storage::{SESSION_KEY, SharedStorage};

const ERR_INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Persisted "who is logged in on this device" slot, separate from the
/// account list.
#[derive(Clone)]
pub struct SessionVault {
    storage: SharedStorage,
}

impl SessionVault {
    pub fn new(storage: SharedStorage) -> Self {
        SessionVault { storage }
    }

    /// Malformed or unreadable content reads as "nobody logged in".
    pub fn load(&self) -> Option<Account> {
        let raw = self.storage.get(SESSION_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn save(&self, account: &Account) {
        if let Ok(raw) = serde_json::to_string(account) {
            self.storage.set(SESSION_KEY, &raw);
        }
    }

    pub fn clear(&self) {
        self.storage.remove(SESSION_KEY);
    }
}

/// Partial account update; `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Partial game-progress update; `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct ProgressPatch {
    pub current_level: Option<u32>,
    pub lives: Option<u32>,
    pub progress: Option<Vec<u32>>,
    pub skip_count: Option<u32>,
    pub video_watched: Option<bool>,
}

/// Authentication state exposed to the UI.
///
/// `authenticated` is tracked alongside `current` rather than derived
/// from it; every transition here keeps the two in step (authenticated
/// implies a current account).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub current: Option<Account>,
    pub authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub new_user: bool,
}

impl SessionState {
    /// Initial state for this device: a well-formed persisted session
    /// record signs the player back in, anything else starts signed out.
    pub fn restore(vault: &SessionVault) -> Self {
        match vault.load() {
            Some(account) => SessionState {
                current: Some(account),
                authenticated: true,
                ..SessionState::default()
            },
            None => SessionState::default(),
        }
    }

    pub fn with_loading(&self, loading: bool) -> Self {
        SessionState {
            loading,
            ..self.clone()
        }
    }

    /// Set the error message and settle the loading flag.
    pub fn with_error(&self, message: impl Into<String>) -> Self {
        SessionState {
            error: Some(message.into()),
            loading: false,
            ..self.clone()
        }
    }

    pub fn without_error(&self) -> Self {
        SessionState {
            error: None,
            ..self.clone()
        }
    }

    /// Flip the new-player hint from a membership probe. The answer can
    /// go stale before `register` runs; `register` re-checks.
    pub fn check_new_user(&self, accounts: &AccountStore, username: &str) -> Self {
        SessionState {
            new_user: !accounts.exists(username),
            error: None,
            ..self.clone()
        }
    }

    /// Register a new player. Fields arrive pre-trimmed and pre-validated
    /// by the form; only uniqueness is checked here.
    pub fn register(
        &self,
        accounts: &AccountStore,
        vault: &SessionVault,
        username: &str,
        email: &str,
        password: &str,
    ) -> Self {
        if accounts.exists(username) {
            return self.with_error("Username already exists");
        }

        let account = Account::new(username, email, password);
        // The list may have gained this username since the check above;
        // the insert re-checks and that answer wins.
        if let Err(err) = accounts.insert_if_absent(account.clone()) {
            return self.with_error(err.to_string());
        }

        vault.save(&account);
        SessionState {
            current: Some(account),
            authenticated: true,
            loading: false,
            error: None,
            new_user: false,
        }
    }

    /// Sign in with username and password. A failed match leaves the
    /// current account exactly as it was.
    pub fn login(
        &self,
        accounts: &AccountStore,
        vault: &SessionVault,
        username: &str,
        password: &str,
    ) -> Self {
        match accounts.find_by_credentials(username, password) {
            Some(account) => {
                vault.save(&account);
                SessionState {
                    current: Some(account),
                    authenticated: true,
                    loading: false,
                    error: None,
                    new_user: false,
                }
            }
            None => self.with_error(ERR_INVALID_CREDENTIALS),
        }
    }

    /// Sign out: drop the account, error and new-player hint, and delete
    /// the persisted session record.
    pub fn logout(&self, vault: &SessionVault) -> Self {
        vault.clear();
        SessionState {
            loading: self.loading,
            ..SessionState::default()
        }
    }

    /// Merge profile fields into the signed-in account. Re-persists both
    /// the session record and the matching account-list entry, so the
    /// list stays in step with what this device shows. No-op when nobody
    /// is signed in.
    pub fn update_profile(
        &self,
        accounts: &AccountStore,
        vault: &SessionVault,
        patch: &ProfilePatch,
    ) -> Self {
        let Some(current) = &self.current else {
            return self.clone();
        };

        let mut account = current.clone();
        if let Some(username) = &patch.username {
            account.username = username.clone();
        }
        if let Some(email) = &patch.email {
            account.email = email.clone();
        }
        if let Some(password) = &patch.password {
            account.password = password.clone();
        }

        vault.save(&account);
        accounts.update(&account);
        SessionState {
            current: Some(account),
            ..self.clone()
        }
    }

    /// Merge game-progress fields into the signed-in account. Only the
    /// session record is re-persisted; progress stays device-local until
    /// the next profile-level write. No-op when nobody is signed in.
    pub fn update_game_progress(&self, vault: &SessionVault, patch: &ProgressPatch) -> Self {
        let Some(current) = &self.current else {
            return self.clone();
        };

        let mut account = current.clone();
        let progress = &mut account.game_progress;
        if let Some(level) = patch.current_level {
            progress.current_level = level;
        }
        if let Some(lives) = patch.lives {
            progress.lives = lives;
        }
        if let Some(completed) = &patch.progress {
            progress.progress = completed.clone();
        }
        if let Some(skips) = patch.skip_count {
            progress.skip_count = skips;
        }
        if let Some(watched) = patch.video_watched {
            progress.video_watched = watched;
        }

        vault.save(&account);
        SessionState {
            current: Some(account),
            ..self.clone()
        }
    }
}
