//! Auth context for managing player authentication state
//!
//! Wraps the core session state in a reactive signal and exposes its
//! transitions to components. Every operation runs synchronously against
//! localStorage. The loading flag is raised on the signal before
//! register/login so forms observe it, then settled with the result.

use std::sync::Arc;

use leptos::logging::log;
use leptos::prelude::*;

use crate::core::{
    Account, AccountStore, BrowserStorage, ProfilePatch, ProgressPatch, SessionState,
    SessionVault, SharedStorage,
};

/// Auth context providing session state and transitions
#[derive(Clone)]
pub struct AuthContext {
    /// Current session state
    pub state: RwSignal<SessionState>,
    accounts: AccountStore,
    vault: SessionVault,
}

impl AuthContext {
    /// Build a context over the given storage port, restoring any
    /// persisted session record as the initial state.
    pub fn new(storage: SharedStorage) -> Self {
        let accounts = AccountStore::new(storage.clone());
        let vault = SessionVault::new(storage);
        let initial = SessionState::restore(&vault);
        if let Some(account) = &initial.current {
            log!("restored session for {}", account.username);
        }
        AuthContext {
            state: RwSignal::new(initial),
            accounts,
            vault,
        }
    }

    /// Check if a player is signed in
    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.authenticated)
    }

    /// Get the signed-in account (if any)
    pub fn user(&self) -> Option<Account> {
        self.state.with(|s| s.current.clone())
    }

    /// Clear the error message
    pub fn clear_error(&self) {
        let next = self.state.get_untracked().without_error();
        self.state.set(next);
    }

    /// Probe the account list and flip the new-player hint
    pub fn check_new_user(&self, username: &str) {
        let next = self
            .state
            .get_untracked()
            .check_new_user(&self.accounts, username);
        self.state.set(next);
    }

    /// Sign in with username and password
    pub fn login(&self, username: &str, password: &str) {
        let pending = self
            .state
            .get_untracked()
            .with_loading(true)
            .without_error();
        self.state.set(pending.clone());
        self.state
            .set(pending.login(&self.accounts, &self.vault, username, password));
    }

    /// Register a new player and sign them in
    pub fn register(&self, username: &str, email: &str, password: &str) {
        let pending = self
            .state
            .get_untracked()
            .with_loading(true)
            .without_error();
        self.state.set(pending.clone());
        self.state
            .set(pending.register(&self.accounts, &self.vault, username, email, password));
    }

    /// Sign out and delete the persisted session record
    pub fn logout(&self) {
        log!("signing out");
        let next = self.state.get_untracked().logout(&self.vault);
        self.state.set(next);
    }

    /// Merge profile fields into the signed-in account
    pub fn update_profile(&self, patch: &ProfilePatch) {
        let next = self
            .state
            .get_untracked()
            .update_profile(&self.accounts, &self.vault, patch);
        self.state.set(next);
    }

    /// Merge game-progress fields into the signed-in account
    pub fn update_game_progress(&self, patch: &ProgressPatch) {
        let next = self
            .state
            .get_untracked()
            .update_game_progress(&self.vault, patch);
        self.state.set(next);
    }
}

/// Provide auth context to the component tree, backed by localStorage
pub fn provide_auth_context() -> AuthContext {
    let ctx = AuthContext::new(Arc::new(BrowserStorage));
    provide_context(ctx.clone());
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}
