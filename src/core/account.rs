//! Player accounts and the persisted account list.
//!
//! The whole list is stored as one JSON array under a fixed key and
//! rewritten on every insert or update; there is no keyed access at the
//! storage layer. Unreadable or malformed content reads as an empty list,
//! never an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::storage::{ACCOUNTS_KEY, SharedStorage};

/// Milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> i64 {
    js_sys::Date::now() as i64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Where the player is in the game.
///
/// Field names stay camelCase on the wire to match the records already
/// sitting in players' localStorage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameProgress {
    pub current_level: u32,
    pub lives: u32,
    /// Completed level numbers, in completion order.
    pub progress: Vec<u32>,
    pub skip_count: u32,
    pub video_watched: bool,
}

impl Default for GameProgress {
    fn default() -> Self {
        GameProgress {
            current_level: 1,
            lives: 3,
            progress: Vec::new(),
            skip_count: 0,
            video_watched: false,
        }
    }
}

/// Lifetime play statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStats {
    pub total_play_time: i64,
    pub levels_completed: u32,
    pub total_score: u64,
    pub last_played: i64,
}

/// A registered player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub username: String,
    /// Stored verbatim. Plain-text credentials are a known defect of the
    /// original client, reproduced here rather than silently changed.
    pub password: String,
    pub email: String,
    pub created_at: i64,
    pub game_progress: GameProgress,
    pub stats: PlayerStats,
}

impl Account {
    /// New account with default progress and fresh stats. The id is the
    /// creation timestamp rendered as a string, as the original client
    /// generated it.
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        let now = now_millis();
        Account {
            id: now.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            created_at: now,
            game_progress: GameProgress::default(),
            stats: PlayerStats {
                last_played: now,
                ..PlayerStats::default()
            },
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AccountError {
    #[error("Username already exists")]
    AlreadyExists,
}

/// The persisted account list.
#[derive(Clone)]
pub struct AccountStore {
    storage: SharedStorage,
}

impl AccountStore {
    pub fn new(storage: SharedStorage) -> Self {
        AccountStore { storage }
    }

    fn load(&self) -> Vec<Account> {
        self.storage
            .get(ACCOUNTS_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn save(&self, accounts: &[Account]) {
        if let Ok(raw) = serde_json::to_string(accounts) {
            self.storage.set(ACCOUNTS_KEY, &raw);
        }
    }

    /// Case-insensitive membership test. An empty, absent or malformed
    /// list answers false.
    pub fn exists(&self, username: &str) -> bool {
        let needle = username.to_lowercase();
        self.load()
            .iter()
            .any(|account| account.username.to_lowercase() == needle)
    }

    /// Append after re-checking uniqueness against the list as it is
    /// right now. This check is authoritative; an earlier `exists`
    /// answer may be stale by the time we get here.
    pub fn insert_if_absent(&self, account: Account) -> Result<(), AccountError> {
        let mut accounts = self.load();
        let needle = account.username.to_lowercase();
        if accounts.iter().any(|a| a.username.to_lowercase() == needle) {
            return Err(AccountError::AlreadyExists);
        }
        accounts.push(account);
        self.save(&accounts);
        Ok(())
    }

    /// Case-insensitive username match, exact password match. Absent on
    /// no match or on any read failure.
    pub fn find_by_credentials(&self, username: &str, password: &str) -> Option<Account> {
        let needle = username.to_lowercase();
        self.load()
            .into_iter()
            .find(|a| a.username.to_lowercase() == needle && a.password == password)
    }

    /// Replace the entry with the matching id and rewrite the list.
    /// Unknown ids leave the list untouched.
    pub fn update(&self, account: &Account) {
        let mut accounts = self.load();
        if let Some(slot) = accounts.iter_mut().find(|a| a.id == account.id) {
            *slot = account.clone();
            self.save(&accounts);
        }
    }
}
