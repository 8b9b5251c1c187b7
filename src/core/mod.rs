//! Account storage and session state for the Gridfall client.

pub mod account;
pub mod session;
pub mod storage;
#[cfg(test)]
mod tests;

pub use account::{Account, AccountError, AccountStore, GameProgress, PlayerStats};
pub use session::{ProfilePatch, ProgressPatch, SessionState, SessionVault};
pub use storage::{BrowserStorage, MemoryStorage, SharedStorage, StoragePort};
