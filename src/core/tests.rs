#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::core::storage::{ACCOUNTS_KEY, SESSION_KEY};
    use crate::core::{
        AccountStore, GameProgress, MemoryStorage, ProfilePatch, ProgressPatch, SessionState,
        SessionVault, SharedStorage,
    };

    fn fixture() -> (SharedStorage, AccountStore, SessionVault) {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        let accounts = AccountStore::new(storage.clone());
        let vault = SessionVault::new(storage.clone());
        (storage, accounts, vault)
    }

    #[test]
    fn test_register_then_exists_any_case() {
        let (_storage, accounts, vault) = fixture();

        let state =
            SessionState::default().register(&accounts, &vault, "alice", "alice@x.com", "pw");
        assert!(state.authenticated);
        assert!(state.error.is_none());

        assert!(accounts.exists("alice"));
        assert!(accounts.exists("Alice"));
        assert!(accounts.exists("ALICE"));
        assert!(!accounts.exists("bob"));
    }

    #[test]
    fn test_register_sets_default_progress_and_stats() {
        let (_storage, accounts, vault) = fixture();

        let state =
            SessionState::default().register(&accounts, &vault, "alice", "alice@x.com", "pw");
        let account = state.current.expect("registered account");

        assert_eq!(account.game_progress, GameProgress::default());
        assert_eq!(account.game_progress.current_level, 1);
        assert_eq!(account.game_progress.lives, 3);
        assert!(account.game_progress.progress.is_empty());
        assert_eq!(account.game_progress.skip_count, 0);
        assert!(!account.game_progress.video_watched);

        assert_eq!(account.stats.total_play_time, 0);
        assert_eq!(account.stats.levels_completed, 0);
        assert_eq!(account.stats.total_score, 0);
        assert!(account.stats.last_played > 0);
        assert_eq!(account.id, account.created_at.to_string());
    }

    #[test]
    fn test_duplicate_username_keeps_first_account() {
        let (_storage, accounts, vault) = fixture();

        let first = SessionState::default().register(&accounts, &vault, "alice", "a@x.com", "pw1");
        assert!(first.authenticated);

        let second = SessionState::default().register(&accounts, &vault, "Alice", "b@x.com", "pw2");
        assert!(!second.authenticated);
        assert!(second.current.is_none());
        assert!(!second.loading);
        assert_eq!(second.error.as_deref(), Some("Username already exists"));

        // First credentials stay authoritative.
        assert!(accounts.find_by_credentials("alice", "pw1").is_some());
        assert!(accounts.find_by_credentials("alice", "pw2").is_none());
    }

    #[test]
    fn test_find_by_credentials_username_case_insensitive() {
        let (_storage, accounts, vault) = fixture();
        SessionState::default().register(&accounts, &vault, "alice", "alice@x.com", "pw");

        let found = accounts.find_by_credentials("Alice", "pw");
        assert!(found.is_some());
        assert_eq!(found.unwrap().username, "alice");
    }

    #[test]
    fn test_find_by_credentials_password_exact() {
        let (_storage, accounts, vault) = fixture();
        SessionState::default().register(&accounts, &vault, "alice", "alice@x.com", "pw");

        assert!(accounts.find_by_credentials("alice", "PW").is_none());
        assert!(accounts.find_by_credentials("alice", "pw ").is_none());
        assert!(accounts.find_by_credentials("alice", "").is_none());
    }

    #[test]
    fn test_login_success_persists_session_record() {
        let (_storage, accounts, vault) = fixture();
        SessionState::default()
            .register(&accounts, &vault, "alice", "alice@x.com", "pw")
            .logout(&vault);

        let state = SessionState::default().login(&accounts, &vault, "ALICE", "pw");
        assert!(state.authenticated);
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(!state.new_user);
        assert_eq!(
            state.current.as_ref().map(|a| a.username.as_str()),
            Some("alice")
        );

        let record = vault.load().expect("session record persisted");
        assert_eq!(record.username, "alice");
    }

    #[test]
    fn test_login_wrong_password_keeps_prior_account() {
        let (_storage, accounts, vault) = fixture();
        let signed_in =
            SessionState::default().register(&accounts, &vault, "alice", "a@x.com", "pw");

        let state = signed_in.login(&accounts, &vault, "alice", "nope");
        assert_eq!(state.error.as_deref(), Some("Invalid username or password"));
        assert!(!state.loading);
        // Current account is whatever it was before the call.
        assert_eq!(state.current, signed_in.current);
    }

    #[test]
    fn test_login_unknown_username() {
        let (_storage, accounts, vault) = fixture();

        let state = SessionState::default().login(&accounts, &vault, "ghost", "pw");
        assert!(!state.authenticated);
        assert!(state.current.is_none());
        assert_eq!(state.error.as_deref(), Some("Invalid username or password"));
    }

    #[test]
    fn test_logout_then_restore_is_signed_out() {
        let (_storage, accounts, vault) = fixture();
        let signed_in =
            SessionState::default().register(&accounts, &vault, "alice", "a@x.com", "pw");

        let state = signed_in.logout(&vault);
        assert!(!state.authenticated);
        assert!(state.current.is_none());
        assert!(state.error.is_none());
        assert!(!state.new_user);
        assert!(vault.load().is_none());

        // Simulated reload.
        let restored = SessionState::restore(&vault);
        assert_eq!(restored, SessionState::default());
    }

    #[test]
    fn test_restore_roundtrip() {
        let (_storage, accounts, vault) = fixture();
        let signed_in =
            SessionState::default().register(&accounts, &vault, "alice", "a@x.com", "pw");

        let restored = SessionState::restore(&vault);
        assert!(restored.authenticated);
        assert_eq!(restored.current, signed_in.current);
        assert!(!restored.loading);
        assert!(restored.error.is_none());
    }

    #[test]
    fn test_malformed_account_list_reads_as_empty() {
        let (storage, accounts, _vault) = fixture();
        storage.set(ACCOUNTS_KEY, "{not json");

        assert!(!accounts.exists("alice"));
        assert!(accounts.find_by_credentials("alice", "pw").is_none());
    }

    #[test]
    fn test_malformed_session_record_restores_signed_out() {
        let (storage, _accounts, vault) = fixture();
        storage.set(SESSION_KEY, "[42]");

        assert!(vault.load().is_none());
        assert_eq!(SessionState::restore(&vault), SessionState::default());
    }

    #[test]
    fn test_insert_collision_after_stale_check() {
        let (storage, accounts, vault) = fixture();

        // The hint says the name is free...
        let state = SessionState::default().check_new_user(&accounts, "alice");
        assert!(state.new_user);

        // ...but another tab on the same storage region takes it first.
        let other_tab = AccountStore::new(storage.clone());
        let other_vault = SessionVault::new(storage.clone());
        SessionState::default().register(&other_tab, &other_vault, "alice", "a@x.com", "pw1");

        let state = state.register(&accounts, &vault, "alice", "b@x.com", "pw2");
        assert!(!state.authenticated);
        assert!(state.current.is_none());
        assert_eq!(state.error.as_deref(), Some("Username already exists"));
        assert!(accounts.find_by_credentials("alice", "pw1").is_some());
    }

    #[test]
    fn test_check_new_user_clears_error() {
        let (_storage, accounts, vault) = fixture();
        SessionState::default().register(&accounts, &vault, "alice", "a@x.com", "pw");

        let state = SessionState::default().with_error("Invalid username or password");
        let state = state.check_new_user(&accounts, "alice");
        assert!(!state.new_user);
        assert!(state.error.is_none());

        let state = state.check_new_user(&accounts, "bob");
        assert!(state.new_user);
    }

    #[test]
    fn test_loading_and_error_helpers() {
        let state = SessionState::default().with_loading(true);
        assert!(state.loading);

        // Setting an error settles the loading flag.
        let state = state.with_error("Username already exists");
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Username already exists"));

        let state = state.without_error();
        assert!(state.error.is_none());
    }

    #[test]
    fn test_update_profile_merges_and_writes_back_list() {
        let (_storage, accounts, vault) = fixture();
        let state = SessionState::default().register(&accounts, &vault, "alice", "a@x.com", "pw");

        let patch = ProfilePatch {
            email: Some("new@x.com".to_string()),
            ..ProfilePatch::default()
        };
        let state = state.update_profile(&accounts, &vault, &patch);

        let account = state.current.as_ref().expect("still signed in");
        assert_eq!(account.email, "new@x.com");
        assert_eq!(account.username, "alice");
        assert_eq!(account.password, "pw");

        // Both the session record and the list entry carry the change.
        assert_eq!(vault.load().unwrap().email, "new@x.com");
        assert_eq!(
            accounts.find_by_credentials("alice", "pw").unwrap().email,
            "new@x.com"
        );
    }

    #[test]
    fn test_update_profile_without_account_is_noop() {
        let (_storage, accounts, vault) = fixture();

        let patch = ProfilePatch {
            username: Some("ghost".to_string()),
            ..ProfilePatch::default()
        };
        let state = SessionState::default().update_profile(&accounts, &vault, &patch);

        assert_eq!(state, SessionState::default());
        assert!(vault.load().is_none());
        assert!(!accounts.exists("ghost"));
    }

    #[test]
    fn test_update_game_progress_merges_partial_fields() {
        let (_storage, accounts, vault) = fixture();
        let state = SessionState::default().register(&accounts, &vault, "alice", "a@x.com", "pw");

        let patch = ProgressPatch {
            current_level: Some(4),
            progress: Some(vec![1, 2, 3]),
            ..ProgressPatch::default()
        };
        let state = state.update_game_progress(&vault, &patch);

        let progress = &state.current.as_ref().unwrap().game_progress;
        assert_eq!(progress.current_level, 4);
        assert_eq!(progress.progress, vec![1, 2, 3]);
        // Untouched fields keep their values.
        assert_eq!(progress.lives, 3);
        assert_eq!(progress.skip_count, 0);
        assert!(!progress.video_watched);

        // The session record carries the merge; the account list does not.
        assert_eq!(vault.load().unwrap().game_progress.current_level, 4);
        let listed = accounts.find_by_credentials("alice", "pw").unwrap();
        assert_eq!(listed.game_progress.current_level, 1);
    }

    #[test]
    fn test_session_record_survives_list_corruption() {
        let (storage, accounts, vault) = fixture();
        SessionState::default().register(&accounts, &vault, "alice", "a@x.com", "pw");

        storage.set(ACCOUNTS_KEY, "not json at all");

        // The list is gone, but the device session restores fine.
        let restored = SessionState::restore(&vault);
        assert!(restored.authenticated);
        assert!(!accounts.exists("alice"));
    }
}
