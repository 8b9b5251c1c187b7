//! Player menu component
//!
//! Header strip for the signed-in player: name, current level, remaining
//! lives, and a sign-out button.

use leptos::prelude::*;

use super::context::use_auth_context;
use crate::ui::icon::{Icon, icons};

/// Player menu for the game header
#[component]
pub fn UserMenu() -> impl IntoView {
    let auth = use_auth_context();
    let state = auth.state;

    let auth_logout = auth.clone();
    let handle_logout = move |_| auth_logout.logout();

    view! {
        <div class="flex items-center gap-4">
            {move || {
                state.with(|s| s.current.clone()).map(|account| {
                    let level = account.game_progress.current_level;
                    let lives = account.game_progress.lives;
                    view! {
                        <div class="flex items-center gap-3">
                            <span class="text-sm font-medium text-theme-primary max-w-[120px] truncate">
                                {account.username.clone()}
                            </span>
                            <span class="flex items-center gap-1 text-sm text-theme-secondary">
                                <Icon name=icons::GRID class="h-4 w-4" />
                                {format!("Level {}", level)}
                            </span>
                            <span class="flex items-center gap-1 text-sm text-theme-secondary">
                                <Icon name=icons::HEART class="h-4 w-4" />
                                {lives.to_string()}
                            </span>
                        </div>
                    }
                })
            }}
            <button
                type="button"
                class="flex items-center gap-1.5 px-3 py-1.5 text-sm font-medium text-theme-secondary
                       hover:text-theme-primary hover:bg-theme-secondary rounded-lg transition-colors"
                on:click=handle_logout
            >
                <Icon name=icons::LOGOUT class="h-4 w-4" />
                "Sign Out"
            </button>
        </div>
    }
}
