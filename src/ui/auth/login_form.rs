//! Login form component
//!
//! Username/password sign-in. As the player types a username the account
//! list is probed after a short debounce; an unknown name shows a
//! "new player" hint offering to switch to registration. The timer is
//! purely presentational; the store only ever sees the probe itself.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::use_auth_context;
use crate::ui::icon::{Icon, icons};

/// Quiet period after the last keystroke before the username is probed.
const NEW_USER_CHECK_DEBOUNCE_MS: u32 = 400;

/// Login form component
#[component]
pub fn LoginForm(
    /// Callback when login is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
    /// Callback to switch to register form
    #[prop(optional, into)]
    on_register_click: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();
    let state = auth.state;

    // Form state
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);

    // Form validation
    let username_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);

    // Keystroke counter so only the latest debounced probe lands.
    let check_seq = StoredValue::new(0u64);

    let validate_username = move || {
        let value = username.get();
        if value.trim().is_empty() {
            username_error.set(Some("Username is required".to_string()));
            false
        } else {
            username_error.set(None);
            true
        }
    };

    let validate_password = move || {
        let value = password.get();
        if value.is_empty() {
            password_error.set(Some("Password is required".to_string()));
            false
        } else {
            password_error.set(None);
            true
        }
    };

    // Debounced new-player probe
    let auth_check = auth.clone();
    let handle_username_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        username.set(value.clone());
        username_error.set(None);

        let trimmed = value.trim().to_string();
        if trimmed.is_empty() {
            return;
        }
        let seq = check_seq.get_value() + 1;
        check_seq.set_value(seq);

        let auth = auth_check.clone();
        spawn_local(async move {
            TimeoutFuture::new(NEW_USER_CHECK_DEBOUNCE_MS).await;
            if check_seq.get_value() == seq {
                auth.check_new_user(&trimmed);
            }
        });
    };

    // Handle form submission
    let auth_submit = auth.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        auth_submit.clear_error();

        let username_valid = validate_username();
        let password_valid = validate_password();
        if !username_valid || !password_valid {
            return;
        }

        let username_val = username.get_untracked().trim().to_string();
        let password_val = password.get_untracked();
        auth_submit.login(&username_val, &password_val);

        if auth_submit.state.get_untracked().authenticated {
            if let Some(callback) = on_success {
                callback.run(());
            }
        }
    };

    view! {
        <div class="w-full max-w-md mx-auto bg-theme-primary rounded-xl shadow-lg p-6 border border-theme">
            <form on:submit=on_submit class="space-y-6">
                // Header
                <div class="text-center">
                    <h2 class="text-2xl font-bold text-theme-primary">
                        "Welcome Back"
                    </h2>
                    <p class="mt-2 text-sm text-theme-secondary">
                        "Sign in to pick up where you left off"
                    </p>
                </div>

                // Global error message
                {move || {
                    state.with(|s| s.error.clone()).map(|error| {
                        view! {
                            <div class="p-3 bg-red-100 dark:bg-red-900/30 border border-red-300 dark:border-red-700 rounded-lg">
                                <p class="text-sm text-red-700 dark:text-red-300">{error}</p>
                            </div>
                        }
                    })
                }}

                // New player hint
                {move || {
                    let show = state.with(|s| s.new_user) && !username.with(|u| u.trim().is_empty());
                    show.then(|| view! {
                        <div class="p-3 bg-blue-100 dark:bg-blue-900/30 border border-blue-300 dark:border-blue-700 rounded-lg flex items-center justify-between gap-2">
                            <p class="text-sm text-blue-700 dark:text-blue-300">
                                "Looks like you're new here!"
                            </p>
                            <button
                                type="button"
                                class="text-sm font-medium text-accent-primary hover:text-accent-primary-hover whitespace-nowrap"
                                on:click=move |_| {
                                    if let Some(callback) = on_register_click.as_ref() {
                                        callback.run(());
                                    }
                                }
                            >
                                "Create account"
                            </button>
                        </div>
                    })
                }}

                // Username field
                <div>
                    <label for="username" class="block text-sm font-medium text-theme-primary mb-1">
                        "Username"
                    </label>
                    <input
                        type="text"
                        id="username"
                        name="username"
                        autocomplete="username"
                        placeholder="Your player name"
                        class="w-full px-3 py-2 bg-theme-secondary border border-theme rounded-lg
                               text-theme-primary placeholder-theme-tertiary
                               focus:outline-none focus:ring-2 focus:ring-accent-primary focus:border-transparent
                               transition-colors"
                        class:border-red-500=move || username_error.get().is_some()
                        prop:value=move || username.get()
                        on:input=handle_username_input
                        on:blur=move |_| { validate_username(); }
                    />
                    {move || {
                        username_error.get().map(|error| {
                            view! {
                                <p class="mt-1 text-sm text-red-500">{error}</p>
                            }
                        })
                    }}
                </div>

                // Password field
                <div>
                    <label for="password" class="block text-sm font-medium text-theme-primary mb-1">
                        "Password"
                    </label>
                    <div class="relative">
                        <input
                            type=move || if show_password.get() { "text" } else { "password" }
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            placeholder="Enter your password"
                            class="w-full px-3 py-2 pr-10 bg-theme-secondary border border-theme rounded-lg
                                   text-theme-primary placeholder-theme-tertiary
                                   focus:outline-none focus:ring-2 focus:ring-accent-primary focus:border-transparent
                                   transition-colors"
                            class:border-red-500=move || password_error.get().is_some()
                            prop:value=move || password.get()
                            on:input=move |ev| {
                                password.set(event_target_value(&ev));
                                password_error.set(None);
                            }
                            on:blur=move |_| { validate_password(); }
                        />
                        <button
                            type="button"
                            class="absolute inset-y-0 right-0 pr-3 flex items-center text-theme-tertiary hover:text-theme-secondary"
                            on:click=move |_| show_password.update(|v| *v = !*v)
                        >
                            {move || {
                                if show_password.get() {
                                    view! {
                                        <Icon name=icons::EYE_CLOSED class="h-5 w-5" />
                                    }.into_any()
                                } else {
                                    view! {
                                        <Icon name=icons::EYE class="h-5 w-5" />
                                    }.into_any()
                                }
                            }}
                        </button>
                    </div>
                    {move || {
                        password_error.get().map(|error| {
                            view! {
                                <p class="mt-1 text-sm text-red-500">{error}</p>
                            }
                        })
                    }}
                </div>

                // Submit button
                <button
                    type="submit"
                    class="w-full py-2.5 px-4 bg-accent-primary hover:bg-accent-primary-hover
                           text-white font-medium rounded-lg
                           focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-accent-primary
                           disabled:opacity-50 disabled:cursor-not-allowed
                           transition-colors"
                    disabled=move || state.with(|s| s.loading)
                >
                    {move || {
                        if state.with(|s| s.loading) {
                            view! {
                                <span class="flex items-center justify-center">
                                    <Icon name=icons::LOADER class="animate-spin -ml-1 mr-2 h-4 w-4 text-white" />
                                    "Signing in..."
                                </span>
                            }.into_any()
                        } else {
                            view! { <span class="block">"Sign In"</span> }.into_any()
                        }
                    }}
                </button>

                // Register link
                <div class="text-center text-sm text-theme-secondary">
                    "Don't have an account? "
                    <button
                        type="button"
                        class="text-accent-primary hover:text-accent-primary-hover font-medium"
                        on:click=move |_| {
                            if let Some(callback) = on_register_click.as_ref() {
                                callback.run(());
                            }
                        }
                    >
                        "Sign up"
                    </button>
                </div>
            </form>
        </div>
    }
}
