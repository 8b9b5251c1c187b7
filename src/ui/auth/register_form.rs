//! Register form component
//!
//! New-player registration with username, email and password. All
//! field-level validation happens here, before the session transition is
//! invoked; the core only re-checks username uniqueness.

use leptos::prelude::*;

use super::context::use_auth_context;
use crate::ui::icon::{Icon, icons};

/// Register form component
#[component]
pub fn RegisterForm(
    /// Callback when registration is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
    /// Callback to switch to login form
    #[prop(optional, into)]
    on_login_click: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();
    let state = auth.state;

    // Form state
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);

    // Form validation
    let username_error = RwSignal::new(None::<String>);
    let email_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);
    let confirm_error = RwSignal::new(None::<String>);

    // Validate username
    let validate_username = move || {
        let value = username.get();
        let value = value.trim();
        if value.is_empty() {
            username_error.set(Some("Username is required".to_string()));
            false
        } else if value.len() < 3 {
            username_error.set(Some("Username must be at least 3 characters".to_string()));
            false
        } else if value.len() > 20 {
            username_error.set(Some("Username must be less than 20 characters".to_string()));
            false
        } else if !value
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            username_error.set(Some(
                "Username can only contain letters, numbers, underscores, and hyphens".to_string(),
            ));
            false
        } else {
            username_error.set(None);
            true
        }
    };

    // Validate email
    let validate_email = move || {
        let value = email.get();
        let value = value.trim();
        if value.is_empty() {
            email_error.set(Some("Email is required".to_string()));
            false
        } else if !value.contains('@') || !value.contains('.') {
            email_error.set(Some("Please enter a valid email".to_string()));
            false
        } else {
            email_error.set(None);
            true
        }
    };

    // Validate password
    let validate_password = move || {
        let value = password.get();
        if value.is_empty() {
            password_error.set(Some("Password is required".to_string()));
            false
        } else if value.len() < 6 {
            password_error.set(Some("Password must be at least 6 characters".to_string()));
            false
        } else {
            password_error.set(None);
            true
        }
    };

    // Validate confirm password
    let validate_confirm = move || {
        let pass = password.get();
        let confirm = confirm_password.get();
        if confirm.is_empty() {
            confirm_error.set(Some("Please confirm your password".to_string()));
            false
        } else if pass != confirm {
            confirm_error.set(Some("Passwords do not match".to_string()));
            false
        } else {
            confirm_error.set(None);
            true
        }
    };

    // Password strength indicator (cosmetic only)
    let password_strength = move || {
        let pass = password.get();
        if pass.is_empty() {
            return (0, "");
        }

        let mut score = 0;
        if pass.len() >= 6 {
            score += 1;
        }
        if pass.len() >= 10 {
            score += 1;
        }
        if pass.chars().any(|c| c.is_uppercase()) && pass.chars().any(|c| c.is_lowercase()) {
            score += 1;
        }
        if pass.chars().any(|c| c.is_numeric()) {
            score += 1;
        }
        if pass.chars().any(|c| !c.is_alphanumeric()) {
            score += 1;
        }

        match score {
            0..=2 => (1, "Weak"),
            3..=4 => (2, "Medium"),
            _ => (3, "Strong"),
        }
    };

    // Handle form submission
    let auth_submit = auth.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        auth_submit.clear_error();

        let username_valid = validate_username();
        let email_valid = validate_email();
        let password_valid = validate_password();
        let confirm_valid = validate_confirm();

        if !username_valid || !email_valid || !password_valid || !confirm_valid {
            return;
        }

        let username_val = username.get_untracked().trim().to_string();
        let email_val = email.get_untracked().trim().to_string();
        let password_val = password.get_untracked();
        auth_submit.register(&username_val, &email_val, &password_val);

        if auth_submit.state.get_untracked().authenticated {
            if let Some(callback) = on_success {
                callback.run(());
            }
        }
    };

    view! {
        <div class="w-full max-w-md mx-auto bg-theme-primary rounded-xl shadow-lg p-6 border border-theme">
            <form on:submit=on_submit class="space-y-5">
                // Header
                <div class="text-center">
                    <h2 class="text-2xl font-bold text-theme-primary">
                        "Create Account"
                    </h2>
                    <p class="mt-2 text-sm text-theme-secondary">
                        "Join Gridfall and keep your progress on this device"
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
                        placeholder="Choose a player name"
                        class="w-full px-3 py-2 bg-theme-secondary border border-theme rounded-lg
                               text-theme-primary placeholder-theme-tertiary
                               focus:outline-none focus:ring-2 focus:ring-accent-primary focus:border-transparent
                               transition-colors"
                        class:border-red-500=move || username_error.get().is_some()
                        prop:value=move || username.get()
                        on:input=move |ev| {
                            username.set(event_target_value(&ev));
                            username_error.set(None);
                        }
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

                // Email field
                <div>
                    <label for="email" class="block text-sm font-medium text-theme-primary mb-1">
                        "Email"
                    </label>
                    <input
                        type="email"
                        id="email"
                        name="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        class="w-full px-3 py-2 bg-theme-secondary border border-theme rounded-lg
                               text-theme-primary placeholder-theme-tertiary
                               focus:outline-none focus:ring-2 focus:ring-accent-primary focus:border-transparent
                               transition-colors"
                        class:border-red-500=move || email_error.get().is_some()
                        prop:value=move || email.get()
                        on:input=move |ev| {
                            email.set(event_target_value(&ev));
                            email_error.set(None);
                        }
                        on:blur=move |_| { validate_email(); }
                    />
                    {move || {
                        email_error.get().map(|error| {
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
                            autocomplete="new-password"
                            placeholder="Create a password"
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
                    // Password strength indicator
                    {move || {
                        let (strength, label) = password_strength();
                        if !password.get().is_empty() {
                            let color_class = match strength {
                                1 => "bg-red-500",
                                2 => "bg-yellow-500",
                                _ => "bg-green-500",
                            };
                            let text_class = match strength {
                                1 => "text-red-500",
                                2 => "text-yellow-500",
                                _ => "text-green-500",
                            };
                            Some(view! {
                                <div class="mt-2">
                                    <div class="flex gap-1 mb-1">
                                        <div class={format!("h-1 flex-1 rounded {}", if strength >= 1 { color_class } else { "bg-gray-300 dark:bg-gray-600" })}></div>
                                        <div class={format!("h-1 flex-1 rounded {}", if strength >= 2 { color_class } else { "bg-gray-300 dark:bg-gray-600" })}></div>
                                        <div class={format!("h-1 flex-1 rounded {}", if strength >= 3 { color_class } else { "bg-gray-300 dark:bg-gray-600" })}></div>
                                    </div>
                                    <p class={format!("text-xs {}", text_class)}>{label}</p>
                                </div>
                            })
                        } else {
                            None
                        }
                    }}
                    {move || {
                        password_error.get().map(|error| {
                            view! {
                                <p class="mt-1 text-sm text-red-500">{error}</p>
                            }
                        })
                    }}
                </div>

                // Confirm password field
                <div>
                    <label for="confirm-password" class="block text-sm font-medium text-theme-primary mb-1">
                        "Confirm Password"
                    </label>
                    <input
                        type=move || if show_password.get() { "text" } else { "password" }
                        id="confirm-password"
                        name="confirm-password"
                        autocomplete="new-password"
                        placeholder="Confirm your password"
                        class="w-full px-3 py-2 bg-theme-secondary border border-theme rounded-lg
                               text-theme-primary placeholder-theme-tertiary
                               focus:outline-none focus:ring-2 focus:ring-accent-primary focus:border-transparent
                               transition-colors"
                        class:border-red-500=move || confirm_error.get().is_some()
                        prop:value=move || confirm_password.get()
                        on:input=move |ev| {
                            confirm_password.set(event_target_value(&ev));
                            confirm_error.set(None);
                        }
                        on:blur=move |_| { validate_confirm(); }
                    />
                    {move || {
                        confirm_error.get().map(|error| {
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
                                    "Creating account..."
                                </span>
                            }.into_any()
                        } else {
                            view! { <span class="block">"Create Account"</span> }.into_any()
                        }
                    }}
                </button>

                // Login link
                <div class="text-center text-sm text-theme-secondary">
                    "Already have an account? "
                    <button
                        type="button"
                        class="text-accent-primary hover:text-accent-primary-hover font-medium"
                        on:click=move |_| {
                            if let Some(callback) = on_login_click.as_ref() {
                                callback.run(());
                            }
                        }
                    >
                        "Sign in"
                    </button>
                </div>
            </form>
        </div>
    }
}
