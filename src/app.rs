use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::ui::{LoginForm, RegisterForm, UserMenu, provide_auth_context};

/// Which auth screen is showing while signed out.
#[derive(Clone, Copy, PartialEq)]
enum AuthScreen {
    Login,
    Register,
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let auth = provide_auth_context();
    let state = auth.state;

    let screen = RwSignal::new(AuthScreen::Login);

    view! {
        <Title text="Gridfall"/>

        <div class="w-full min-h-screen bg-theme-secondary">
            {move || {
                if state.with(|s| s.authenticated) {
                    view! { <GameShell/> }.into_any()
                } else {
                    let form = match screen.get() {
                        AuthScreen::Login => view! {
                            <LoginForm
                                on_register_click=Callback::new(move |_| screen.set(AuthScreen::Register))
                            />
                        }.into_any(),
                        AuthScreen::Register => view! {
                            <RegisterForm
                                on_login_click=Callback::new(move |_| screen.set(AuthScreen::Login))
                            />
                        }.into_any(),
                    };
                    view! {
                        <div class="flex items-center justify-center min-h-screen p-4">
                            {form}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}

/// Shell around the game board. The board itself reads session state and
/// drives progress updates through the auth context.
#[component]
fn GameShell() -> impl IntoView {
    view! {
        <header class="flex items-center justify-between px-4 py-3 bg-theme-primary border-b border-theme">
            <h1 class="text-lg font-bold text-theme-primary">"Gridfall"</h1>
            <UserMenu/>
        </header>
        <main class="flex items-center justify-center p-8">
            <p class="text-theme-secondary">"Loading board..."</p>
        </main>
    }
}
