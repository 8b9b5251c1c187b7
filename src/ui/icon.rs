use leptos::prelude::*;

#[component]
pub fn Icon(
    /// Icon name (without the .svg extension)
    name: &'static str,
    /// CSS classes for styling
    #[prop(default = "w-5 h-5")]
    class: &'static str,
) -> impl IntoView {
    let icon_path = format!("/icons/{}.svg", name);

    view! {
        <img
            src=icon_path
            class=class
            alt=name
            draggable=false
        />
    }
}

/// Predefined icon names
#[allow(dead_code)]
pub mod icons {
    pub const EYE: &str = "eye";
    pub const EYE_CLOSED: &str = "eye-closed";
    pub const LOADER: &str = "loader";
    pub const LOGOUT: &str = "logout";
    pub const HEART: &str = "heart";
    pub const GRID: &str = "grid";
    pub const X: &str = "x";
}
