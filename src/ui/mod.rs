pub mod auth;
pub mod icon;

pub use auth::{AuthContext, LoginForm, RegisterForm, UserMenu, provide_auth_context, use_auth_context};
pub use icon::{Icon, icons};
