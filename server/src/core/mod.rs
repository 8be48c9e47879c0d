pub mod app;
pub mod route_auth;

pub use varsity_types::extract::Auth;

// vim: ts=4
