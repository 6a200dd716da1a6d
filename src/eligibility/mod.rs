// src/eligibility/mod.rs

pub mod attempts;
pub mod resolver;
pub mod window;

pub use attempts::account_attempts;
pub use resolver::{is_visible_to, resolve_eligibility};
pub use window::evaluate_window;
