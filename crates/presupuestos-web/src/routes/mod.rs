//! Route modules for the web server
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON endpoints and HTMX actions that change state
//! - page.rs: HTMX page and fragment rendering

pub mod budgets;
