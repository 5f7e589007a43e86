//! Debounced search-select for an HR management desktop client.
//!
//! The headless pieces ([`debounce`], [`select`], [`store`], [`roles`]) run
//! against the [`platform::Platform`] trait and can be driven without a
//! window. [`app`] hosts them in an iced approver picker.

pub mod app;
pub mod config;
pub mod debounce;
pub mod platform;
pub mod roles;
pub mod select;
pub mod source;
pub mod store;
pub mod ui;
