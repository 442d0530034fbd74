//! # htmx demo
//!
//! Server-driven partial page updates over plain HTML.
//!
//! This library provides:
//! - A process-wide counter
//! - Search and detail lookup over a static task dataset
//! - A session-backed form with field validation and a dynamic tag list
//!
//! ## Request Flow
//!
//! ```text
//!   request ──▶ handler ──▶ read / mutate state ──▶ View { FullPage | Fragment(name) }
//!                                                          │
//!                                                          ▼
//!                                               pages:: templates ──▶ HTML
//! ```
//!
//! Initial navigation renders full pages; every state-changing request
//! answers with just the fragment htmx swaps into the page.
//!
//! ## Modules
//! - `api`: Router, handlers and session cookie middleware
//! - `counter`, `tasksearch`, `userform`: State and operations of each demo
//! - `view`, `pages`: View selection and markup

pub mod api;
pub mod config;
pub mod counter;
pub mod pages;
pub mod tasksearch;
pub mod userform;
pub mod view;

pub use config::Config;
