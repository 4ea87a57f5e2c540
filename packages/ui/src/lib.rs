//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod components;
pub mod dates;
pub mod prompt;
pub mod state;

pub use prompt::{BrowserPrompt, Prompt};

mod service;
pub use service::{make_service, use_personne_service, Service, ServiceProvider};

pub mod views;

pub const THEME_CSS: Asset = asset!("/assets/theme.css");

mod navbar;
pub use navbar::Navbar;

pub mod activity_log;
pub use activity_log::{Activity, ActivityLog, LogLevel, log_activity, use_activity_log};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};
