

pub mod api;
pub mod core;
pub mod dashboard;

pub use api::{ApiClient, DashboardApi, Endpoint};
pub use crate::core::config::DashboardConfig;
pub use crate::core::error::{DashboardError, FetchError, Result};
pub use dashboard::{
    format_metrics, mount, render, render_text, DashboardView, DateLabeler, Mounted, Slot,
    TeardownPolicy, ViewState, ViewStore,
};


pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";


pub const PLACEHOLDER: &str = "...";


pub const DASHBOARD_TITLE: &str = "Jira Performance Dashboard";
