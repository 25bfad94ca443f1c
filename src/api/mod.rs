

pub mod client;
pub mod models;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

use crate::core::error::Result;

pub use client::ApiClient;
pub use models::{
    CreatedPerDay, ForecastResult, MetricsSnapshot, ResolvedPerDay, Ticket, TicketFilter,
};


#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Endpoint {
    Tickets,
    Metrics,
    Forecast,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        self.into()
    }
}


/// The three reads the dashboard performs on mount.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn fetch_tickets(&self) -> Result<Vec<Ticket>>;

    async fn fetch_metrics(&self) -> Result<MetricsSnapshot>;

    async fn fetch_forecast(&self) -> Result<ForecastResult>;
}

