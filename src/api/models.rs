

use serde::{Deserialize, Serialize};
use serde_json::Value;


/// A ticket record as the backend sends it. The dashboard never interprets the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket(pub Value);

impl Ticket {
    pub fn key(&self) -> Option<&str> {
        self.field("key")
    }

    pub fn status(&self) -> Option<&str> {
        self.field("status")
    }

    pub fn assignee(&self) -> Option<&str> {
        self.field("assignee")
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedPerDay {
    pub created_at: String,
    pub count: i64,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPerDay {
    pub resolved_at: String,
    pub count: i64,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_tickets: i64,
    pub created_per_day: Vec<CreatedPerDay>,
    pub resolved_per_day: Vec<ResolvedPerDay>,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub next_4_weeks_velocity_forecast: Vec<f64>,
    pub historical_weekly_throughput: Vec<ResolvedPerDay>,
}


/// Optional filters accepted by the tickets endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub project: Option<String>,
    pub assignee: Option<String>,
}

impl TicketFilter {
    #[must_use]
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    #[must_use]
    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(project) = &self.project {
            pairs.push(("project", project.as_str()));
        }
        if let Some(assignee) = &self.assignee {
            pairs.push(("assignee", assignee.as_str()));
        }
        pairs
    }
}
