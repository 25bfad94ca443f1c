

use serde::{Deserialize, Serialize};

use super::labels::DateLabeler;
use crate::api::models::MetricsSnapshot;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub label: String,
    pub count: i64,
}


/// Metrics with every per-day timestamp replaced by its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsView {
    pub total_tickets: i64,
    pub created_per_day: Vec<DayCount>,
    pub resolved_per_day: Vec<DayCount>,
}

impl MetricsView {
    pub fn resolved_total(&self) -> i64 {
        self.resolved_per_day
            .iter()
            .fold(0i64, |total, d| total.saturating_add(d.count))
    }
}


pub fn format_metrics(raw: &MetricsSnapshot, labeler: &DateLabeler) -> MetricsView {
    MetricsView {
        total_tickets: raw.total_tickets,
        created_per_day: raw
            .created_per_day
            .iter()
            .map(|d| DayCount {
                label: labeler.label(&d.created_at),
                count: d.count,
            })
            .collect(),
        resolved_per_day: raw
            .resolved_per_day
            .iter()
            .map(|d| DayCount {
                label: labeler.label(&d.resolved_at),
                count: d.count,
            })
            .collect(),
    }
}
