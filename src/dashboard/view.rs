

use serde::Serialize;

use super::labels::DateLabeler;
use super::state::ViewState;
use super::transform::MetricsView;
use crate::api::models::ForecastResult;
use crate::{DASHBOARD_TITLE, PLACEHOLDER};


pub const TOTAL_TICKETS: &str = "Total Tickets";
pub const RESOLVED_TICKETS: &str = "Resolved Tickets";
pub const FORECASTED_VELOCITY: &str = "Forecasted Velocity (Next 4 weeks)";
pub const CREATED_VS_RESOLVED: &str = "Tickets Created vs. Resolved per Day";
pub const WEEKLY_THROUGHPUT: &str = "Historical and Forecasted Weekly Throughput";


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub sections: Vec<Section>,
    pub charts: Vec<ChartPanel>,
}

impl DashboardView {
    pub fn card(&self, title: &str) -> Option<&Card> {
        self.sections
            .iter()
            .flat_map(|s| s.cards.iter())
            .find(|c| c.title == title)
    }

    pub fn chart(&self, title: &str) -> Option<&ChartPanel> {
        self.charts.iter().find(|c| c.title == title)
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub cards: Vec<Card>,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub value: String,
}

impl Card {
    fn new(title: &str, value: Option<String>) -> Self {
        Self {
            title: title.to_string(),
            value: value.unwrap_or_else(|| PLACEHOLDER.to_string()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.value == PLACEHOLDER
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPanel {
    pub title: String,
    pub chart: Chart,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Chart {
    Bar(SeriesChart),
    Line(SeriesChart),
}

impl Chart {
    pub fn data(&self) -> &SeriesChart {
        match self {
            Chart::Bar(data) | Chart::Line(data) => data,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesChart {
    pub x_key: String,
    pub series: Vec<Series>,
    pub points: Vec<ChartPoint>,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub data_key: String,
    pub name: String,
    pub color: String,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub x: String,
    pub value: i64,
}


/// Builds the dashboard from whatever slots are loaded. Failed slots look exactly like loading
/// ones.
pub fn render(state: &ViewState, labeler: &DateLabeler) -> DashboardView {
    let metrics = state.metrics.loaded();
    let forecast = state.forecast.loaded();

    let overview = Section {
        title: "Overview".to_string(),
        cards: vec![
            Card::new(TOTAL_TICKETS, metrics.map(|m| m.total_tickets.to_string())),
            Card::new(RESOLVED_TICKETS, metrics.map(|m| m.resolved_total().to_string())),
            Card::new(FORECASTED_VELOCITY, forecast.map(velocity_summary)),
        ],
    };

    let mut charts = Vec::new();
    if let Some(metrics) = metrics {
        charts.push(created_chart(metrics));
    }
    if let Some(forecast) = forecast {
        charts.push(throughput_chart(forecast, labeler));
    }

    DashboardView {
        title: DASHBOARD_TITLE.to_string(),
        sections: vec![overview],
        charts,
    }
}

fn velocity_summary(forecast: &ForecastResult) -> String {
    forecast
        .next_4_weeks_velocity_forecast
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// Resolved counts are fetched but only the created series is plotted.
fn created_chart(metrics: &MetricsView) -> ChartPanel {
    ChartPanel {
        title: CREATED_VS_RESOLVED.to_string(),
        chart: Chart::Bar(SeriesChart {
            x_key: "created_at".to_string(),
            series: vec![Series {
                data_key: "count".to_string(),
                name: "Created".to_string(),
                color: "#8884d8".to_string(),
            }],
            points: metrics
                .created_per_day
                .iter()
                .map(|d| ChartPoint {
                    x: d.label.clone(),
                    value: d.count,
                })
                .collect(),
        }),
    }
}

fn throughput_chart(forecast: &ForecastResult, labeler: &DateLabeler) -> ChartPanel {
    ChartPanel {
        title: WEEKLY_THROUGHPUT.to_string(),
        chart: Chart::Line(SeriesChart {
            x_key: "resolved_at".to_string(),
            series: vec![Series {
                data_key: "count".to_string(),
                name: "Resolved Tickets".to_string(),
                color: "#82ca9d".to_string(),
            }],
            points: forecast
                .historical_weekly_throughput
                .iter()
                .map(|w| ChartPoint {
                    x: labeler.label(&w.resolved_at),
                    value: w.count,
                })
                .collect(),
        }),
    }
}
