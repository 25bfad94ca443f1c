

pub mod labels;
pub mod pipeline;
pub mod state;
pub mod text;
pub mod transform;
pub mod view;

pub use labels::{DateLabeler, LabelZone, INVALID_DATE};
pub use pipeline::{mount, Mounted, TeardownPolicy};
pub use state::{Slot, ViewState, ViewStore};
pub use text::render_text;
pub use transform::{format_metrics, DayCount, MetricsView};
pub use view::{render, Card, Chart, ChartPanel, ChartPoint, DashboardView, Section, Series};
