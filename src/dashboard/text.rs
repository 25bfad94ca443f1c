

use std::fmt::Write;

use super::view::{Chart, ChartPanel, DashboardView};


const MAX_BAR_WIDTH: i128 = 40;


/// Plain-text rendering of a [`DashboardView`] for terminal hosts.
pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "{}", "=".repeat(view.title.chars().count()));

    for section in &view.sections {
        let _ = writeln!(out, "\n{}", section.title);
        for card in &section.cards {
            let _ = writeln!(out, "  {}: {}", card.title, card.value);
        }
    }

    for panel in &view.charts {
        write_chart(&mut out, panel);
    }

    out
}

fn write_chart(out: &mut String, panel: &ChartPanel) {
    let kind = match panel.chart {
        Chart::Bar(_) => "bar",
        Chart::Line(_) => "line",
    };
    let data = panel.chart.data();
    let legend = data
        .series
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let _ = writeln!(out, "\n{} [{}: {}]", panel.title, kind, legend);
    if data.points.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return;
    }

    let label_width = data.points.iter().map(|p| p.x.chars().count()).max().unwrap_or(0);
    let max = i128::from(data.points.iter().map(|p| p.value).max().unwrap_or(0).max(1));
    for point in &data.points {
        let width = (i128::from(point.value.max(0)) * MAX_BAR_WIDTH / max) as usize;
        let _ = writeln!(
            out,
            "  {:<label_width$} | {} {}",
            point.x,
            "#".repeat(width),
            point.value
        );
    }
}
