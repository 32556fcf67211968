//! Dashboard page: aggregate charts behind a chart-type selector.
//!
//! Each selection fetches its endpoint; loading, error and empty are
//! distinct states. This is the one view that surfaces fetch errors as
//! text instead of resolving to an empty set.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph},
    Frame,
};

use assetdeck_client::ApiError;
use assetdeck_core::debounce::RequestSeq;
use assetdeck_core::models::ChartPoint;

use crate::ui::Theme;

/// Which aggregate is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Building,
    Manufacturer,
    FormFactor,
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Building => "Devices by Building",
            ChartKind::Manufacturer => "Devices by Manufacturer",
            ChartKind::FormFactor => "Devices by Form Factor",
        }
    }

    pub fn next(&self) -> ChartKind {
        match self {
            ChartKind::Building => ChartKind::Manufacturer,
            ChartKind::Manufacturer => ChartKind::FormFactor,
            ChartKind::FormFactor => ChartKind::Building,
        }
    }

    pub fn prev(&self) -> ChartKind {
        match self {
            ChartKind::Building => ChartKind::FormFactor,
            ChartKind::Manufacturer => ChartKind::Building,
            ChartKind::FormFactor => ChartKind::Manufacturer,
        }
    }
}

/// Load state of the current chart. `Ready` with no points is the empty
/// state; `Error` is rendered as a textual banner.
#[derive(Debug, Default)]
pub enum ChartState {
    #[default]
    Loading,
    Ready(Vec<ChartPoint>),
    Error(String),
}

#[derive(Debug, Default)]
pub struct DashboardView {
    pub kind: ChartKind,
    pub state: ChartState,
    pub seq: RequestSeq,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_fetch(&mut self, seq: u64, result: Result<Vec<ChartPoint>, ApiError>) {
        if !self.seq.try_apply(seq) {
            return;
        }
        self.state = match result {
            Ok(points) => ChartState::Ready(points),
            Err(err) => ChartState::Error(err.to_string()),
        };
    }
}

pub fn render(frame: &mut Frame, area: Rect, view: &DashboardView, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let selector = Line::from(vec![
        Span::styled("◀ h ", Style::default().fg(theme.dim)),
        Span::styled(
            view.kind.label(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" l ▶", Style::default().fg(theme.dim)),
    ]);
    frame.render_widget(
        Paragraph::new(selector).block(
            Block::default()
                .title(" Dashboard ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.secondary)),
        ),
        chunks[0],
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.secondary));

    match &view.state {
        ChartState::Loading => {
            frame.render_widget(
                Paragraph::new("Loading...")
                    .style(Style::default().fg(theme.dim))
                    .block(block),
                chunks[1],
            );
        }
        ChartState::Error(message) => {
            frame.render_widget(
                Paragraph::new(format!("Error: {}", message))
                    .style(Style::default().fg(theme.error))
                    .block(block),
                chunks[1],
            );
        }
        ChartState::Ready(points) if points.is_empty() => {
            frame.render_widget(
                Paragraph::new("No data available")
                    .style(Style::default().fg(theme.dim))
                    .block(block),
                chunks[1],
            );
        }
        ChartState::Ready(points) => match view.kind {
            ChartKind::Building => render_bars(frame, chunks[1], points, block, theme),
            ChartKind::Manufacturer | ChartKind::FormFactor => {
                render_shares(frame, chunks[1], points, block, theme)
            }
        },
    }
}

/// Vertical bar chart for per-building counts.
fn render_bars(
    frame: &mut Frame,
    area: Rect,
    points: &[ChartPoint],
    block: Block,
    theme: &Theme,
) {
    let data: Vec<(&str, u64)> = points
        .iter()
        .map(|point| (point.name.as_str(), point.value.max(0) as u64))
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(&data)
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(theme.accent))
        .value_style(
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(chart, area);
}

/// Share list for the distribution charts: one row per slice with a
/// proportional bar and its percentage, largest first.
fn render_shares(
    frame: &mut Frame,
    area: Rect,
    points: &[ChartPoint],
    block: Block,
    theme: &Theme,
) {
    let total: i64 = points.iter().map(|p| p.value.max(0)).sum();
    let mut sorted: Vec<&ChartPoint> = points.iter().collect();
    sorted.sort_by(|a, b| b.value.cmp(&a.value));

    let bar_span = (area.width as usize).saturating_sub(40).max(10);
    let max_value = sorted.first().map(|p| p.value.max(1)).unwrap_or(1);

    let lines: Vec<Line> = sorted
        .iter()
        .map(|point| {
            let share = if total > 0 {
                (point.value.max(0) as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            let width = ((point.value.max(0) as f64 / max_value as f64) * bar_span as f64)
                .round() as usize;
            Line::from(vec![
                Span::styled(
                    format!("{:<20}", truncate(&point.name, 20)),
                    Style::default().fg(theme.text),
                ),
                Span::styled("█".repeat(width.max(1)), Style::default().fg(theme.accent)),
                Span::styled(
                    format!(" {} ({:.0}%)", point.value, share),
                    Style::default().fg(theme.dim),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let cut: String = name.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_kinds_cycle_both_ways() {
        assert_eq!(ChartKind::Building.next(), ChartKind::Manufacturer);
        assert_eq!(ChartKind::Building.prev(), ChartKind::FormFactor);
        assert_eq!(ChartKind::FormFactor.next(), ChartKind::Building);
    }

    #[test]
    fn fetch_error_becomes_error_state_not_empty() {
        let mut view = DashboardView::new();
        let seq = view.seq.issue();
        view.apply_fetch(
            seq,
            Err(ApiError::missing_data("/dashboard/devices-by-building")),
        );
        assert!(matches!(view.state, ChartState::Error(_)));
    }

    #[test]
    fn stale_chart_response_is_discarded() {
        let mut view = DashboardView::new();
        let old = view.seq.issue();
        let new = view.seq.issue();

        view.apply_fetch(
            new,
            Ok(vec![ChartPoint {
                name: "LIB".into(),
                value: 4,
            }]),
        );
        view.apply_fetch(
            old,
            Ok(vec![ChartPoint {
                name: "STALE".into(),
                value: 1,
            }]),
        );

        match &view.state {
            ChartState::Ready(points) => assert_eq!(points[0].name, "LIB"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn empty_payload_is_ready_not_error() {
        let mut view = DashboardView::new();
        let seq = view.seq.issue();
        view.apply_fetch(seq, Ok(vec![]));
        assert!(matches!(view.state, ChartState::Ready(ref p) if p.is_empty()));
    }

    #[test]
    fn long_names_truncate_for_display() {
        assert_eq!(truncate("short", 20), "short");
        let long = "a-very-long-building-name-indeed";
        assert_eq!(truncate(long, 10).chars().count(), 10);
    }
}
