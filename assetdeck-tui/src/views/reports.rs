//! Reports page: filter panel, explicit generate, export to disk.
//!
//! Filters are forwarded with `null` for every blank criterion. The
//! backend applies what it supports; the client renders whatever comes
//! back and keeps the rows only for the duration of the view.

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use tracing::warn;

use assetdeck_client::ApiError;
use assetdeck_core::debounce::RequestSeq;
use assetdeck_core::models::{EquipmentStatus, ReportFilters, ReportRow};

use crate::forms::{DEPARTMENTS, EQUIPMENT_TYPES};
use crate::ui::Theme;

/// Filter panel fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportField {
    #[default]
    EquipmentType,
    Department,
    Status,
    StartDate,
    EndDate,
}

impl ReportField {
    const ORDER: [ReportField; 5] = [
        ReportField::EquipmentType,
        ReportField::Department,
        ReportField::Status,
        ReportField::StartDate,
        ReportField::EndDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReportField::EquipmentType => "Equipment Type",
            ReportField::Department => "Department",
            ReportField::Status => "Status",
            ReportField::StartDate => "Start Date",
            ReportField::EndDate => "End Date",
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, ReportField::StartDate | ReportField::EndDate)
    }
}

#[derive(Debug, Default)]
pub struct ReportsView {
    pub focus: ReportField,
    /// Select indexes into the option lists; `None` means no filter.
    pub equipment_type: Option<usize>,
    pub department: Option<usize>,
    pub status: Option<usize>,
    /// Date inputs as typed, `YYYY-MM-DD`; validated on generate.
    pub start_date: String,
    pub end_date: String,
    pub rows: Vec<ReportRow>,
    /// True once a report has been generated, so the results section
    /// renders (with its empty state if needed).
    pub generated: bool,
    pub loading: bool,
    pub seq: RequestSeq,
}

impl ReportsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus_next(&mut self) {
        let idx = ReportField::ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.focus = ReportField::ORDER[(idx + 1) % ReportField::ORDER.len()];
    }

    pub fn focus_prev(&mut self) {
        let idx = ReportField::ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.focus = ReportField::ORDER[idx.checked_sub(1).unwrap_or(ReportField::ORDER.len() - 1)];
    }

    /// Cycle the focused select through its options, including the blank
    /// (no filter) position. Dates are edited as text instead.
    pub fn cycle_focused(&mut self, forward: bool) {
        match self.focus {
            ReportField::EquipmentType => {
                self.equipment_type = cycle(self.equipment_type, EQUIPMENT_TYPES.len(), forward)
            }
            ReportField::Department => {
                self.department = cycle(self.department, DEPARTMENTS.len(), forward)
            }
            ReportField::Status => {
                self.status = cycle(self.status, EquipmentStatus::ALL.len(), forward)
            }
            ReportField::StartDate | ReportField::EndDate => {}
        }
    }

    /// The focused date buffer, when a date field has focus.
    pub fn date_buffer_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            ReportField::StartDate => Some(&mut self.start_date),
            ReportField::EndDate => Some(&mut self.end_date),
            _ => None,
        }
    }

    /// Assemble the wire filters. Every blank criterion becomes `None`
    /// (serialized as `null`), never an empty string.
    pub fn filters(&self) -> Result<ReportFilters, String> {
        Ok(ReportFilters {
            equipment_type: self.equipment_type.map(|i| EQUIPMENT_TYPES[i].to_string()),
            department: self.department.map(|i| DEPARTMENTS[i].to_lowercase()),
            status: self.status.map(|i| EquipmentStatus::ALL[i].label().to_string()),
            start_date: parse_date(&self.start_date, "start date")?,
            end_date: parse_date(&self.end_date, "end date")?,
        })
    }

    pub fn apply_fetch(&mut self, seq: u64, result: Result<Vec<ReportRow>, ApiError>) {
        if !self.seq.try_apply(seq) {
            return;
        }
        self.loading = false;
        self.generated = true;
        match result {
            Ok(rows) => self.rows = rows,
            Err(err) => {
                warn!(error = %err, "report generation failed");
                self.rows = Vec::new();
            }
        }
    }
}

/// Cycle an optional select index: blank -> first -> ... -> last -> blank.
fn cycle(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if forward {
        match current {
            None => Some(0),
            Some(i) if i + 1 < len => Some(i + 1),
            Some(_) => None,
        }
    } else {
        match current {
            None => Some(len - 1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        }
    }
}

/// Blank dates become `None`; set dates must parse as `YYYY-MM-DD` and are
/// forwarded as UTC midnight timestamps.
fn parse_date(raw: &str, label: &str) -> Result<Option<String>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| format!("Invalid {} '{}': expected YYYY-MM-DD", label, trimmed))?;
    Ok(Some(format!("{}T00:00:00Z", date.format("%Y-%m-%d"))))
}

pub fn render(frame: &mut Frame, area: Rect, view: &ReportsView, editing_date: bool, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(1)])
        .split(area);

    render_filter_panel(frame, chunks[0], view, editing_date, theme);
    render_results(frame, chunks[1], view, theme);
}

fn render_filter_panel(
    frame: &mut Frame,
    area: Rect,
    view: &ReportsView,
    editing_date: bool,
    theme: &Theme,
) {
    let select_value = |current: Option<usize>, options: &[&str]| -> String {
        match current {
            Some(i) => options[i].to_string(),
            None => "(any)".to_string(),
        }
    };
    let status_options: Vec<&str> = EquipmentStatus::ALL.iter().map(|s| s.label()).collect();

    let field_line = |field: ReportField, value: String| -> Line {
        let focused = view.focus == field;
        let marker = if focused { "› " } else { "  " };
        let value_style = if focused && field.is_date() && editing_date {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else if focused {
            Style::default().fg(theme.highlight)
        } else {
            Style::default().fg(theme.text)
        };
        let shown = if field.is_date() && value.is_empty() {
            "(any)".to_string()
        } else if field.is_date() && focused && editing_date {
            format!("{}|", value)
        } else {
            value
        };
        Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.accent)),
            Span::styled(format!("{:<16}", field.label()), Style::default().fg(theme.dim)),
            Span::styled(shown, value_style),
        ])
    };

    let lines = vec![
        field_line(
            ReportField::EquipmentType,
            select_value(view.equipment_type, &EQUIPMENT_TYPES),
        ),
        field_line(
            ReportField::Department,
            select_value(view.department, &DEPARTMENTS),
        ),
        field_line(ReportField::Status, select_value(view.status, &status_options)),
        field_line(ReportField::StartDate, view.start_date.clone()),
        field_line(ReportField::EndDate, view.end_date.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "j/k move · h/l cycle · Enter edit date · g generate · x export xlsx · p export pdf",
            Style::default().fg(theme.dim),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Equipment Report ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.secondary)),
        ),
        area,
    );
}

fn render_results(frame: &mut Frame, area: Rect, view: &ReportsView, theme: &Theme) {
    let block = Block::default()
        .title(" Report Results ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.secondary));

    if view.loading {
        frame.render_widget(
            Paragraph::new("Generating...")
                .style(Style::default().fg(theme.dim))
                .block(block),
            area,
        );
        return;
    }

    if !view.generated {
        frame.render_widget(
            Paragraph::new("Press g to generate a report")
                .style(Style::default().fg(theme.dim))
                .block(block),
            area,
        );
        return;
    }

    if view.rows.is_empty() {
        frame.render_widget(
            Paragraph::new("No results found for the selected filters.")
                .style(Style::default().fg(theme.dim))
                .block(block),
            area,
        );
        return;
    }

    let header = Row::new(["ID", "Device Name", "Type", "Status", "Last Updated"])
        .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.equipment_id.to_string()),
                Cell::from(row.device_name.clone()),
                Cell::from(row.form_factor.clone().unwrap_or_default()),
                Cell::from(Span::styled(
                    row.status.label(),
                    Style::default().fg(theme.status_color(row.status)),
                )),
                Cell::from(
                    row.updated_at
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default(),
                ),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}
