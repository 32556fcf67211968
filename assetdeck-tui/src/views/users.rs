//! Users page: the debounced server-search variant of the list view.
//!
//! Keystrokes feed a 300 ms debouncer; each settled non-empty query issues
//! one sequence-tagged request, and only the newest request's response is
//! applied. An empty settled query issues no request at all: the view
//! restores the full collection fetched on mount instead.

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::warn;

use assetdeck_client::ApiError;
use assetdeck_core::debounce::{Debouncer, RequestSeq};
use assetdeck_core::models::UserRow;

use crate::forms::UserForm;
use crate::ui::Theme;

#[derive(Debug, Default)]
pub struct UsersView {
    /// Rows currently displayed, replaced wholesale per applied response.
    pub rows: Vec<UserRow>,
    /// Snapshot of the full collection from the mount fetch; restored when
    /// the query is cleared.
    snapshot: Vec<UserRow>,
    pub query: String,
    pub selected: usize,
    pub loading: bool,
    pub debounce: Debouncer,
    pub seq: RequestSeq,
    pub modal: Option<UserForm>,
}

impl UsersView {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Record a keystroke; the request (if any) is issued once the quiet
    /// period elapses.
    pub fn record_keystroke(&mut self, now: Instant) {
        self.debounce.record(self.query.clone(), now);
    }

    /// The settled query, if the quiet period has elapsed. Emitted at most
    /// once per burst.
    pub fn settled_query(&mut self, now: Instant) -> Option<String> {
        self.debounce.poll(now)
    }

    /// Empty-query early exit: show the mount snapshot without a request.
    pub fn restore_snapshot(&mut self) {
        self.rows = self.snapshot.clone();
        self.clamp_selection();
    }

    /// Apply a search response. `query` is the query the request carried;
    /// an empty one is the mount (or refresh) fetch of the full
    /// collection, which also refreshes the snapshot.
    pub fn apply_fetch(&mut self, seq: u64, query: &str, result: Result<Vec<UserRow>, ApiError>) {
        if !self.seq.try_apply(seq) {
            return;
        }
        self.loading = false;
        match result {
            Ok(rows) => {
                if query.is_empty() {
                    self.snapshot = rows.clone();
                }
                self.rows = rows;
            }
            Err(err) => {
                warn!(error = %err, query, "user search failed");
                self.rows = Vec::new();
            }
        }
        self.clamp_selection();
    }

    pub fn select_next(&mut self) {
        if !self.rows.is_empty() {
            self.selected = (self.selected + 1) % self.rows.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.rows.is_empty() {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.rows.len() - 1);
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, view: &UsersView, searching: bool, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let border = if searching {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.secondary)
    };
    let search_line = if view.query.is_empty() && !searching {
        Line::from(Span::styled(
            "Press / to search users...",
            Style::default().fg(theme.dim),
        ))
    } else if searching {
        Line::from(vec![
            Span::raw(view.query.clone()),
            Span::styled("|", Style::default().fg(theme.accent)),
        ])
    } else {
        Line::from(view.query.clone())
    };
    frame.render_widget(
        Paragraph::new(search_line).block(
            Block::default()
                .title(" Search ")
                .borders(Borders::ALL)
                .border_style(border),
        ),
        chunks[0],
    );

    let block = Block::default()
        .title(format!(" Users ({}) ", view.rows.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.secondary));

    if view.loading {
        frame.render_widget(
            Paragraph::new("Loading...")
                .style(Style::default().fg(theme.dim))
                .block(block),
            chunks[1],
        );
        return;
    }

    if view.rows.is_empty() {
        frame.render_widget(
            Paragraph::new("No users found")
                .style(Style::default().fg(theme.dim))
                .block(block),
            chunks[1],
        );
        return;
    }

    let header = Row::new(["Name", "Email", "Department", "Devices"])
        .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|user| {
            Row::new(vec![
                Cell::from(format!("{} {}", user.first_name, user.last_name)),
                Cell::from(user.email.clone()),
                Cell::from(user.department.clone()),
                Cell::from(user.device_count.to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = TableState::default();
    state.select(Some(view.selected.min(view.rows.len().saturating_sub(1))));
    frame.render_stateful_widget(table, chunks[1], &mut state);
}
