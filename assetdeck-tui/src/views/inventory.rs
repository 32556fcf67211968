//! Inventory page: the client-side-filter variant of the list view.
//!
//! The full equipment collection is fetched once on mount (and again on
//! refresh or after a create); every keystroke recomputes a derived view
//! by case-insensitive substring match across device name, asset tag and
//! manufacturer. No network cost per keystroke.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use tracing::warn;

use assetdeck_client::ApiError;
use assetdeck_core::debounce::RequestSeq;
use assetdeck_core::filter;
use assetdeck_core::models::Equipment;

use crate::forms::EquipmentForm;
use crate::ui::Theme;

#[derive(Debug, Default)]
pub struct InventoryView {
    /// The full collection, replaced wholesale on each successful fetch.
    pub all: Vec<Equipment>,
    /// The view's search query; filtering happens locally.
    pub query: String,
    pub selected: usize,
    pub loading: bool,
    pub seq: RequestSeq,
    pub modal: Option<EquipmentForm>,
}

impl InventoryView {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// The derived view the list renders: the subset of the collection
    /// matching the query.
    pub fn visible(&self) -> Vec<Equipment> {
        filter::filter_items(&self.all, &self.query, |item| {
            item.filter_fields().iter().map(|s| s.to_string()).collect()
        })
    }

    /// Apply a fetch result. Stale responses (an older sequence number)
    /// are discarded; failures log and resolve to an empty collection.
    pub fn apply_fetch(&mut self, seq: u64, result: Result<Vec<Equipment>, ApiError>) {
        if !self.seq.try_apply(seq) {
            return;
        }
        self.loading = false;
        match result {
            Ok(rows) => self.all = rows,
            Err(err) => {
                warn!(error = %err, "equipment fetch failed");
                self.all = Vec::new();
            }
        }
        self.clamp_selection();
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, view: &InventoryView, searching: bool, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    render_search_bar(frame, chunks[0], &view.query, searching, theme);

    let visible = view.visible();
    let title = format!(" Equipment ({}) ", visible.len());

    let block = Block::default()
        .title(title)
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

    if visible.is_empty() {
        let message = if view.query.is_empty() {
            "No equipment found"
        } else {
            "No equipment matches the search"
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(theme.dim))
                .block(block),
            chunks[1],
        );
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|item| equipment_row(item, theme))
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ratatui::widgets::ListState::default();
    state.select(Some(view.selected.min(visible.len().saturating_sub(1))));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn render_search_bar(frame: &mut Frame, area: Rect, query: &str, active: bool, theme: &Theme) {
    let border = if active {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.secondary)
    };
    let content = if query.is_empty() && !active {
        Line::from(Span::styled(
            "Press / to search equipment...",
            Style::default().fg(theme.dim),
        ))
    } else if active {
        Line::from(vec![
            Span::raw(query.to_string()),
            Span::styled("|", Style::default().fg(theme.accent)),
        ])
    } else {
        Line::from(query.to_string())
    };
    frame.render_widget(
        Paragraph::new(content).block(
            Block::default()
                .title(" Search ")
                .borders(Borders::ALL)
                .border_style(border),
        ),
        area,
    );
}

fn equipment_row<'a>(item: &Equipment, theme: &Theme) -> ListItem<'a> {
    let mut title = vec![
        Span::styled(
            item.device_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", item.status),
            Style::default().fg(theme.status_color(item.status)),
        ),
    ];
    if let Some(manufacturer) = &item.manufacturer {
        title.push(Span::raw("  "));
        title.push(Span::styled(
            format!("{} {}", manufacturer, item.model.as_deref().unwrap_or("")),
            Style::default().fg(theme.dim),
        ));
    }

    let mut detail = format!("    Asset Tag: {}", item.asset_tag);
    if let Some(location) = &item.location {
        detail.push_str(&format!("  ·  {}", location.label()));
    }

    ListItem::new(vec![
        Line::from(title),
        Line::from(Span::styled(detail, Style::default().fg(theme.dim))),
    ])
}
