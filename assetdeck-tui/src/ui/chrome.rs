//! Shell chrome: header, navigation sidebar, status bar.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Mode, Page};
use crate::ui::Theme;

fn page_icon(page: Page) -> &'static str {
    match page {
        Page::Dashboard => "📊",
        Page::Inventory => "📦",
        Page::Users => "👥",
        Page::Reports => "📈",
    }
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Normal => "NORMAL",
        Mode::Search => "SEARCH",
        Mode::Edit => "EDIT",
        Mode::Form => "FORM",
    }
}

fn mode_color(mode: Mode, theme: &Theme) -> Color {
    match mode {
        Mode::Normal => theme.accent,
        Mode::Search => theme.success,
        Mode::Edit => theme.highlight,
        Mode::Form => theme.error,
    }
}

pub fn render_header(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            " Assetdeck ",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled("· Equipment Tracking  ", Style::default().fg(theme.dim)),
        Span::styled(
            app.page.title(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   {}", app.client.base_url()),
            Style::default().fg(theme.dim),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.secondary)),
        ),
        area,
    );
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let collapsed = app.prefs.sidebar_collapsed();

    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(idx, page)| {
            let active = *page == app.page;
            let style = if active {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            let label = if collapsed {
                page_icon(*page).to_string()
            } else {
                format!("{} {} {}", idx + 1, page_icon(*page), page.title())
            };
            ListItem::new(Line::from(Span::styled(label, style)))
        })
        .collect();

    let title = if collapsed { "" } else { " Navigation " };
    frame.render_widget(
        List::new(items).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.secondary)),
        ),
        area,
    );
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let mut spans = vec![Span::styled(
        format!(" {} ", mode_name(app.mode)),
        Style::default()
            .fg(Color::Black)
            .bg(mode_color(app.mode, theme))
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(message) = &app.status_message {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(theme.text),
        ));
    }

    let hints = match app.mode {
        Mode::Normal => "1-4 pages · / search · n new · r refresh · d theme · c sidebar · q quit",
        Mode::Search => "type to filter · Esc/Enter done",
        Mode::Edit => "YYYY-MM-DD · Esc/Enter done",
        Mode::Form => "Tab next · Enter select/submit · Esc cancel",
    };
    spans.push(Span::raw("  "));
    spans.push(Span::styled(hints, Style::default().fg(theme.dim)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
