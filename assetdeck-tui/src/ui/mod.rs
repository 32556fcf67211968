//! UI rendering using ratatui

pub mod chrome;
pub mod modal;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Color,
    Frame,
};

use assetdeck_core::models::EquipmentStatus;
use assetdeck_core::prefs::UiPrefs;

use crate::app::{App, Mode, Page};
use crate::views;

/// Resolved color palette for the active theme.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub secondary: Color,
    pub highlight: Color,
    pub text: Color,
    pub dim: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            accent: Color::Cyan,
            secondary: Color::DarkGray,
            highlight: Color::Yellow,
            text: Color::White,
            dim: Color::Rgb(130, 130, 130),
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn light() -> Self {
        Self {
            accent: Color::Blue,
            secondary: Color::Gray,
            highlight: Color::Magenta,
            text: Color::Black,
            dim: Color::DarkGray,
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn from_prefs(prefs: &UiPrefs) -> Self {
        if prefs.dark_mode() {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Status chip color, mirroring the web dashboard's badge colors.
    pub fn status_color(&self, status: EquipmentStatus) -> Color {
        match status {
            EquipmentStatus::InUse => self.success,
            EquipmentStatus::Available => self.accent,
            EquipmentStatus::InRepair => self.highlight,
            EquipmentStatus::Retired => self.dim,
            EquipmentStatus::Lost => self.error,
        }
    }
}

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let theme = Theme::from_prefs(&app.prefs);
    let area = frame.area();

    // Outer layout: header, body, status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    chrome::render_header(frame, outer[0], app, &theme);

    // Body: sidebar + content
    let sidebar_width = if app.prefs.sidebar_collapsed() { 6 } else { 20 };
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(outer[1]);

    chrome::render_sidebar(frame, body[0], app, &theme);

    match app.page {
        Page::Dashboard => views::dashboard::render(frame, body[1], &app.dashboard, &theme),
        Page::Inventory => views::inventory::render(
            frame,
            body[1],
            &app.inventory,
            app.mode == Mode::Search,
            &theme,
        ),
        Page::Users => views::users::render(
            frame,
            body[1],
            &app.users,
            app.mode == Mode::Search,
            &theme,
        ),
        Page::Reports => views::reports::render(
            frame,
            body[1],
            &app.reports,
            app.mode == Mode::Edit,
            &theme,
        ),
    }

    chrome::render_status_bar(frame, outer[2], app, &theme);

    // Modal overlays last, over everything
    if app.mode == Mode::Form {
        if let Some(form) = &app.inventory.modal {
            modal::render_equipment_form(frame, form, &theme);
        } else if let Some(form) = &app.users.modal {
            modal::render_user_form(frame, form, &theme);
        }
    }
}
