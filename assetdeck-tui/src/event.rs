//! Keyboard handling, dispatched by input mode.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use assetdeck_client::ExportFormat;
use assetdeck_core::models::{EquipmentDraft, UserDraft};

use crate::app::{App, Mode, Page};
use crate::forms::{EquipmentField, EquipmentForm, UserField, UserForm};

/// Result of handling a key event
#[derive(Debug, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) -> HandleResult {
    // Global quit shortcuts (Ctrl+C, Ctrl+Q)
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') | KeyCode::Char('q') = key.code {
            return HandleResult::Quit;
        }
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Search => handle_search_mode(app, key, now),
        Mode::Edit => handle_edit_mode(app, key),
        Mode::Form => handle_form_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Char('q') => return HandleResult::Quit,

        // Page switching
        KeyCode::Char('1') => app.switch_page(Page::Dashboard),
        KeyCode::Char('2') => app.switch_page(Page::Inventory),
        KeyCode::Char('3') => app.switch_page(Page::Users),
        KeyCode::Char('4') => app.switch_page(Page::Reports),

        // UI preference toggles
        KeyCode::Char('d') => {
            app.prefs.toggle_dark_mode();
            let label = if app.prefs.dark_mode() { "dark" } else { "light" };
            app.set_status(format!("Theme: {}", label));
        }
        KeyCode::Char('c') => app.prefs.toggle_sidebar(),

        KeyCode::Char('r') => app.refresh_current(),

        KeyCode::Char('/') if matches!(app.page, Page::Inventory | Page::Users) => {
            app.mode = Mode::Search;
        }

        KeyCode::Char('n') => match app.page {
            Page::Inventory => app.open_equipment_modal(),
            Page::Users => app.open_user_modal(),
            _ => {}
        },

        // List / field navigation
        KeyCode::Char('j') | KeyCode::Down => match app.page {
            Page::Inventory => app.inventory.select_next(),
            Page::Users => app.users.select_next(),
            Page::Reports => app.reports.focus_next(),
            Page::Dashboard => {}
        },
        KeyCode::Char('k') | KeyCode::Up => match app.page {
            Page::Inventory => app.inventory.select_prev(),
            Page::Users => app.users.select_prev(),
            Page::Reports => app.reports.focus_prev(),
            Page::Dashboard => {}
        },

        // Horizontal cycling: chart selector and report selects
        KeyCode::Char('l') | KeyCode::Right => match app.page {
            Page::Dashboard => {
                app.dashboard.kind = app.dashboard.kind.next();
                app.spawn_chart_fetch();
            }
            Page::Reports => app.reports.cycle_focused(true),
            _ => {}
        },
        KeyCode::Char('h') | KeyCode::Left => match app.page {
            Page::Dashboard => {
                app.dashboard.kind = app.dashboard.kind.prev();
                app.spawn_chart_fetch();
            }
            Page::Reports => app.reports.cycle_focused(false),
            _ => {}
        },

        // Report actions
        KeyCode::Char('g') if app.page == Page::Reports => app.spawn_report_generate(),
        KeyCode::Char('x') if app.page == Page::Reports => {
            app.spawn_report_export(ExportFormat::Excel)
        }
        KeyCode::Char('p') if app.page == Page::Reports => {
            app.spawn_report_export(ExportFormat::Pdf)
        }
        KeyCode::Enter if app.page == Page::Reports => {
            if app.reports.focus.is_date() {
                app.mode = Mode::Edit;
            } else {
                app.reports.cycle_focused(true);
            }
        }

        _ => {}
    }
    HandleResult::Continue
}

fn handle_search_mode(app: &mut App, key: KeyEvent, now: Instant) -> HandleResult {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.mode = Mode::Normal,
        KeyCode::Backspace => match app.page {
            Page::Inventory => {
                app.inventory.query.pop();
                app.inventory.selected = 0;
            }
            Page::Users => {
                app.users.query.pop();
                app.users.record_keystroke(now);
            }
            _ => {}
        },
        KeyCode::Char(c) => match app.page {
            Page::Inventory => {
                // Client-side filter: the derived view recomputes on render.
                app.inventory.query.push(c);
                app.inventory.selected = 0;
            }
            Page::Users => {
                // Server search: the request goes out after the quiet period.
                app.users.query.push(c);
                app.users.record_keystroke(now);
            }
            _ => {}
        },
        _ => {}
    }
    HandleResult::Continue
}

fn handle_edit_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.mode = Mode::Normal,
        KeyCode::Backspace => {
            if let Some(buffer) = app.reports.date_buffer_mut() {
                buffer.pop();
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            if let Some(buffer) = app.reports.date_buffer_mut() {
                buffer.push(c);
            }
        }
        _ => {}
    }
    HandleResult::Continue
}

/// What a modal key press asks the app to do.
enum FormAction {
    Noop,
    Close,
    CreateEquipment(EquipmentDraft),
    AddUser(UserDraft),
    Invalid(String),
}

fn handle_form_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    let action = if let Some(form) = app.inventory.modal.as_mut() {
        equipment_form_key(form, key)
    } else if let Some(form) = app.users.modal.as_mut() {
        user_form_key(form, key)
    } else {
        // No modal is actually open; drop back to navigation.
        app.mode = Mode::Normal;
        return HandleResult::Continue;
    };

    match action {
        FormAction::Noop => {}
        FormAction::Close => app.close_modal(),
        FormAction::CreateEquipment(draft) => app.spawn_create_equipment(draft),
        FormAction::AddUser(draft) => app.spawn_add_user(draft),
        FormAction::Invalid(message) => app.set_status(message),
    }
    HandleResult::Continue
}

fn equipment_form_key(form: &mut EquipmentForm, key: KeyEvent) -> FormAction {
    match key.code {
        KeyCode::Esc => return FormAction::Close,
        KeyCode::Tab => form.focus_next(),
        KeyCode::BackTab => form.focus_prev(),

        KeyCode::Down => match form.focus {
            EquipmentField::Location => form.location_lookup.select_next(),
            EquipmentField::AssignedUser => form.user_lookup.select_next(),
            _ => form.focus_next(),
        },
        KeyCode::Up => match form.focus {
            EquipmentField::Location => form.location_lookup.select_prev(),
            EquipmentField::AssignedUser => form.user_lookup.select_prev(),
            _ => form.focus_prev(),
        },

        KeyCode::Left | KeyCode::Right => {
            if form.focus == EquipmentField::Status {
                form.cycle_status();
            }
        }

        KeyCode::Backspace => form.backspace(),

        KeyCode::Enter => match form.focus {
            // Lookup fields: Enter commits the highlighted entry into the
            // form's foreign-key field.
            EquipmentField::Location => form.select_location(),
            EquipmentField::AssignedUser => form.select_assigned_user(),
            EquipmentField::AssignToggle => form.toggle_assignment(),
            // Anywhere else, Enter submits the form.
            _ => {
                return match form.build() {
                    Ok(draft) => FormAction::CreateEquipment(draft),
                    Err(message) => FormAction::Invalid(message),
                }
            }
        },

        KeyCode::Char(c) => form.input(c),

        _ => {}
    }
    FormAction::Noop
}

fn user_form_key(form: &mut UserForm, key: KeyEvent) -> FormAction {
    match key.code {
        KeyCode::Esc => return FormAction::Close,
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left | KeyCode::Right => {
            if form.focus == UserField::Department {
                form.cycle_department();
            }
        }
        KeyCode::Backspace => form.backspace(),
        KeyCode::Enter => {
            return match form.build() {
                Ok(draft) => FormAction::AddUser(draft),
                Err(message) => FormAction::Invalid(message),
            }
        }
        KeyCode::Char(c) => {
            if form.focus == UserField::Department && c == ' ' {
                form.cycle_department();
            } else {
                form.input(c);
            }
        }
        _ => {}
    }
    FormAction::Noop
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdeck_client::ApiClient;
    use assetdeck_core::prefs::UiPrefs;

    use crate::views::ReportField;

    fn test_app() -> App {
        App::new(ApiClient::new("http://localhost:8000"), UiPrefs::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn number_keys_switch_pages() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Char('2')), Instant::now());
        assert_eq!(app.page, Page::Inventory);
        handle_key(&mut app, key(KeyCode::Char('3')), Instant::now());
        assert_eq!(app.page, Page::Users);
    }

    #[test]
    fn preference_toggles_flip_flags() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Char('d')), Instant::now());
        assert!(app.prefs.dark_mode());
        handle_key(&mut app, key(KeyCode::Char('c')), Instant::now());
        assert!(app.prefs.sidebar_collapsed());
    }

    #[test]
    fn slash_enters_search_on_list_pages_only() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Char('/')), Instant::now());
        assert_eq!(app.mode, Mode::Normal);

        app.switch_page(Page::Inventory);
        handle_key(&mut app, key(KeyCode::Char('/')), Instant::now());
        assert_eq!(app.mode, Mode::Search);
    }

    #[test]
    fn typing_in_users_search_feeds_the_debouncer() {
        let mut app = test_app();
        app.switch_page(Page::Users);
        app.mode = Mode::Search;

        handle_key(&mut app, key(KeyCode::Char('a')), Instant::now());
        assert_eq!(app.users.query, "a");
        assert!(app.users.debounce.is_pending());
    }

    #[test]
    fn inventory_typing_refilters_without_pending_request() {
        let mut app = test_app();
        app.switch_page(Page::Inventory);
        app.mode = Mode::Search;

        handle_key(&mut app, key(KeyCode::Char('d')), Instant::now());
        assert_eq!(app.inventory.query, "d");
        // Client-side variant: no debounce, no request.
        assert!(!app.users.debounce.is_pending());
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut app = test_app();
        app.mode = Mode::Search;
        let result = handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert_eq!(result, HandleResult::Quit);
    }

    #[test]
    fn report_enter_on_date_field_starts_editing() {
        let mut app = test_app();
        app.switch_page(Page::Reports);
        app.reports.focus = ReportField::StartDate;
        handle_key(&mut app, key(KeyCode::Enter), Instant::now());
        assert_eq!(app.mode, Mode::Edit);

        handle_key(&mut app, key(KeyCode::Char('2')), Instant::now());
        handle_key(&mut app, key(KeyCode::Char('x')), Instant::now());
        assert_eq!(app.reports.start_date, "2");
    }

    #[tokio::test]
    async fn submitting_an_invalid_form_sets_status_and_keeps_modal() {
        let mut app = test_app();
        app.switch_page(Page::Inventory);
        app.open_equipment_modal();

        handle_key(&mut app, key(KeyCode::Enter), Instant::now());

        assert!(app.inventory.modal.is_some());
        assert!(app
            .status_message
            .as_deref()
            .unwrap_or_default()
            .contains("Missing required fields"));
    }

    #[test]
    fn esc_closes_the_modal() {
        let mut app = test_app();
        app.users.modal = Some(UserForm::new());
        app.mode = Mode::Form;

        handle_key(&mut app, key(KeyCode::Esc), Instant::now());
        assert!(app.users.modal.is_none());
        assert_eq!(app.mode, Mode::Normal);
    }
}
