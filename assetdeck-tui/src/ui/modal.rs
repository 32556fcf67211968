//! Modal overlays for the create-equipment and add-user forms.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::forms::{EquipmentField, EquipmentForm, UserField, UserForm};
use crate::lookup::Lookup;
use crate::ui::Theme;

/// Center a fixed-size rect inside `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn text_value(value: &str, focused: bool, theme: &Theme) -> Span<'static> {
    if focused {
        Span::styled(
            format!("{}|", value),
            Style::default().fg(theme.highlight),
        )
    } else if value.is_empty() {
        Span::styled("-".to_string(), Style::default().fg(theme.dim))
    } else {
        Span::styled(value.to_string(), Style::default().fg(theme.text))
    }
}

fn field_line(label: &str, value: Span<'static>, focused: bool, theme: &Theme) -> Line<'static> {
    let marker = if focused { "› " } else { "  " };
    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(theme.accent)),
        Span::styled(
            format!("{:<18}", label),
            Style::default().fg(theme.dim),
        ),
        value,
    ])
}

/// The lookup field's value: the query while typing, otherwise the label
/// of the current selection.
fn lookup_value(
    lookup: &Lookup,
    selected_id: Option<i64>,
    focused: bool,
    theme: &Theme,
) -> Span<'static> {
    if lookup.loading {
        return Span::styled("(loading...)".to_string(), Style::default().fg(theme.dim));
    }
    if !lookup.query.is_empty() {
        return Span::styled(
            format!("{}|", lookup.query),
            Style::default().fg(theme.highlight),
        );
    }
    match selected_id.and_then(|id| lookup.label_of(id)) {
        Some(label) => Span::styled(label.to_string(), Style::default().fg(theme.text)),
        None if focused => Span::styled(
            "type to search...".to_string(),
            Style::default().fg(theme.dim),
        ),
        None => Span::styled("(none)".to_string(), Style::default().fg(theme.dim)),
    }
}

/// Dropdown lines under a focused lookup: the full filtered set, with the
/// cursor row highlighted.
fn dropdown_lines(lookup: &Lookup, theme: &Theme) -> Vec<Line<'static>> {
    lookup
        .filtered()
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let style = if idx == lookup.cursor {
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.dim)
            };
            Line::from(Span::styled(format!("      {}", entry.label), style))
        })
        .collect()
}

pub fn render_equipment_form(frame: &mut Frame, form: &EquipmentForm, theme: &Theme) {
    let mut lines: Vec<Line> = Vec::new();

    for field in form.visible_fields() {
        let focused = form.focus == field;
        let line = match field {
            EquipmentField::AssetTag => {
                field_line(field.label(), text_value(&form.asset_tag, focused, theme), focused, theme)
            }
            EquipmentField::DeviceName => field_line(
                field.label(),
                text_value(&form.device_name, focused, theme),
                focused,
                theme,
            ),
            EquipmentField::Manufacturer => field_line(
                field.label(),
                text_value(&form.manufacturer, focused, theme),
                focused,
                theme,
            ),
            EquipmentField::Model => {
                field_line(field.label(), text_value(&form.model, focused, theme), focused, theme)
            }
            EquipmentField::SerialNumber => field_line(
                field.label(),
                text_value(&form.serial_number, focused, theme),
                focused,
                theme,
            ),
            EquipmentField::FormFactor => field_line(
                field.label(),
                text_value(&form.form_factor, focused, theme),
                focused,
                theme,
            ),
            EquipmentField::Status => field_line(
                field.label(),
                Span::styled(
                    format!("‹ {} ›", form.status),
                    Style::default().fg(theme.status_color(form.status)),
                ),
                focused,
                theme,
            ),
            EquipmentField::Location => field_line(
                field.label(),
                lookup_value(&form.location_lookup, form.location_id, focused, theme),
                focused,
                theme,
            ),
            EquipmentField::Ram => {
                field_line(field.label(), text_value(&form.ram, focused, theme), focused, theme)
            }
            EquipmentField::StorageCapacity => field_line(
                field.label(),
                text_value(&form.storage_capacity, focused, theme),
                focused,
                theme,
            ),
            EquipmentField::OperatingSystem => field_line(
                field.label(),
                text_value(&form.operating_system, focused, theme),
                focused,
                theme,
            ),
            EquipmentField::Notes => {
                field_line(field.label(), text_value(&form.notes, focused, theme), focused, theme)
            }
            EquipmentField::AssignToggle => field_line(
                field.label(),
                Span::styled(
                    if form.assign_to_user { "[x]" } else { "[ ]" }.to_string(),
                    Style::default().fg(theme.text),
                ),
                focused,
                theme,
            ),
            EquipmentField::AssignedUser => field_line(
                field.label(),
                lookup_value(&form.user_lookup, form.device_user_id, focused, theme),
                focused,
                theme,
            ),
            EquipmentField::AssignmentDate => field_line(
                field.label(),
                text_value(&form.assignment_date, focused, theme),
                focused,
                theme,
            ),
            EquipmentField::AssignmentPurpose => field_line(
                field.label(),
                text_value(&form.assignment_purpose, focused, theme),
                focused,
                theme,
            ),
        };
        lines.push(line);

        // Dropdown under the focused lookup field
        if focused && field == EquipmentField::Location && !form.location_lookup.query.is_empty() {
            lines.extend(dropdown_lines(&form.location_lookup, theme));
        }
        if focused && field == EquipmentField::AssignedUser && !form.user_lookup.query.is_empty() {
            lines.extend(dropdown_lines(&form.user_lookup, theme));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter submit · Esc cancel",
        Style::default().fg(theme.dim),
    )));

    let height = (lines.len() as u16).saturating_add(2);
    let area = centered_rect(56, height, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Add Equipment ")
                .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        ),
        area,
    );
}

pub fn render_user_form(frame: &mut Frame, form: &UserForm, theme: &Theme) {
    let fields = [
        (UserField::FirstName, form.first_name.clone()),
        (UserField::LastName, form.last_name.clone()),
        (UserField::Email, form.email.clone()),
    ];

    let mut lines: Vec<Line> = fields
        .iter()
        .map(|(field, value)| {
            let focused = form.focus == *field;
            field_line(field.label(), text_value(value, focused, theme), focused, theme)
        })
        .collect();

    let department_focused = form.focus == UserField::Department;
    lines.push(field_line(
        UserField::Department.label(),
        Span::styled(
            format!("‹ {} ›", form.department_name()),
            Style::default().fg(theme.text),
        ),
        department_focused,
        theme,
    ));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter submit · Esc cancel",
        Style::default().fg(theme.dim),
    )));

    let height = (lines.len() as u16).saturating_add(2);
    let area = centered_rect(48, height, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Add User ")
                .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        ),
        area,
    );
}
