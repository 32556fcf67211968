//! Form state for the create-equipment and add-user modals.
//!
//! Each form is a single mutable record mirroring its target entity.
//! Inputs write directly into the field under focus; submission validates
//! required-field presence and hands the assembled draft to the caller,
//! who closes the modal and refreshes the relevant list.

use chrono::NaiveDate;

use assetdeck_core::models::{EquipmentDraft, EquipmentStatus, UserDraft};

use crate::lookup::Lookup;

/// Equipment type options offered by the report filter panel and the
/// create form's form-factor field.
pub const EQUIPMENT_TYPES: [&str; 7] = [
    "Laptop", "Desktop", "Monitor", "Tablet", "Phone", "Printer", "Other",
];

/// Department options offered by the add-user form and the report filter
/// panel.
pub const DEPARTMENTS: [&str; 5] = ["IT", "HR", "Sales", "Engineering", "Marketing"];

/// Fields of the create-equipment form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentField {
    AssetTag,
    DeviceName,
    Manufacturer,
    Model,
    SerialNumber,
    FormFactor,
    Status,
    Location,
    Ram,
    StorageCapacity,
    OperatingSystem,
    Notes,
    AssignToggle,
    AssignedUser,
    AssignmentDate,
    AssignmentPurpose,
}

impl EquipmentField {
    pub fn label(&self) -> &'static str {
        match self {
            EquipmentField::AssetTag => "Asset Tag",
            EquipmentField::DeviceName => "Device Name",
            EquipmentField::Manufacturer => "Manufacturer",
            EquipmentField::Model => "Model",
            EquipmentField::SerialNumber => "Serial Number",
            EquipmentField::FormFactor => "Form Factor",
            EquipmentField::Status => "Status",
            EquipmentField::Location => "Location",
            EquipmentField::Ram => "RAM",
            EquipmentField::StorageCapacity => "Storage",
            EquipmentField::OperatingSystem => "Operating System",
            EquipmentField::Notes => "Notes",
            EquipmentField::AssignToggle => "Assign to user",
            EquipmentField::AssignedUser => "Assigned User",
            EquipmentField::AssignmentDate => "Assignment Start",
            EquipmentField::AssignmentPurpose => "Purpose",
        }
    }
}

/// State of the create-equipment modal.
#[derive(Debug)]
pub struct EquipmentForm {
    pub asset_tag: String,
    pub device_name: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    pub form_factor: String,
    pub status: EquipmentStatus,
    pub location_id: Option<i64>,
    pub ram: String,
    pub storage_capacity: String,
    pub operating_system: String,
    pub notes: String,
    /// The assignment checkbox. Toggling it also forces the status field;
    /// nothing else is affected.
    pub assign_to_user: bool,
    pub device_user_id: Option<i64>,
    pub assignment_date: String,
    pub assignment_purpose: String,
    pub focus: EquipmentField,
    /// Reference collection of locations, fetched when the modal opens.
    pub location_lookup: Lookup,
    /// Reference collection of device users, fetched when the modal opens.
    pub user_lookup: Lookup,
}

impl Default for EquipmentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EquipmentForm {
    pub fn new() -> Self {
        Self {
            asset_tag: String::new(),
            device_name: String::new(),
            manufacturer: String::new(),
            model: String::new(),
            serial_number: String::new(),
            form_factor: String::new(),
            status: EquipmentStatus::Available,
            location_id: None,
            ram: String::new(),
            storage_capacity: String::new(),
            operating_system: String::new(),
            notes: String::new(),
            assign_to_user: false,
            device_user_id: None,
            assignment_date: String::new(),
            assignment_purpose: String::new(),
            focus: EquipmentField::AssetTag,
            location_lookup: Lookup::new(),
            user_lookup: Lookup::new(),
        }
    }

    /// Fields currently reachable by focus navigation. The assignment
    /// sub-section only exists while the checkbox is checked.
    pub fn visible_fields(&self) -> Vec<EquipmentField> {
        let mut fields = vec![
            EquipmentField::AssetTag,
            EquipmentField::DeviceName,
            EquipmentField::Manufacturer,
            EquipmentField::Model,
            EquipmentField::SerialNumber,
            EquipmentField::FormFactor,
            EquipmentField::Status,
            EquipmentField::Location,
            EquipmentField::Ram,
            EquipmentField::StorageCapacity,
            EquipmentField::OperatingSystem,
            EquipmentField::Notes,
            EquipmentField::AssignToggle,
        ];
        if self.assign_to_user {
            fields.extend([
                EquipmentField::AssignedUser,
                EquipmentField::AssignmentDate,
                EquipmentField::AssignmentPurpose,
            ]);
        }
        fields
    }

    pub fn focus_next(&mut self) {
        let fields = self.visible_fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + 1) % fields.len()];
    }

    pub fn focus_prev(&mut self) {
        let fields = self.visible_fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[idx.checked_sub(1).unwrap_or(fields.len() - 1)];
    }

    /// Mutable buffer for the focused field, when it is plain text.
    fn text_buffer_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            EquipmentField::AssetTag => Some(&mut self.asset_tag),
            EquipmentField::DeviceName => Some(&mut self.device_name),
            EquipmentField::Manufacturer => Some(&mut self.manufacturer),
            EquipmentField::Model => Some(&mut self.model),
            EquipmentField::SerialNumber => Some(&mut self.serial_number),
            EquipmentField::FormFactor => Some(&mut self.form_factor),
            EquipmentField::Ram => Some(&mut self.ram),
            EquipmentField::StorageCapacity => Some(&mut self.storage_capacity),
            EquipmentField::OperatingSystem => Some(&mut self.operating_system),
            EquipmentField::Notes => Some(&mut self.notes),
            EquipmentField::AssignmentDate => Some(&mut self.assignment_date),
            EquipmentField::AssignmentPurpose => Some(&mut self.assignment_purpose),
            EquipmentField::Status
            | EquipmentField::Location
            | EquipmentField::AssignToggle
            | EquipmentField::AssignedUser => None,
        }
    }

    /// Route a typed character to the focused field. Lookup fields receive
    /// it as part of their own query.
    pub fn input(&mut self, c: char) {
        match self.focus {
            EquipmentField::Location => self.location_lookup.input(c),
            EquipmentField::AssignedUser => self.user_lookup.input(c),
            EquipmentField::Status => {}
            EquipmentField::AssignToggle => {
                if c == ' ' {
                    self.toggle_assignment();
                }
            }
            _ => {
                if let Some(buffer) = self.text_buffer_mut() {
                    buffer.push(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            EquipmentField::Location => self.location_lookup.backspace(),
            EquipmentField::AssignedUser => self.user_lookup.backspace(),
            _ => {
                if let Some(buffer) = self.text_buffer_mut() {
                    buffer.pop();
                }
            }
        }
    }

    /// Cycle the status select. Only meaningful while the status field is
    /// focused.
    pub fn cycle_status(&mut self) {
        self.status = self.status.next();
    }

    /// The assignment checkbox side effect: checking forces status to
    /// "In Use", unchecking to "Available". No other field is touched.
    pub fn set_assigned(&mut self, checked: bool) {
        self.assign_to_user = checked;
        self.status = if checked {
            EquipmentStatus::InUse
        } else {
            EquipmentStatus::Available
        };
        if !checked && self.focus_is_assignment() {
            self.focus = EquipmentField::AssignToggle;
        }
    }

    pub fn toggle_assignment(&mut self) {
        self.set_assigned(!self.assign_to_user);
    }

    fn focus_is_assignment(&self) -> bool {
        matches!(
            self.focus,
            EquipmentField::AssignedUser
                | EquipmentField::AssignmentDate
                | EquipmentField::AssignmentPurpose
        )
    }

    /// Commit the location lookup's current selection into the form's
    /// foreign-key field.
    pub fn select_location(&mut self) {
        if let Some(id) = self.location_lookup.take_selection() {
            self.location_id = Some(id);
        }
    }

    /// Commit the user lookup's current selection.
    pub fn select_assigned_user(&mut self) {
        if let Some(id) = self.user_lookup.take_selection() {
            self.device_user_id = Some(id);
        }
    }

    /// Validate and assemble the creation payload.
    pub fn build(&self) -> Result<EquipmentDraft, String> {
        let mut missing = Vec::new();
        for (value, label) in [
            (&self.asset_tag, "asset tag"),
            (&self.device_name, "device name"),
            (&self.manufacturer, "manufacturer"),
            (&self.model, "model"),
        ] {
            if value.trim().is_empty() {
                missing.push(label);
            }
        }
        if self.assign_to_user && self.device_user_id.is_none() {
            missing.push("assigned user");
        }
        if !missing.is_empty() {
            return Err(format!("Missing required fields: {}", missing.join(", ")));
        }

        let assignment_date = match self.assignment_date.trim() {
            "" => None,
            raw => {
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| format!("Invalid assignment date '{}': expected YYYY-MM-DD", raw))?;
                Some(date.format("%Y-%m-%d").to_string())
            }
        };

        Ok(EquipmentDraft {
            asset_tag: self.asset_tag.trim().to_string(),
            device_name: self.device_name.trim().to_string(),
            status: self.status,
            manufacturer: non_blank(&self.manufacturer),
            model: non_blank(&self.model),
            serial_number: non_blank(&self.serial_number),
            form_factor: non_blank(&self.form_factor),
            location_id: self.location_id,
            ram: non_blank(&self.ram),
            storage_capacity: non_blank(&self.storage_capacity),
            operating_system: non_blank(&self.operating_system),
            notes: non_blank(&self.notes),
            device_user_id: self.assign_to_user.then_some(self.device_user_id).flatten(),
            assignment_start_date: if self.assign_to_user {
                assignment_date
            } else {
                None
            },
            assignment_purpose: if self.assign_to_user {
                non_blank(&self.assignment_purpose)
            } else {
                None
            },
        })
    }
}

/// Fields of the add-user form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    FirstName,
    LastName,
    Email,
    Department,
}

impl UserField {
    pub fn label(&self) -> &'static str {
        match self {
            UserField::FirstName => "First Name",
            UserField::LastName => "Last Name",
            UserField::Email => "Email",
            UserField::Department => "Department",
        }
    }

    const ORDER: [UserField; 4] = [
        UserField::FirstName,
        UserField::LastName,
        UserField::Email,
        UserField::Department,
    ];
}

/// State of the add-user modal.
#[derive(Debug)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Index into [`DEPARTMENTS`].
    pub department: usize,
    pub focus: UserField,
}

impl Default for UserForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UserForm {
    pub fn new() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            department: 0,
            focus: UserField::FirstName,
        }
    }

    pub fn focus_next(&mut self) {
        let idx = UserField::ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.focus = UserField::ORDER[(idx + 1) % UserField::ORDER.len()];
    }

    pub fn focus_prev(&mut self) {
        let idx = UserField::ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.focus = UserField::ORDER[idx.checked_sub(1).unwrap_or(UserField::ORDER.len() - 1)];
    }

    pub fn input(&mut self, c: char) {
        match self.focus {
            UserField::FirstName => self.first_name.push(c),
            UserField::LastName => self.last_name.push(c),
            UserField::Email => self.email.push(c),
            UserField::Department => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            UserField::FirstName => {
                self.first_name.pop();
            }
            UserField::LastName => {
                self.last_name.pop();
            }
            UserField::Email => {
                self.email.pop();
            }
            UserField::Department => {}
        }
    }

    pub fn cycle_department(&mut self) {
        self.department = (self.department + 1) % DEPARTMENTS.len();
    }

    pub fn department_name(&self) -> &'static str {
        DEPARTMENTS[self.department]
    }

    pub fn build(&self) -> Result<UserDraft, String> {
        let mut missing = Vec::new();
        for (value, label) in [
            (&self.first_name, "first name"),
            (&self.last_name, "last name"),
            (&self.email, "email"),
        ] {
            if value.trim().is_empty() {
                missing.push(label);
            }
        }
        if !missing.is_empty() {
            return Err(format!("Missing required fields: {}", missing.join(", ")));
        }
        if !self.email.contains('@') {
            return Err(format!("Invalid email '{}'", self.email.trim()));
        }
        Ok(UserDraft {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            department: self.department_name().to_string(),
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupEntry;

    fn filled_form() -> EquipmentForm {
        let mut form = EquipmentForm::new();
        form.asset_tag = "IT-0042".into();
        form.device_name = "Latitude 5440".into();
        form.manufacturer = "Dell".into();
        form.model = "5440".into();
        form
    }

    #[test]
    fn checking_assignment_forces_status_in_use() {
        let mut form = filled_form();
        form.set_assigned(true);
        assert!(form.assign_to_user);
        assert_eq!(form.status, EquipmentStatus::InUse);

        form.set_assigned(false);
        assert!(!form.assign_to_user);
        assert_eq!(form.status, EquipmentStatus::Available);
    }

    #[test]
    fn assignment_toggle_touches_no_other_field() {
        let mut form = filled_form();
        form.location_id = Some(9);
        form.notes = "spare".into();

        form.toggle_assignment();

        assert_eq!(form.asset_tag, "IT-0042");
        assert_eq!(form.device_name, "Latitude 5440");
        assert_eq!(form.location_id, Some(9));
        assert_eq!(form.notes, "spare");
    }

    #[test]
    fn assignment_fields_only_visible_when_checked() {
        let mut form = filled_form();
        assert!(!form
            .visible_fields()
            .contains(&EquipmentField::AssignedUser));
        form.toggle_assignment();
        assert!(form.visible_fields().contains(&EquipmentField::AssignedUser));
    }

    #[test]
    fn selecting_location_writes_one_field_and_clears_query() {
        let mut form = filled_form();
        form.location_lookup.set_items(vec![LookupEntry {
            id: 3,
            label: "LIB - Floor 2, Room 204".into(),
        }]);
        form.focus = EquipmentField::Location;
        for c in "lib".chars() {
            form.input(c);
        }

        form.select_location();

        assert_eq!(form.location_id, Some(3));
        assert!(form.location_lookup.query.is_empty());
        // The lookup writes only its own foreign-key field.
        assert_eq!(form.device_user_id, None);
    }

    #[test]
    fn build_requires_core_fields() {
        let form = EquipmentForm::new();
        let err = form.build().unwrap_err();
        assert!(err.contains("asset tag"));
        assert!(err.contains("device name"));
    }

    #[test]
    fn build_requires_assigned_user_when_checked() {
        let mut form = filled_form();
        form.set_assigned(true);
        let err = form.build().unwrap_err();
        assert!(err.contains("assigned user"));
    }

    #[test]
    fn build_maps_blank_optionals_to_none() {
        let form = filled_form();
        let draft = form.build().unwrap();
        assert_eq!(draft.serial_number, None);
        assert_eq!(draft.notes, None);
        assert_eq!(draft.device_user_id, None);
        assert_eq!(draft.status, EquipmentStatus::Available);
    }

    #[test]
    fn build_rejects_malformed_assignment_date() {
        let mut form = filled_form();
        form.set_assigned(true);
        form.device_user_id = Some(1);
        form.assignment_date = "03/01/2025".into();
        assert!(form.build().unwrap_err().contains("YYYY-MM-DD"));

        form.assignment_date = "2025-03-01".into();
        let draft = form.build().unwrap();
        assert_eq!(draft.assignment_start_date.as_deref(), Some("2025-03-01"));
    }

    #[test]
    fn user_form_validates_presence_and_email_shape() {
        let mut form = UserForm::new();
        assert!(form.build().is_err());

        form.first_name = "Ada".into();
        form.last_name = "Lovelace".into();
        form.email = "not-an-email".into();
        assert!(form.build().unwrap_err().contains("Invalid email"));

        form.email = "ada@example.edu".into();
        let draft = form.build().unwrap();
        assert_eq!(draft.department, "IT");
    }

    #[test]
    fn user_form_department_cycles() {
        let mut form = UserForm::new();
        for _ in 0..DEPARTMENTS.len() {
            form.cycle_department();
        }
        assert_eq!(form.department, 0);
    }
}
