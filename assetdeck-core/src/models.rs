//! Records mirrored from the backend wire format.
//!
//! The client never holds an authoritative copy of any of these: every list
//! is replaced wholesale on each successful fetch, and nothing here carries
//! identity or lifecycle beyond the current render.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a piece of equipment.
///
/// Serialized with the backend's human-readable spellings (`"In Use"`,
/// `"In Repair"`), which are also what the views display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentStatus {
    Available,
    #[serde(rename = "In Use")]
    InUse,
    #[serde(rename = "In Repair")]
    InRepair,
    Retired,
    Lost,
}

impl EquipmentStatus {
    /// All statuses, in the order select widgets cycle through them.
    pub const ALL: [EquipmentStatus; 5] = [
        EquipmentStatus::Available,
        EquipmentStatus::InUse,
        EquipmentStatus::InRepair,
        EquipmentStatus::Retired,
        EquipmentStatus::Lost,
    ];

    /// Display spelling, identical to the wire spelling.
    pub fn label(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "Available",
            EquipmentStatus::InUse => "In Use",
            EquipmentStatus::InRepair => "In Repair",
            EquipmentStatus::Retired => "Retired",
            EquipmentStatus::Lost => "Lost",
        }
    }

    /// Next status in cycle order, wrapping.
    pub fn next(&self) -> EquipmentStatus {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Building half of a location reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Building {
    #[serde(default)]
    pub building_name: String,
    #[serde(default)]
    pub building_short_name: String,
}

/// A room within a building.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub location_id: i64,
    #[serde(default)]
    pub room_number: String,
    #[serde(default)]
    pub floor_number: i32,
    #[serde(default)]
    pub building: Building,
}

impl Location {
    /// Composed label used by the lookup widget, e.g.
    /// `"LIB - Floor 2, Room 204"`.
    pub fn label(&self) -> String {
        format!(
            "{} - Floor {}, Room {}",
            self.building.building_short_name, self.floor_number, self.room_number
        )
    }
}

/// An equipment record as the backend returns it.
///
/// The inventory search endpoint returns a narrower projection than
/// `GET /equipment`, so everything beyond the identity columns is optional
/// and defaults when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub equipment_id: i64,
    pub asset_tag: String,
    pub device_name: String,
    pub status: EquipmentStatus,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub form_factor: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Equipment {
    /// The fields the inventory view filters across: device name, asset
    /// tag, manufacturer.
    pub fn filter_fields(&self) -> [&str; 3] {
        [
            self.device_name.as_str(),
            self.asset_tag.as_str(),
            self.manufacturer.as_deref().unwrap_or(""),
        ]
    }
}

/// Payload for `POST /equipment`.
///
/// Assignment fields are only present when the create form's assignment
/// checkbox is checked; the rest of the optional hardware columns are
/// omitted when blank.
#[derive(Debug, Clone, Serialize)]
pub struct EquipmentDraft {
    pub asset_tag: String,
    pub device_name: String,
    pub status: EquipmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_factor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_capacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_purpose: Option<String>,
}

/// Department reference on a device user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Department {
    #[serde(default)]
    pub department_id: i64,
    #[serde(default)]
    pub department_name: String,
    #[serde(default)]
    pub department_short_name: String,
}

/// Employment-type reference on a device user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmploymentType {
    #[serde(default)]
    pub employment_type_id: i64,
    #[serde(default)]
    pub employment_type_name: String,
}

/// A device user as `GET /device-users` returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceUser {
    pub device_user_id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Department,
    #[serde(default)]
    pub employment_type: EmploymentType,
}

impl DeviceUser {
    /// Composed label used by the assignment lookup widget.
    pub fn label(&self) -> String {
        format!("{} {} <{}>", self.first_name, self.last_name, self.email)
    }
}

/// A row from `GET /api/users/search` — a flattened projection with the
/// department resolved to its name and the assigned-device count computed
/// server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub user_id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub device_count: usize,
}

/// Payload for `POST /api/users/add`. The backend resolves the department
/// name to its id.
#[derive(Debug, Clone, Serialize)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
}

/// A derived, read-only projection of equipment returned by report
/// generation; lives only for the duration of the report view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub equipment_id: i64,
    pub device_name: String,
    #[serde(default)]
    pub form_factor: Option<String>,
    pub status: EquipmentStatus,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Report filter criteria for `POST /api/reports/generate` and
/// `POST /api/reports/export`.
///
/// Blank selections must reach the wire as JSON `null`, never `""` — the
/// backend distinguishes "no filter" from "filter on empty string". Every
/// field therefore serializes unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportFilters {
    #[serde(rename = "type")]
    pub equipment_type: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ReportFilters {
    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.equipment_type.is_none()
            && self.department.is_none()
            && self.status.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// One aggregate point for the dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_backend_spellings() {
        assert_eq!(
            serde_json::to_string(&EquipmentStatus::InUse).unwrap(),
            "\"In Use\""
        );
        assert_eq!(
            serde_json::from_str::<EquipmentStatus>("\"In Repair\"").unwrap(),
            EquipmentStatus::InRepair
        );
        assert_eq!(EquipmentStatus::Lost.label(), "Lost");
    }

    #[test]
    fn status_cycle_wraps() {
        let mut status = EquipmentStatus::Available;
        for _ in 0..EquipmentStatus::ALL.len() {
            status = status.next();
        }
        assert_eq!(status, EquipmentStatus::Available);
    }

    #[test]
    fn equipment_decodes_search_projection() {
        // The inventory search endpoint omits manufacturer, model and
        // location entirely.
        let json = r#"{
            "equipment_id": 7,
            "asset_tag": "IT-0007",
            "serial_number": "SN-1234",
            "device_name": "Latitude 5440",
            "status": "Available",
            "form_factor": "Laptop",
            "updated_at": "2025-03-01T09:30:00Z"
        }"#;
        let eq: Equipment = serde_json::from_str(json).unwrap();
        assert_eq!(eq.equipment_id, 7);
        assert!(eq.manufacturer.is_none());
        assert!(eq.location.is_none());
    }

    #[test]
    fn blank_report_filters_serialize_as_null() {
        let filters = ReportFilters::default();
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json["type"], serde_json::Value::Null);
        assert_eq!(json["department"], serde_json::Value::Null);
        assert_eq!(json["status"], serde_json::Value::Null);
        assert_eq!(json["start_date"], serde_json::Value::Null);
        assert_eq!(json["end_date"], serde_json::Value::Null);
    }

    #[test]
    fn set_report_filters_keep_their_values() {
        let filters = ReportFilters {
            equipment_type: Some("Laptop".into()),
            status: Some("In Use".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json["type"], "Laptop");
        assert_eq!(json["status"], "In Use");
        assert_eq!(json["department"], serde_json::Value::Null);
    }

    #[test]
    fn location_label_composes_building_floor_room() {
        let loc = Location {
            location_id: 3,
            room_number: "204".into(),
            floor_number: 2,
            building: Building {
                building_name: "Main Library".into(),
                building_short_name: "LIB".into(),
            },
        };
        assert_eq!(loc.label(), "LIB - Floor 2, Room 204");
    }
}
