//! The backend API client.
//!
//! Fixed origin, no versioning, no auth headers. Search and report
//! responses arrive wrapped in a `{ "data": [...] }` envelope whose `data`
//! field may be absent; list endpoints return bare arrays.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use assetdeck_core::models::{
    ChartPoint, DeviceUser, Equipment, EquipmentDraft, Location, ReportFilters, ReportRow,
    UserDraft, UserRow,
};

use crate::error::{ApiError, Result};

/// Envelope used by search and report endpoints. A missing `data` field
/// decodes to an empty set rather than an error.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// Envelope used by the dashboard aggregates. Here an absent `data` field
/// is a malformed response: the dashboard is the one view that surfaces
/// errors, so the distinction must survive decoding.
#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    data: Option<Vec<ChartPoint>>,
}

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    query: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    filters: &'a ReportFilters,
}

#[derive(Debug, Serialize)]
struct ExportBody<'a> {
    filters: &'a ReportFilters,
    format: &'a str,
}

/// Report export formats and the filenames they download as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl ExportFormat {
    /// Wire value expected by `POST /api/reports/export`.
    pub fn wire_value(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "excel",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Filename the exported blob is saved under.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "equipment-report.xlsx",
            ExportFormat::Pdf => "equipment-report.pdf",
        }
    }
}

/// Client for the equipment-tracking backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given origin. A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Full equipment collection. The inventory view fetches this once on
    /// mount and filters client-side.
    pub async fn list_equipment(&self) -> Result<Vec<Equipment>> {
        self.get_json("/equipment").await
    }

    /// Create a new equipment record. The caller refreshes its list
    /// afterwards; the response body is not inspected.
    pub async fn create_equipment(&self, draft: &EquipmentDraft) -> Result<()> {
        let endpoint = "/equipment";
        debug!(asset_tag = %draft.asset_tag, "creating equipment");
        let response = self
            .client
            .post(self.url(endpoint))
            .json(draft)
            .send()
            .await?;
        Self::check_status(endpoint, response).await?;
        Ok(())
    }

    /// Server-side inventory search over asset tags and serial numbers.
    pub async fn search_inventory(&self, query: &str) -> Result<Vec<Equipment>> {
        let envelope: DataEnvelope<Equipment> = self
            .post_json("/api/inventory/search", &SearchBody { query })
            .await?;
        Ok(envelope.data)
    }

    /// All locations, with building info resolved. A reference collection
    /// for the location lookup widget.
    pub async fn list_locations(&self) -> Result<Vec<Location>> {
        self.get_json("/locations").await
    }

    /// All device users with department and employment type resolved. A
    /// reference collection for the assignment lookup widget.
    pub async fn list_device_users(&self) -> Result<Vec<DeviceUser>> {
        self.get_json("/device-users").await
    }

    /// Server-side user search over names and email. An empty query
    /// returns the full collection.
    pub async fn search_users(&self, query: &str) -> Result<Vec<UserRow>> {
        let endpoint = format!(
            "/api/users/search?query={}",
            urlencode(query)
        );
        let envelope: DataEnvelope<UserRow> = self.get_json(&endpoint).await?;
        Ok(envelope.data)
    }

    /// Add a device user. The backend resolves the department name.
    pub async fn add_user(&self, draft: &UserDraft) -> Result<()> {
        let endpoint = "/api/users/add";
        let response = self
            .client
            .post(self.url(endpoint))
            .json(draft)
            .send()
            .await?;
        Self::check_status(endpoint, response).await?;
        Ok(())
    }

    /// Generate report rows for the given filters. Blank filters are
    /// already `None` in [`ReportFilters`] and reach the wire as `null`.
    pub async fn generate_report(&self, filters: &ReportFilters) -> Result<Vec<ReportRow>> {
        let envelope: DataEnvelope<ReportRow> = self
            .post_json("/api/reports/generate", &GenerateBody { filters })
            .await?;
        Ok(envelope.data)
    }

    /// Export the report as a binary blob the caller writes to disk.
    pub async fn export_report(
        &self,
        filters: &ReportFilters,
        format: ExportFormat,
    ) -> Result<Vec<u8>> {
        let endpoint = "/api/reports/export";
        let response = self
            .client
            .post(self.url(endpoint))
            .json(&ExportBody {
                filters,
                format: format.wire_value(),
            })
            .send()
            .await?;
        let response = Self::check_status(endpoint, response).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Device counts grouped by building.
    pub async fn devices_by_building(&self) -> Result<Vec<ChartPoint>> {
        self.chart("/dashboard/devices-by-building").await
    }

    /// Device counts grouped by manufacturer.
    pub async fn devices_by_manufacturer(&self) -> Result<Vec<ChartPoint>> {
        self.chart("/dashboard/devices-by-manufacturer").await
    }

    /// Device counts grouped by form factor.
    pub async fn devices_by_form_factor(&self) -> Result<Vec<ChartPoint>> {
        self.chart("/dashboard/devices-by-form-factor").await
    }

    async fn chart(&self, endpoint: &str) -> Result<Vec<ChartPoint>> {
        let envelope: ChartEnvelope = self.get_json(endpoint).await?;
        envelope
            .data
            .ok_or_else(|| ApiError::missing_data(endpoint))
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        debug!(endpoint, "GET");
        let response = self.client.get(self.url(endpoint)).send().await?;
        let response = Self::check_status(endpoint, response).await?;
        response
            .json()
            .await
            .map_err(|err| ApiError::decode(endpoint, err))
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        debug!(endpoint, "POST");
        let response = self
            .client
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await?;
        let response = Self::check_status(endpoint, response).await?;
        response
            .json()
            .await
            .map_err(|err| ApiError::decode(endpoint, err))
    }

    async fn check_status(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::status(endpoint, status, body))
    }
}

/// Percent-encode a query parameter value. Only what a search box can
/// produce needs escaping.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_defaults_to_empty_when_data_absent() {
        let envelope: DataEnvelope<UserRow> = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_empty());

        let envelope: DataEnvelope<UserRow> =
            serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn inventory_search_envelope_decodes_narrow_projection() {
        // The search endpoint omits manufacturer, model and location.
        let json = r#"{"data": [{
            "equipment_id": 7,
            "asset_tag": "IT-0007",
            "serial_number": "SN-1234",
            "device_name": "Latitude 5440",
            "status": "In Repair",
            "form_factor": "Laptop",
            "updated_at": "2025-03-01T09:30:00Z"
        }]}"#;
        let envelope: DataEnvelope<Equipment> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert!(envelope.data[0].manufacturer.is_none());
    }

    #[test]
    fn envelope_carries_rows_when_present() {
        let json = r#"{"data": [{
            "user_id": 1,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.edu",
            "department": "Engineering",
            "device_count": 2
        }]}"#;
        let envelope: DataEnvelope<UserRow> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].device_count, 2);
    }

    #[test]
    fn chart_envelope_distinguishes_absent_from_empty() {
        let absent: ChartEnvelope = serde_json::from_str("{}").unwrap();
        assert!(absent.data.is_none());

        let empty: ChartEnvelope = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(empty.data, Some(vec![]));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.url("/equipment"), "http://localhost:8000/equipment");
    }

    #[test]
    fn export_formats_map_to_wire_values_and_filenames() {
        assert_eq!(ExportFormat::Excel.wire_value(), "excel");
        assert_eq!(ExportFormat::Excel.file_name(), "equipment-report.xlsx");
        assert_eq!(ExportFormat::Pdf.wire_value(), "pdf");
        assert_eq!(ExportFormat::Pdf.file_name(), "equipment-report.pdf");
    }

    #[test]
    fn query_values_are_percent_encoded() {
        assert_eq!(urlencode("dell latitude"), "dell%20latitude");
        assert_eq!(urlencode("a&b=c"), "a%26b%3Dc");
        assert_eq!(urlencode("plain-1.0_x~"), "plain-1.0_x~");
    }

    #[test]
    fn generate_body_nests_filters() {
        let filters = ReportFilters::default();
        let body = serde_json::to_value(GenerateBody { filters: &filters }).unwrap();
        assert!(body["filters"].is_object());
        assert_eq!(body["filters"]["type"], serde_json::Value::Null);
    }
}
