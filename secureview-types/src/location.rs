//! Camera locations (yards).
//!
//! The backend prefixes location columns with `ycl_`; field names are kept
//! as-is so records round-trip without renames.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LocationContacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<ContactInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<ContactInfo>,
}

/// Short camera reference embedded in a location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraDetail {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraLocation {
    pub ycl_id: i64,
    #[serde(default)]
    pub ycl_code: String,
    #[serde(default)]
    pub ycl_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ycl_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ycl_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ycl_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ycl_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ycl_province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ycl_postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ycl_caller_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ycl_cameras: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ycl_company: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ycl_events_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ycl_entry_logging: Option<bool>,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub modified_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ycl_contacts: Option<LocationContacts>,
    #[serde(default)]
    pub camera_details: Vec<CameraDetail>,
}

impl CameraLocation {
    /// One-line address: street, city, province joined by ", ".
    pub fn address_line(&self) -> String {
        [&self.ycl_address, &self.ycl_city, &self.ycl_province]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn primary_contact(&self) -> Option<&ContactInfo> {
        self.ycl_contacts.as_ref()?.primary.as_ref()
    }
}
