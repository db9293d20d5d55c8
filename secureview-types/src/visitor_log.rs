//! Yard visitor entry/exit records.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Direction of a yard visit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessType {
    Entry,
    Exit,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for AccessType {
    /// Lowercase form, as the list filters expect it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry => write!(f, "entry"),
            Self::Exit => write!(f, "exit"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaptureType {
    Manual,
    Auto,
    #[serde(other)]
    Unknown,
}

/// Visitor classification used by the visitor-type filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VisitorType {
    Person,
    Vehicle,
    #[serde(other)]
    Unknown,
}

impl From<&str> for VisitorType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "person" => Self::Person,
            "vehicle" => Self::Vehicle,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for VisitorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Person => write!(f, "person"),
            Self::Vehicle => write!(f, "vehicle"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One entry or exit captured at a yard gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisitorLog {
    pub id: i64,
    #[serde(default)]
    pub capture_type: Option<CaptureType>,
    #[serde(default)]
    pub access_type: Option<AccessType>,
    #[serde(default)]
    pub operator_type: Option<String>,
    #[serde(default)]
    pub driver: Option<i64>,
    #[serde(default)]
    pub driver_type: Option<String>,
    #[serde(default)]
    pub external_driver_name: Option<String>,
    #[serde(default)]
    pub driver_license_no: Option<String>,
    #[serde(default)]
    pub driver_email: Option<String>,
    #[serde(default)]
    pub visitor_phone_number: Option<String>,
    #[serde(default)]
    pub visitor_company: Option<String>,
    #[serde(default)]
    pub visitor_purpose: Option<String>,
    #[serde(default)]
    pub license_image: Option<String>,
    #[serde(default)]
    pub license_plate: Option<String>,
    /// Unix timestamp in milliseconds
    #[serde(default)]
    pub capture_time: i64,
    /// Camera reference; shape differs between capture sources
    #[serde(default)]
    pub camera: Option<Value>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub vehicle_make: Option<String>,
    #[serde(default)]
    pub vehicle_model: Option<String>,
    #[serde(default)]
    pub vehicle_color: Option<String>,
    #[serde(default)]
    pub truck: Option<String>,
    #[serde(default)]
    pub trailer: Option<String>,
    #[serde(default)]
    pub trailer_plate: Option<String>,
    /// TRUCK, CAR, etc
    #[serde(default)]
    pub vehicle_info: Option<String>,
    #[serde(default)]
    pub safety_vest: Option<String>,
    #[serde(default)]
    pub damages: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl VisitorLog {
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.capture_time).single()
    }

    pub fn is_entry(&self) -> bool {
        self.access_type == Some(AccessType::Entry)
    }

    /// Best available name for the visitor: external driver name, then
    /// company, then licence plate.
    pub fn visitor_label(&self) -> Option<&str> {
        [
            &self.external_driver_name,
            &self.visitor_company,
            &self.license_plate,
        ]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .find(|v| !v.is_empty())
    }
}
