use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Monthly work or volunteering hours required of members subject to work requirements.
pub const WORK_HOURS_THRESHOLD: u32 = 80;

/// Language that needs no translation.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Identifier wrapper for program members.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Program member routed through the workflow. Never mutated during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub eligibility: EligibilityInfo,
    pub work_requirement: WorkRequirement,
    pub contact: ContactPreferences,
    #[serde(default)]
    pub documents: BTreeMap<String, DocumentRecord>,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn has_document(&self, kind: &str) -> bool {
        self.documents.contains_key(kind)
    }

    /// True when the renewal date parses and falls within `window_days` after `today`.
    ///
    /// A renewal date that does not parse is reported as not due rather than as an error.
    pub fn is_renewal_due_soon(&self, today: NaiveDate, window_days: u32) -> bool {
        match self.eligibility.parsed_renewal_date() {
            Some(renewal) => {
                let days = (renewal - today).num_days();
                days > 0 && days <= i64::from(window_days)
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityInfo {
    pub program: String,
    pub status: EligibilityStatus,
    /// Raw `YYYY-MM-DD` string as received from the member system.
    pub renewal_date: String,
    #[serde(default)]
    pub required_documents: Vec<String>,
}

impl EligibilityInfo {
    pub fn parsed_renewal_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.renewal_date.trim(), "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Active,
    RenewalNeeded,
    Inactive,
}

impl EligibilityStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Active, Self::RenewalNeeded, Self::Inactive]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::RenewalNeeded => "renewal_needed",
            Self::Inactive => "inactive",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::RenewalNeeded => "Renewal Needed",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for EligibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown eligibility status '{0}' (expected active, renewal_needed, or inactive)")]
pub struct UnknownEligibilityStatus(pub String);

impl FromStr for EligibilityStatus {
    type Err = UnknownEligibilityStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ordered()
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| UnknownEligibilityStatus(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRequirement {
    pub required: bool,
    pub hours_reported: u32,
    #[serde(default = "default_hours_needed")]
    pub hours_needed: u32,
    #[serde(default = "default_exemption_status")]
    pub exemption_status: String,
}

impl WorkRequirement {
    pub fn not_required() -> Self {
        Self {
            required: false,
            hours_reported: 0,
            hours_needed: WORK_HOURS_THRESHOLD,
            exemption_status: default_exemption_status(),
        }
    }

    pub fn required_with_hours(hours_reported: u32) -> Self {
        Self {
            required: true,
            hours_reported,
            hours_needed: WORK_HOURS_THRESHOLD,
            exemption_status: default_exemption_status(),
        }
    }

    /// Hours still missing against the fixed monthly threshold.
    pub fn hours_remaining(&self) -> u32 {
        WORK_HOURS_THRESHOLD.saturating_sub(self.hours_reported)
    }
}

fn default_hours_needed() -> u32 {
    WORK_HOURS_THRESHOLD
}

fn default_exemption_status() -> String {
    "none".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPreferences {
    #[serde(default = "default_language")]
    pub preferred_language: String,
    pub preferred_contact_method: ContactChannel,
}

impl ContactPreferences {
    pub fn needs_translation(&self) -> bool {
        self.preferred_language != DEFAULT_LANGUAGE
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactChannel {
    Email,
    Sms,
    Phone,
    Mail,
}

impl ContactChannel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Sms => "SMS",
            Self::Phone => "Phone",
            Self::Mail => "Mail",
        }
    }
}

/// Submission metadata for a document on file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub submitted_on: NaiveDate,
    #[serde(default)]
    pub verified: bool,
}
