use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum VendorStatus {
    Processing,
    Approved,
    Rejected,
}

impl VendorStatus {
    pub fn label(self) -> &'static str {
        match self {
            VendorStatus::Processing => "Processing",
            VendorStatus::Approved => "Approved",
            VendorStatus::Rejected => "Rejected",
        }
    }

    /// Approve/reject are only offered while the application is still pending.
    pub fn is_pending(self) -> bool {
        self == VendorStatus::Processing
    }
}

impl TryFrom<u8> for VendorStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(VendorStatus::Processing),
            1 => Ok(VendorStatus::Approved),
            2 => Ok(VendorStatus::Rejected),
            other => Err(format!("unknown vendor status {}", other)),
        }
    }
}

impl From<VendorStatus> for u8 {
    fn from(status: VendorStatus) -> Self {
        match status {
            VendorStatus::Processing => 0,
            VendorStatus::Approved => 1,
            VendorStatus::Rejected => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum VendorType {
    Individual,
    Business,
}

impl VendorType {
    pub fn badge(self) -> &'static str {
        match self {
            VendorType::Individual => "I",
            VendorType::Business => "B",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VendorType::Individual => "Individual",
            VendorType::Business => "Business",
        }
    }
}

impl TryFrom<u8> for VendorType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(VendorType::Individual),
            1 => Ok(VendorType::Business),
            other => Err(format!("unknown vendor type {}", other)),
        }
    }
}

impl From<VendorType> for u8 {
    fn from(kind: VendorType) -> Self {
        match kind {
            VendorType::Individual => 0,
            VendorType::Business => 1,
        }
    }
}

/// Write-only secret. Never printed.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub store_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "NIN", default)]
    pub nin: String,
    #[serde(default)]
    pub store_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Password>,
    #[serde(rename = "incorporationDocumentURL", default)]
    pub incorporation_document_url: String,
    #[serde(rename = "addressProofURL", default)]
    pub address_proof_url: String,
    pub vendor_type: VendorType,
    pub status: VendorStatus,
    pub created_at: DateTime<Utc>,
}

impl Vendor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect()
    }
}
