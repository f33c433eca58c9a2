//! Wire types for the budget API

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Budget status as transmitted by the API
///
/// Unknown codes decode to `Unrecognized` and keep their raw value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BudgetStatus {
    /// PENDIENTE
    Pending,
    /// EN_REVISION
    InReview,
    /// APROBADO
    Approved,
    /// RECHAZADO
    Rejected,
    /// Any other code sent by the server
    Unrecognized(String),
}

impl BudgetStatus {
    /// Statuses a user can pick in the form, in display order
    pub const SELECTABLE: [BudgetStatus; 4] = [
        BudgetStatus::Pending,
        BudgetStatus::InReview,
        BudgetStatus::Approved,
        BudgetStatus::Rejected,
    ];

    /// Wire code
    pub fn code(&self) -> &str {
        match self {
            BudgetStatus::Pending => "PENDIENTE",
            BudgetStatus::InReview => "EN_REVISION",
            BudgetStatus::Approved => "APROBADO",
            BudgetStatus::Rejected => "RECHAZADO",
            BudgetStatus::Unrecognized(raw) => raw,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &str {
        match self {
            BudgetStatus::Pending => "Pendiente",
            BudgetStatus::InReview => "En Revisión",
            BudgetStatus::Approved => "Aprobado",
            BudgetStatus::Rejected => "Rechazado",
            BudgetStatus::Unrecognized(raw) => raw,
        }
    }
}

impl Default for BudgetStatus {
    fn default() -> Self {
        BudgetStatus::Pending
    }
}

impl From<String> for BudgetStatus {
    fn from(code: String) -> Self {
        code.parse().unwrap_or(BudgetStatus::Unrecognized(code))
    }
}

impl From<BudgetStatus> for String {
    fn from(status: BudgetStatus) -> Self {
        status.code().to_string()
    }
}

impl std::str::FromStr for BudgetStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDIENTE" => Ok(BudgetStatus::Pending),
            "EN_REVISION" => Ok(BudgetStatus::InReview),
            "APROBADO" => Ok(BudgetStatus::Approved),
            "RECHAZADO" => Ok(BudgetStatus::Rejected),
            _ => Err(format!("Invalid budget status: {}", s)),
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A budget record as stored by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Identifier assigned by the server
    pub id: String,
    /// Budget name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Total amount in currency units
    #[serde(rename = "montoTotal")]
    pub total_amount: Decimal,
    /// Review status
    #[serde(rename = "estado", default)]
    pub status: BudgetStatus,
    /// ISO-8601 date as sent by the server
    #[serde(rename = "fecha", default)]
    pub date: String,
}

impl Budget {
    /// Get the budget date as NaiveDate
    ///
    /// Accepts plain dates (`2024-01-15`) and full RFC 3339 timestamps.
    pub fn date_naive(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date)
    }
}

/// Parse an ISO-8601 date or timestamp down to its calendar date
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Body of create and update requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "montoTotal")]
    pub total_amount: Decimal,
    #[serde(rename = "estado")]
    pub status: BudgetStatus,
    /// Midnight UTC timestamp, e.g. `2024-01-15T00:00:00.000Z`
    #[serde(rename = "fecha")]
    pub date: Option<String>,
}

impl BudgetRequest {
    /// Render a calendar date the way the API expects it in request bodies
    pub fn timestamp_for(date: NaiveDate) -> String {
        format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
    }
}
