//! Job wire types
//!
//! `JobResponse` is the public result of the coordinating agent; the chat UI
//! renders `result` as the pre-payment preview, unlocks `fullResult` after
//! the on-chain payment, and pays `invoice`. `SpecialistJobRequest` and
//! `SpecialistReply` are the specialist endpoint contract.

use serde::{Deserialize, Deserializer, Serialize};

/// Terminal (or transient) state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Completed,
    Failed,
    InProgress,
}

/// Public result of a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub job_id: String,
    pub status: JobStatus,
    /// Preview shown before payment (or the failure/clarification message)
    pub result: String,
    /// Full deliverable shown after payment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<Invoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_comparison: Option<PriceComparison>,
}

impl JobResponse {
    /// A completed job with only a text result
    pub fn completed(job_id: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            status: JobStatus::Completed,
            result: result.into(),
            full_result: None,
            invoice: None,
            price_comparison: None,
        }
    }

    /// A failed job; `result` carries the reason
    pub fn failed(job_id: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            status: JobStatus::Failed,
            result: result.into(),
            full_result: None,
            invoice: None,
            price_comparison: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == JobStatus::Completed
    }
}

/// Aggregate invoice for a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub amount: String,
    pub currency: String,
    /// Primary payee
    pub to: String,
    pub description: String,
    /// Per-specialist shares, present only when several specialists were hired
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<BreakdownEntry>>,
}

/// One specialist's share of an aggregate invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub specialist: String,
    pub amount: String,
    pub address: String,
}

/// A single specialist's charge
///
/// Fragments may come from external endpoints, so every field is optional on
/// the wire and `amount` accepts either a string or a JSON number. Validity
/// is judged by the aggregator, not at parse time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFragment {
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub description: String,
}

/// Competing offers for one specialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub specialization: String,
    pub options: Vec<PriceOption>,
    pub selected: PriceOption,
}

/// A single offer in a price comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceOption {
    pub name: String,
    pub rate: String,
    pub address: String,
}

/// Body POSTed to a specialist endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialistJobRequest {
    pub job: String,
}

/// Body returned by a specialist endpoint
///
/// `result` is mandatory: a body without a string `result` does not parse
/// and counts as a failed call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialistReply {
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<InvoiceFragment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
