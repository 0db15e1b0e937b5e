//! Response aggregation
//!
//! Merges every delivered [`JobResult`] of a job into one public response:
//! joined previews and deliverables, one invoice with a per-specialist
//! breakdown, and at most one price comparison.

use hirewire_marketplace::HiringResult;
use hirewire_types::{
    BreakdownEntry, Invoice, InvoiceFragment, JobResponse, JobStatus, SpecialistRecord,
    TokenAmount, DEFAULT_CURRENCY, INVOICE_DISPLAY_DECIMALS, ZERO_ADDRESS,
};

use crate::dispatch::JobResult;
use crate::error::Result;

/// Separator between specialists' sections
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Preview used when nobody delivered and the job is still reported completed
pub const PLACEHOLDER_PREVIEW: &str =
    "Your specialists' work is being prepared. Check back shortly for the full result.";

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatorConfig {
    /// Currency when no specialist states one
    pub currency: String,
    /// Invoice amount when no fragment carries a positive amount
    pub fallback_amount: TokenAmount,
    /// Report `failed` when every hired specialist failed to deliver
    pub fail_when_no_output: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            // 0.001
            fallback_amount: TokenAmount::from_units(1_000_000_000_000_000),
            fail_when_no_output: true,
        }
    }
}

/// A delivered result with the specialist that produced it
#[derive(Debug, Clone)]
pub struct Delivery {
    pub specialist: SpecialistRecord,
    pub result: JobResult,
}

#[derive(Debug, Clone, Default)]
pub struct ResponseAggregator {
    config: AggregatorConfig,
}

impl ResponseAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Build the public response; `deliveries` are in hire order
    pub fn aggregate(
        &self,
        job_id: &str,
        deliveries: &[Delivery],
        hiring: &HiringResult,
    ) -> Result<JobResponse> {
        if deliveries.is_empty() && self.config.fail_when_no_output {
            let names = hiring
                .hired()
                .iter()
                .map(|r| r.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Ok(JobResponse::failed(
                job_id,
                format!(
                    "All hired specialists failed to deliver ({}). Please try again later.",
                    names
                ),
            ));
        }

        let previews: Vec<&str> = deliveries
            .iter()
            .map(|d| d.result.preview.trim())
            .filter(|p| !p.is_empty())
            .collect();

        let result = if previews.is_empty() {
            PLACEHOLDER_PREVIEW.to_string()
        } else {
            previews.join(SECTION_SEPARATOR)
        };

        let full_results: Vec<&str> = deliveries
            .iter()
            .map(|d| {
                d.result
                    .full_result
                    .as_deref()
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .unwrap_or_else(|| d.result.preview.trim())
            })
            .filter(|f| !f.is_empty())
            .collect();

        let full_result = if full_results.is_empty() {
            result.clone()
        } else {
            full_results.join(SECTION_SEPARATOR)
        };

        Ok(JobResponse {
            job_id: job_id.to_string(),
            status: JobStatus::Completed,
            result,
            full_result: Some(full_result),
            invoice: Some(self.invoice(deliveries, hiring)?),
            price_comparison: hiring.best_comparison().cloned(),
        })
    }

    fn invoice(&self, deliveries: &[Delivery], hiring: &HiringResult) -> Result<Invoice> {
        let valid: Vec<(&InvoiceFragment, TokenAmount)> = deliveries
            .iter()
            .filter_map(|d| {
                let fragment = d.result.invoice.as_ref()?;
                Some((fragment, valid_amount(fragment)?))
            })
            .collect();

        let mut total = TokenAmount::zero();
        for (_, amount) in &valid {
            total = total.checked_add(*amount)?;
        }
        if total.is_zero() {
            total = self.config.fallback_amount;
        }

        let payee = valid
            .iter()
            .map(|(fragment, _)| fragment.to.as_str())
            .find(|to| !to.is_empty())
            .or_else(|| hiring.hired().first().map(|r| r.address.as_str()))
            .filter(|to| !to.is_empty())
            .unwrap_or(ZERO_ADDRESS)
            .to_string();

        let currency = valid
            .iter()
            .map(|(fragment, _)| fragment.currency.as_str())
            .chain(hiring.hired().iter().map(|r| r.currency.as_str()))
            .find(|c| !c.is_empty())
            .unwrap_or(self.config.currency.as_str())
            .to_string();

        // Only shares that counted toward the total are listed
        let breakdown = if hiring.len() > 1 {
            let entries: Vec<BreakdownEntry> = deliveries.iter().filter_map(breakdown_entry).collect();
            (!entries.is_empty()).then_some(entries)
        } else {
            None
        };

        let description = describe(deliveries, hiring, breakdown.as_deref(), &currency, &payee);

        Ok(Invoice {
            amount: total.to_display_string(INVOICE_DISPLAY_DECIMALS),
            currency,
            to: payee,
            description,
            breakdown,
        })
    }
}

/// A fragment amount counts only when it parses and is positive
fn valid_amount(fragment: &InvoiceFragment) -> Option<TokenAmount> {
    fragment
        .amount
        .parse::<TokenAmount>()
        .ok()
        .filter(TokenAmount::is_positive)
}

/// The specialist's own charge; `None` unless its fragment is valid
fn breakdown_entry(delivery: &Delivery) -> Option<BreakdownEntry> {
    let record = &delivery.specialist;
    let fragment = delivery.result.invoice.as_ref()?;
    let amount = valid_amount(fragment)?;

    let address = Some(fragment.to.as_str())
        .filter(|to| !to.is_empty())
        .unwrap_or(record.address.as_str());
    if address.is_empty() {
        return None;
    }

    Some(BreakdownEntry {
        specialist: record.name.clone(),
        amount: amount.to_display_string(INVOICE_DISPLAY_DECIMALS),
        address: address.to_string(),
    })
}

fn describe(
    deliveries: &[Delivery],
    hiring: &HiringResult,
    breakdown: Option<&[BreakdownEntry]>,
    currency: &str,
    payee: &str,
) -> String {
    match breakdown {
        Some(entries) => {
            let shares = entries
                .iter()
                .map(|e| format!("{} ({} {})", e.specialist, e.amount, currency))
                .collect::<Vec<_>>()
                .join(", ");
            let primary = entries
                .iter()
                .find(|e| e.address == payee)
                .map(|e| e.specialist.as_str())
                .or_else(|| {
                    hiring
                        .hired()
                        .iter()
                        .find(|r| r.address == payee)
                        .map(|r| r.name.as_str())
                })
                .unwrap_or("the primary specialist");
            format!(
                "Work completed by {} specialists: {}. Payment goes to {}, who is responsible for distributing each specialist's share.",
                entries.len(),
                shares,
                primary
            )
        }
        None => match deliveries.first().map(|d| &d.specialist).or(hiring.hired().first()) {
            Some(record) => format!(
                "{} work completed by {}",
                record.specialization.display_name(),
                record.name
            ),
            None => "Work completed".to_string(),
        },
    }
}
