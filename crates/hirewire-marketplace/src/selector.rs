//! Cheapest-specialist selection

use std::sync::Arc;

use hirewire_types::{PriceComparison, SkillTag, SpecialistRecord};

use crate::directory::SpecialistDirectory;
use crate::error::Result;
use crate::hiring::HiringResult;

/// Resolves skills to specialists over an injected directory
#[derive(Clone)]
pub struct SpecialistSelector {
    directory: Arc<dyn SpecialistDirectory>,
}

impl SpecialistSelector {
    pub fn new(directory: Arc<dyn SpecialistDirectory>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &Arc<dyn SpecialistDirectory> {
        &self.directory
    }

    /// All specialists offering `skill`, in directory order
    pub async fn find_all(&self, skill: &SkillTag) -> Result<Vec<SpecialistRecord>> {
        self.directory.list_by_skill(skill).await
    }

    /// The cheapest specialist for `skill`
    ///
    /// A strictly lower rate wins; on an exact tie the record listed first
    /// is kept.
    pub async fn find_cheapest(&self, skill: &SkillTag) -> Result<Option<SpecialistRecord>> {
        Ok(cheapest(self.find_all(skill).await?))
    }

    /// Competing offers for `skill`, `None` when nobody offers it
    pub async fn price_comparison(&self, skill: &SkillTag) -> Result<Option<PriceComparison>> {
        Ok(comparison_for(skill, &self.find_all(skill).await?))
    }

    /// Hire the cheapest specialist for `skill` into `hiring`
    ///
    /// Also records the price comparison. Returns `None` (and hires nobody)
    /// when no record matches the skill.
    pub async fn hire(
        &self,
        skill: &SkillTag,
        hiring: &mut HiringResult,
    ) -> Result<Option<SpecialistRecord>> {
        let options = self.find_all(skill).await?;

        if let Some(comparison) = comparison_for(skill, &options) {
            hiring.record_comparison(comparison);
        }

        let Some(winner) = cheapest(options) else {
            tracing::info!(skill = %skill, "No specialist listed for skill");
            return Ok(None);
        };

        tracing::info!(
            skill = %skill,
            specialist = %winner.id,
            rate = %winner.rate,
            currency = %winner.currency,
            "Hired specialist"
        );
        hiring.hire(winner.clone());
        Ok(Some(winner))
    }
}

fn cheapest(options: Vec<SpecialistRecord>) -> Option<SpecialistRecord> {
    options.into_iter().reduce(|best, candidate| {
        if candidate.rate < best.rate {
            candidate
        } else {
            best
        }
    })
}

fn comparison_for(skill: &SkillTag, options: &[SpecialistRecord]) -> Option<PriceComparison> {
    let selected = cheapest(options.to_vec())?;
    Some(PriceComparison {
        specialization: skill.to_string(),
        options: options.iter().map(SpecialistRecord::price_option).collect(),
        selected: selected.price_option(),
    })
}
