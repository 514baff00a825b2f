//! Outfit recommendation engine
//!
//! Pure filtering over a caller-supplied candidate pool. The engine performs
//! no I/O, keeps pool order within each group and never sorts by price.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::rules::{RuleTable, TargetRule};
use super::{BaseColor, CatalogItem, GarmentAttributes, GarmentCategory};
use crate::tone::ToneBand;

/// Matches grouped under one rule label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationGroup {
    pub label: String,
    pub inner_layer: bool,
    pub items: Vec<CatalogItem>,
}

/// Result of a recommendation request
///
/// `rule_matched == false` means the source garment has no curated pairing,
/// which callers present differently from "curated but nothing in stock".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub rule_matched: bool,
    pub groups: Vec<RecommendationGroup>,
}

impl Recommendations {
    fn unmatched() -> Self {
        Self {
            rule_matched: false,
            groups: Vec::new(),
        }
    }

    /// True if no group has any item
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group for a label, if it has matches
    pub fn get(&self, label: &str) -> Option<&RecommendationGroup> {
        self.groups.iter().find(|group| group.label == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.label.as_str())
    }

    /// Every recommended item across groups
    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.groups.iter().flat_map(|group| group.items.iter())
    }

    /// Source price plus the price of every recommended item
    pub fn outfit_total(&self, source_price: f64) -> f64 {
        source_price + self.items().map(|item| item.price).sum::<f64>()
    }
}

/// Rule-based outfit compatibility matcher
#[derive(Debug, Clone, Default)]
pub struct CompatibilityEngine {
    rules: RuleTable,
}

impl CompatibilityEngine {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Recommend complementary garments for `source` from `pool`
    ///
    /// A source with an unrecognized category or an uncurated style yields
    /// an empty, unmatched result. Candidates whose base color is missing or
    /// not a known family are skipped.
    pub fn recommend(&self, source: &CatalogItem, pool: &[CatalogItem]) -> Recommendations {
        let Some(attributes) = source.attributes() else {
            debug!(
                "Source {} has unrecognized category {:?}",
                source.id, source.product_type
            );
            return Recommendations::unmatched();
        };

        let recommendations = self.recommend_for(&attributes, Some(&source.id), pool);
        info!(
            "Recommended {} items in {} groups for {} ({} {})",
            recommendations.items().count(),
            recommendations.groups.len(),
            source.id,
            attributes.category,
            attributes.style
        );
        recommendations
    }

    /// Recommend for bare attributes, excluding `exclude_id` from the results
    pub fn recommend_for(
        &self,
        source: &GarmentAttributes,
        exclude_id: Option<&str>,
        pool: &[CatalogItem],
    ) -> Recommendations {
        let Some(targets) = self.rules.lookup(source.category, &source.style) else {
            debug!("No rule for {} {}", source.category, source.style);
            return Recommendations::unmatched();
        };

        let allowed = source.allowed_colors();
        let groups = targets
            .iter()
            .filter_map(|target| {
                let items: Vec<CatalogItem> = pool
                    .iter()
                    .filter(|candidate| Some(candidate.id.as_str()) != exclude_id)
                    .filter(|candidate| matches_target(candidate, target))
                    .filter(|candidate| has_allowed_color(candidate, &allowed))
                    .cloned()
                    .collect();

                (!items.is_empty()).then(|| RecommendationGroup {
                    label: target.label.clone(),
                    inner_layer: target.inner_layer,
                    items,
                })
            })
            .collect();

        Recommendations {
            rule_matched: true,
            groups,
        }
    }

    /// Topwear from `pool` that flatters a tone band, best color first
    ///
    /// Only candidates whose color is in the band's priority list are kept.
    /// The sort is stable, so equal colors keep pool order.
    pub fn recommend_for_tone(&self, band: ToneBand, pool: &[CatalogItem]) -> Vec<CatalogItem> {
        let priority = band.color_priority();

        let mut ranked: Vec<(usize, &CatalogItem)> = pool
            .iter()
            .filter(|item| item.category_token() == GarmentCategory::Topwear.as_str())
            .filter_map(|item| {
                let color = item.color_family()?;
                let rank = priority.iter().position(|&preferred| preferred == color)?;
                Some((rank, item))
            })
            .collect();
        ranked.sort_by_key(|(rank, _)| *rank);

        info!("Selected {} topwear items for {} tone", ranked.len(), band);
        ranked.into_iter().map(|(_, item)| item.clone()).collect()
    }
}

fn matches_target(candidate: &CatalogItem, target: &TargetRule) -> bool {
    candidate.category_token() == target.category.as_str()
        && target.accepts_style(&candidate.product_style)
}

fn has_allowed_color(candidate: &CatalogItem, allowed: &[BaseColor]) -> bool {
    match candidate.base_color.as_deref() {
        None => false,
        Some(raw) => match raw.parse::<BaseColor>() {
            Ok(color) => allowed.contains(&color),
            Err(_) => {
                warn!("Skipping {}: unrecognized base color {:?}", candidate.id, raw);
                false
            }
        },
    }
}
