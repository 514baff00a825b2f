//! Curated garment pairing rules
//!
//! The table maps a source `(category, style)` to the complementary pieces
//! that complete an outfit. It is hand-authored against the catalog's style
//! vocabulary: a style with no entry gets no recommendations, so new styles
//! need new entries. [`RuleTable::gaps`] lists target styles that have no
//! entry of their own.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::garment::normalize_token;
use super::GarmentCategory;

pub const LABEL_TOPWEAR: &str = "Recommended Topwear";
pub const LABEL_BOTTOMWEAR: &str = "Recommended Bottomwear";
pub const LABEL_FOOTWEAR: &str = "Recommended Footwear";
pub const LABEL_INNER_WEAR: &str = "Recommended Inner Wear";

/// One complementary slot of an outfit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRule {
    /// Category a candidate must belong to
    pub category: GarmentCategory,
    /// Accepted candidate styles, lowercased
    pub styles: Vec<String>,
    /// Heading the matches are grouped under
    pub label: String,
    /// Worn underneath the source garment
    #[serde(default)]
    pub inner_layer: bool,
}

impl TargetRule {
    pub fn new(category: GarmentCategory, styles: &[&str], label: &str) -> Self {
        Self {
            category,
            styles: styles.iter().map(|style| normalize_token(style)).collect(),
            label: label.to_string(),
            inner_layer: false,
        }
    }

    /// Mark this slot as an inner layer
    pub fn inner(mut self) -> Self {
        self.inner_layer = true;
        self
    }

    /// Case-insensitive style membership
    pub fn accepts_style(&self, style: &str) -> bool {
        let style = normalize_token(style);
        self.styles.iter().any(|accepted| *accepted == style)
    }
}

/// Serialized form of a rule: every listed style shares the same targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityRule {
    pub category: GarmentCategory,
    pub styles: Vec<String>,
    pub targets: Vec<TargetRule>,
}

/// Lookup table from `(category, style)` to target slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CompatibilityRule>", into = "Vec<CompatibilityRule>")]
pub struct RuleTable {
    entries: BTreeMap<(GarmentCategory, String), Vec<TargetRule>>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleTable {
    /// Table with no rules
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add `targets` for every style in `styles`, replacing existing entries
    pub fn insert(&mut self, category: GarmentCategory, styles: &[&str], targets: Vec<TargetRule>) {
        for style in styles {
            let key = (category, normalize_token(style));
            if self.entries.insert(key, targets.clone()).is_some() {
                warn!("Rule for {} {} replaced", category, style);
            }
        }
    }

    /// Target slots for a source garment, if curated
    pub fn lookup(&self, category: GarmentCategory, style: &str) -> Option<&[TargetRule]> {
        self.entries
            .get(&(category, normalize_token(style)))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every source `(category, style)` with a rule, in sorted order
    pub fn sources(&self) -> impl Iterator<Item = (GarmentCategory, &str)> {
        self.entries
            .keys()
            .map(|(category, style)| (*category, style.as_str()))
    }

    /// Target `(category, style)` pairs that have no rule of their own
    pub fn gaps(&self) -> BTreeSet<(GarmentCategory, String)> {
        self.entries
            .values()
            .flatten()
            .flat_map(|target| {
                target
                    .styles
                    .iter()
                    .map(move |style| (target.category, style.clone()))
            })
            .filter(|key| !self.entries.contains_key(key))
            .collect()
    }

    /// The curated pairings shipped with the catalog vocabulary
    pub fn builtin() -> Self {
        use GarmentCategory::{Bottomwear, Footwear, Topwear};

        let mut table = Self::empty();

        table.insert(
            Topwear,
            &["t-shirt", "sweatshirt"],
            vec![
                TargetRule::new(Bottomwear, &["jeans", "joggers", "cotton-pant"], LABEL_BOTTOMWEAR),
                TargetRule::new(Footwear, &["sneakers"], LABEL_FOOTWEAR),
            ],
        );
        table.insert(
            Topwear,
            &["casual-shirt"],
            vec![
                TargetRule::new(Bottomwear, &["jeans", "trouser"], LABEL_BOTTOMWEAR),
                TargetRule::new(Footwear, &["sneakers", "loafer"], LABEL_FOOTWEAR),
            ],
        );
        table.insert(
            Topwear,
            &["formal-shirt"],
            vec![
                TargetRule::new(Bottomwear, &["trouser"], LABEL_BOTTOMWEAR),
                TargetRule::new(Footwear, &["formal-shoe", "loafer"], LABEL_FOOTWEAR),
            ],
        );
        table.insert(
            Topwear,
            &["active-t-shirt"],
            vec![
                TargetRule::new(Bottomwear, &["track-pant", "joggers", "shorts"], LABEL_BOTTOMWEAR),
                TargetRule::new(Footwear, &["sports-shoe"], LABEL_FOOTWEAR),
            ],
        );
        table.insert(
            Topwear,
            &["jacket"],
            vec![
                TargetRule::new(Topwear, &["t-shirt", "casual-shirt"], LABEL_INNER_WEAR).inner(),
                TargetRule::new(Bottomwear, &["jeans", "cotton-pant", "trouser"], LABEL_BOTTOMWEAR),
                TargetRule::new(Footwear, &["casual-shoe"], LABEL_FOOTWEAR),
            ],
        );

        table.insert(
            Bottomwear,
            &["jeans"],
            vec![
                TargetRule::new(Topwear, &["t-shirt", "casual-shirt", "sweatshirt"], LABEL_TOPWEAR),
                TargetRule::new(Footwear, &["sneakers"], LABEL_FOOTWEAR),
            ],
        );
        table.insert(
            Bottomwear,
            &["cotton-pant"],
            vec![
                TargetRule::new(Topwear, &["t-shirt", "jacket"], LABEL_TOPWEAR),
                TargetRule::new(Footwear, &["casual-shoe"], LABEL_FOOTWEAR),
            ],
        );
        table.insert(
            Bottomwear,
            &["trouser"],
            vec![
                TargetRule::new(Topwear, &["formal-shirt", "casual-shirt", "jacket"], LABEL_TOPWEAR),
                TargetRule::new(Footwear, &["formal-shoe", "loafer", "casual-shoe"], LABEL_FOOTWEAR),
            ],
        );
        table.insert(
            Bottomwear,
            &["joggers"],
            vec![
                TargetRule::new(Topwear, &["t-shirt", "sweatshirt", "active-t-shirt"], LABEL_TOPWEAR),
                TargetRule::new(Footwear, &["sneakers", "sports-shoe"], LABEL_FOOTWEAR),
            ],
        );
        table.insert(
            Bottomwear,
            &["shorts"],
            vec![
                TargetRule::new(Topwear, &["t-shirt", "active-t-shirt"], LABEL_TOPWEAR),
                TargetRule::new(Footwear, &["sneakers", "sports-shoe"], LABEL_FOOTWEAR),
            ],
        );
        table.insert(
            Bottomwear,
            &["track-pant"],
            vec![
                TargetRule::new(Topwear, &["active-t-shirt"], LABEL_TOPWEAR),
                TargetRule::new(Footwear, &["sports-shoe"], LABEL_FOOTWEAR),
            ],
        );

        table
    }
}

impl From<Vec<CompatibilityRule>> for RuleTable {
    fn from(rules: Vec<CompatibilityRule>) -> Self {
        let mut table = Self::empty();
        for rule in rules {
            let styles: Vec<&str> = rule.styles.iter().map(String::as_str).collect();
            table.insert(rule.category, &styles, rule.targets);
        }
        table
    }
}

impl From<RuleTable> for Vec<CompatibilityRule> {
    fn from(table: RuleTable) -> Self {
        table
            .entries
            .into_iter()
            .map(|((category, style), targets)| CompatibilityRule {
                category,
                styles: vec![style],
                targets,
            })
            .collect()
    }
}
