//! Outfit compatibility module
//!
//! This module provides the garment vocabulary, the color-family rule,
//! the curated pairing table and the engine that filters a catalog with them.
//! It has no dependency on the skin-tone pipeline apart from tone bands.

pub mod color;
pub mod engine;
pub mod garment;
pub mod rules;

pub use color::{allowed_colors, allowed_colors_for, is_compatible};
pub use engine::{CompatibilityEngine, RecommendationGroup, Recommendations};
pub use garment::{BaseColor, CatalogItem, GarmentAttributes, GarmentCategory};
pub use rules::{CompatibilityRule, RuleTable, TargetRule};
