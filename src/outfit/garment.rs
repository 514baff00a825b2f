//! Garment vocabulary and catalog records
//!
//! Catalog records arrive from an external store with free-form string
//! attributes. The typed enums here are used for the source garment and the
//! rule table; candidate records are matched on their raw, case-folded
//! strings so that unknown or garbled values simply fail to match.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::color::allowed_colors_for;
use crate::AnalysisError;

/// Garment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentCategory {
    Topwear,
    Bottomwear,
    Footwear,
}

impl GarmentCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            GarmentCategory::Topwear => "topwear",
            GarmentCategory::Bottomwear => "bottomwear",
            GarmentCategory::Footwear => "footwear",
        }
    }
}

impl FromStr for GarmentCategory {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "topwear" => Ok(GarmentCategory::Topwear),
            "bottomwear" => Ok(GarmentCategory::Bottomwear),
            "footwear" => Ok(GarmentCategory::Footwear),
            _ => Err(AnalysisError::invalid_parameter("category", s)),
        }
    }
}

impl fmt::Display for GarmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse color family assigned to a garment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseColor {
    Neutral,
    Cool,
    Warm,
    Earthy,
}

impl BaseColor {
    pub const ALL: [BaseColor; 4] = [
        BaseColor::Neutral,
        BaseColor::Earthy,
        BaseColor::Cool,
        BaseColor::Warm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BaseColor::Neutral => "neutral",
            BaseColor::Cool => "cool",
            BaseColor::Warm => "warm",
            BaseColor::Earthy => "earthy",
        }
    }
}

impl FromStr for BaseColor {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "neutral" => Ok(BaseColor::Neutral),
            "cool" => Ok(BaseColor::Cool),
            "warm" => Ok(BaseColor::Warm),
            "earthy" => Ok(BaseColor::Earthy),
            _ => Err(AnalysisError::invalid_parameter("base_color", s)),
        }
    }
}

impl fmt::Display for BaseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed attributes of the garment recommendations are built around
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarmentAttributes {
    pub category: GarmentCategory,
    /// Lowercased style token, e.g. "t-shirt"
    pub style: String,
    /// `None` when the record names a color outside the known families
    pub base_color: Option<BaseColor>,
}

impl GarmentAttributes {
    pub fn new(category: GarmentCategory, style: &str, base_color: BaseColor) -> Self {
        Self {
            category,
            style: normalize_token(style),
            base_color: Some(base_color),
        }
    }

    /// Candidate colors this garment pairs with
    pub fn allowed_colors(&self) -> Vec<BaseColor> {
        allowed_colors_for(self.base_color)
    }
}

/// Garment record as read from the catalog or wardrobe store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub product_style: String,
    #[serde(default)]
    pub base_color: Option<String>,
    #[serde(default)]
    pub activity_type: Option<String>,
}

impl CatalogItem {
    /// Typed attributes, if category is recognized
    ///
    /// A missing or blank base color falls back to neutral. A color outside
    /// the known families is kept as `None`.
    pub fn attributes(&self) -> Option<GarmentAttributes> {
        let category = self.product_type.parse().ok()?;
        let base_color = match self.base_color.as_deref().map(str::trim) {
            None | Some("") => Some(BaseColor::Neutral),
            Some(color) => color.parse().ok(),
        };

        Some(GarmentAttributes {
            category,
            style: normalize_token(&self.product_style),
            base_color,
        })
    }

    /// Lowercased category token
    pub fn category_token(&self) -> String {
        normalize_token(&self.product_type)
    }

    /// Lowercased style token
    pub fn style_token(&self) -> String {
        normalize_token(&self.product_style)
    }

    /// Parsed base color; `None` when missing or not a known family
    pub fn color_family(&self) -> Option<BaseColor> {
        self.base_color.as_deref()?.parse().ok()
    }
}

/// Case-fold and trim an attribute token
pub fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(json: &str) -> CatalogItem {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("TopWear".parse::<GarmentCategory>().unwrap(), GarmentCategory::Topwear);
        assert_eq!(" Cool ".parse::<BaseColor>().unwrap(), BaseColor::Cool);
        assert!("outerwear".parse::<GarmentCategory>().is_err());
        assert!("mauve".parse::<BaseColor>().is_err());
    }

    #[test]
    fn test_catalog_item_from_store_json() {
        let record = item(
            r#"{
                "id": "p-17",
                "name": "Washed Denim",
                "price": 2499.0,
                "images": ["https://cdn.example/p-17.jpg"],
                "productType": "Bottomwear",
                "productStyle": "Jeans",
                "baseColor": "Neutral",
                "activityType": "casual"
            }"#,
        );

        let attributes = record.attributes().unwrap();
        assert_eq!(attributes.category, GarmentCategory::Bottomwear);
        assert_eq!(attributes.style, "jeans");
        assert_eq!(attributes.base_color, Some(BaseColor::Neutral));
        assert_eq!(record.color_family(), Some(BaseColor::Neutral));
    }

    #[test]
    fn test_missing_color_falls_back_to_neutral() {
        let record = item(r#"{ "id": "a", "productType": "topwear", "productStyle": "jacket" }"#);
        assert_eq!(record.attributes().unwrap().base_color, Some(BaseColor::Neutral));
        assert_eq!(record.color_family(), None);

        let blank = item(r#"{ "id": "b", "productType": "topwear", "productStyle": "jacket", "baseColor": " " }"#);
        assert_eq!(blank.attributes().unwrap().allowed_colors().len(), 4);
    }

    #[test]
    fn test_unknown_color_pairs_with_neutral_only() {
        let record = item(
            r#"{ "id": "a", "productType": "topwear", "productStyle": "t-shirt", "baseColor": "Mauve" }"#,
        );
        let attributes = record.attributes().unwrap();
        assert_eq!(attributes.base_color, None);
        assert_eq!(attributes.allowed_colors(), vec![BaseColor::Neutral]);
    }

    #[test]
    fn test_unknown_category_has_no_attributes() {
        let record = item(r#"{ "id": "a", "productType": "accessory", "productStyle": "belt" }"#);
        assert!(record.attributes().is_none());
    }
}
