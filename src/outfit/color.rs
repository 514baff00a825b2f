//! Color-family compatibility
//!
//! Directional rule: "what goes with my color". Neutral accepts every
//! family; any other family accepts itself and neutral. Callers must not
//! rely on the relation being symmetric.

use super::BaseColor;

/// Base colors a candidate may have to pair with a `source` color
pub fn allowed_colors(source: BaseColor) -> Vec<BaseColor> {
    match source {
        BaseColor::Neutral => BaseColor::ALL.to_vec(),
        other => vec![other, BaseColor::Neutral],
    }
}

/// Base colors allowed for a source whose color may be unrecognized
///
/// An unrecognized source color still pairs with neutral, and only neutral.
pub fn allowed_colors_for(source: Option<BaseColor>) -> Vec<BaseColor> {
    match source {
        Some(color) => allowed_colors(color),
        None => vec![BaseColor::Neutral],
    }
}

/// True if a candidate of color `candidate` pairs with `source`
pub fn is_compatible(source: BaseColor, candidate: BaseColor) -> bool {
    source == BaseColor::Neutral || candidate == source || candidate == BaseColor::Neutral
}
