//! Species entries: what occupies a crystallographic site.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use xtalscene_core::Color;

/// The ordered species mapping owned by a site, keyed by element/ion label.
///
/// Insertion order is significant: disordered sites assign angular slices of
/// the atom sphere to species in this order.
pub type SpeciesMap = IndexMap<String, Species>;

/// Occupancy and display data for one species entry on a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// Fractional occupancy in (0, 1]. Occupancies on a site need not sum to
    /// one; the shortfall is drawn as a white cap.
    pub occupancy: f64,
    /// Display color for this entry's atom geometry.
    pub color: Color,
    /// Display radius of the atom sphere.
    pub radius: f64,
    /// Marks a placeholder/vacancy entry, drawn as a small cube instead of a
    /// sphere.
    pub is_vacancy: bool,
}

impl Species {
    /// Edge length of the cube drawn for vacancy entries, also used as their
    /// nominal radius.
    pub const VACANCY_WIDTH: f64 = 0.4;

    /// Creates a regular (non-vacancy) species entry.
    pub fn new(occupancy: f64, color: Color, radius: f64) -> Self {
        Self {
            occupancy,
            color,
            radius,
            is_vacancy: false,
        }
    }

    /// Creates a vacancy/placeholder entry.
    pub fn vacancy(occupancy: f64, color: Color) -> Self {
        Self {
            occupancy,
            color,
            radius: Self::VACANCY_WIDTH,
            is_vacancy: true,
        }
    }
}
