//! Crystallographic sites: a position plus what occupies it.

use std::collections::HashMap;

use glam::{DMat3, DVec3, IVec3};

use crate::error::{Result, StructureError};
use crate::lattice::Lattice;
use crate::species::SpeciesMap;

/// Tolerance used when deciding whether an occupancy is exactly one.
const OCCUPANCY_TOL: f64 = 1e-8;

/// One atomic site: a fractional position, its Cartesian image under the
/// lattice, an ordered species mapping, and optional named tensor properties.
///
/// A site that exists is always renderable: construction validates the
/// species mapping, so builders never have to re-check it.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    frac_coords: DVec3,
    cart_coords: DVec3,
    species: SpeciesMap,
    properties: HashMap<String, DMat3>,
}

impl Site {
    /// Creates a site at the given fractional position.
    ///
    /// The species mapping must be non-empty, with every occupancy in (0, 1]
    /// and every display radius positive.
    pub fn new(species: SpeciesMap, frac_coords: DVec3, lattice: &Lattice) -> Result<Self> {
        Self::with_properties(species, frac_coords, lattice, HashMap::new())
    }

    /// Creates a site carrying named tensor properties (e.g. anisotropic
    /// displacement matrices used for ellipsoid rendering).
    pub fn with_properties(
        species: SpeciesMap,
        frac_coords: DVec3,
        lattice: &Lattice,
        properties: HashMap<String, DMat3>,
    ) -> Result<Self> {
        if species.is_empty() {
            return Err(StructureError::EmptySpecies);
        }
        for (label, entry) in &species {
            if !(entry.occupancy > 0.0 && entry.occupancy <= 1.0) {
                return Err(StructureError::InvalidOccupancy {
                    label: label.clone(),
                    occupancy: entry.occupancy,
                });
            }
            if entry.radius <= 0.0 {
                return Err(StructureError::InvalidRadius {
                    label: label.clone(),
                    radius: entry.radius,
                });
            }
        }
        Ok(Self {
            cart_coords: lattice.cartesian(frac_coords),
            frac_coords,
            species,
            properties,
        })
    }

    /// Returns the fractional coordinate.
    ///
    /// Conceptually in [0, 1) per axis, but may lie outside for translated
    /// periodic images.
    #[must_use]
    pub fn frac_coords(&self) -> DVec3 {
        self.frac_coords
    }

    /// Returns the Cartesian coordinate derived from the lattice.
    #[must_use]
    pub fn cart_coords(&self) -> DVec3 {
        self.cart_coords
    }

    /// Returns the ordered species mapping.
    #[must_use]
    pub fn species(&self) -> &SpeciesMap {
        &self.species
    }

    /// Returns the named tensor properties.
    #[must_use]
    pub fn properties(&self) -> &HashMap<String, DMat3> {
        &self.properties
    }

    /// Looks up a tensor property by name.
    #[must_use]
    pub fn tensor_property(&self, name: &str) -> Option<&DMat3> {
        self.properties.get(name)
    }

    /// Returns true iff the site hosts exactly one species at full occupancy.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.species.len() == 1
            && self
                .species
                .values()
                .all(|entry| (entry.occupancy - 1.0).abs() < OCCUPANCY_TOL)
    }

    /// A short label for the site's occupants: the bare label for an ordered
    /// site, `"label:occupancy"` pairs otherwise.
    #[must_use]
    pub fn species_string(&self) -> String {
        if self.is_ordered() {
            self.species
                .keys()
                .next()
                .cloned()
                .unwrap_or_default()
        } else {
            self.species
                .iter()
                .map(|(label, entry)| format!("{label}:{:.3}", entry.occupancy))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    /// Returns a copy of this site translated by an integer lattice image
    /// vector, with the Cartesian coordinate recomputed.
    #[must_use]
    pub fn translated(&self, image: IVec3, lattice: &Lattice) -> Self {
        let frac_coords = self.frac_coords + image.as_dvec3();
        Self {
            frac_coords,
            cart_coords: lattice.cartesian(frac_coords),
            species: self.species.clone(),
            properties: self.properties.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::indexmap;
    use xtalscene_core::Color;

    use super::*;
    use crate::species::Species;

    fn lattice() -> Lattice {
        Lattice::cubic(4.0).unwrap()
    }

    fn single(label: &str, occupancy: f64) -> SpeciesMap {
        indexmap! {
            label.to_string() => Species::new(occupancy, Color::new("#ff0000"), 1.0),
        }
    }

    #[test]
    fn test_ordered_site() {
        let site = Site::new(single("Na", 1.0), DVec3::splat(0.5), &lattice()).unwrap();
        assert!(site.is_ordered());
        assert_eq!(site.species_string(), "Na");
        assert_eq!(site.cart_coords(), DVec3::splat(2.0));
    }

    #[test]
    fn test_partial_occupancy_is_disordered() {
        let site = Site::new(single("Na", 0.5), DVec3::ZERO, &lattice()).unwrap();
        assert!(!site.is_ordered());
        assert_eq!(site.species_string(), "Na:0.500");
    }

    #[test]
    fn test_empty_species_rejected() {
        let result = Site::new(SpeciesMap::new(), DVec3::ZERO, &lattice());
        assert!(matches!(result, Err(StructureError::EmptySpecies)));
    }

    #[test]
    fn test_occupancy_out_of_range_rejected() {
        for occupancy in [0.0, -0.5, 1.5] {
            let result = Site::new(single("Na", occupancy), DVec3::ZERO, &lattice());
            assert!(matches!(
                result,
                Err(StructureError::InvalidOccupancy { .. })
            ));
        }
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let species = indexmap! {
            "Na".to_string() => Species::new(1.0, Color::new("#ff0000"), 0.0),
        };
        let result = Site::new(species, DVec3::ZERO, &lattice());
        assert!(matches!(result, Err(StructureError::InvalidRadius { .. })));
    }

    #[test]
    fn test_translated_recomputes_cartesian() {
        let site = Site::new(single("Na", 1.0), DVec3::new(0.25, 0.0, 0.0), &lattice()).unwrap();
        let image = site.translated(IVec3::new(1, 0, -1), &lattice());
        assert_eq!(image.frac_coords(), DVec3::new(1.25, 0.0, -1.0));
        assert_eq!(image.cart_coords(), DVec3::new(5.0, 0.0, -4.0));
        assert_eq!(image.species(), site.species());
    }
}
