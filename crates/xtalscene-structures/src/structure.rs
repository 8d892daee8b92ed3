//! Periodic structures: a lattice plus an ordered list of sites.

use indexmap::IndexMap;

use crate::error::{Result, StructureError};
use crate::lattice::Lattice;
use crate::site::Site;

/// Tolerance used when deciding whether an element amount is integral.
const AMOUNT_TOL: f64 = 1e-8;

/// A periodic crystal structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    lattice: Lattice,
    sites: Vec<Site>,
}

impl Structure {
    /// Creates a structure from a lattice and its sites.
    ///
    /// Sites are expected to have been built against the same lattice; their
    /// Cartesian coordinates are taken as-is.
    pub fn new(lattice: Lattice, sites: Vec<Site>) -> Self {
        Self { lattice, sites }
    }

    /// Returns the lattice.
    #[must_use]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Returns the sites in order.
    #[must_use]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Returns the number of sites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Returns true if the structure has no sites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Returns the site at `index`, or an error for an out-of-range index.
    pub fn site(&self, index: usize) -> Result<&Site> {
        self.sites
            .get(index)
            .ok_or(StructureError::SiteIndexOutOfRange {
                index,
                len: self.sites.len(),
            })
    }

    /// The reduced composition formula, used as the top-level scene name.
    ///
    /// Element amounts are occupancy-weighted sums over all non-vacancy
    /// species entries, listed in first-appearance order. When every amount
    /// is integral the counts are divided by their GCD and unit counts are
    /// elided, so `Na4Cl4` reduces to `NaCl`; fractional amounts are printed
    /// with three decimals.
    #[must_use]
    pub fn reduced_formula(&self) -> String {
        let mut amounts: IndexMap<&str, f64> = IndexMap::new();
        for site in &self.sites {
            for (label, entry) in site.species() {
                if !entry.is_vacancy {
                    *amounts.entry(label.as_str()).or_insert(0.0) += entry.occupancy;
                }
            }
        }

        let integral: Option<Vec<u64>> = amounts
            .values()
            .map(|&amount| {
                let rounded = amount.round();
                ((amount - rounded).abs() < AMOUNT_TOL && rounded >= 1.0)
                    .then_some(rounded as u64)
            })
            .collect();

        match integral {
            Some(counts) => {
                let divisor = counts.iter().copied().fold(0, gcd);
                amounts
                    .keys()
                    .zip(&counts)
                    .map(|(label, &count)| format_amount(label, count / divisor))
                    .collect()
            }
            None => amounts
                .iter()
                .map(|(label, &amount)| format!("{label}{amount:.3}"))
                .collect(),
        }
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn format_amount(label: &str, count: u64) -> String {
    if count == 1 {
        label.to_string()
    } else {
        format!("{label}{count}")
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;
    use indexmap::indexmap;
    use xtalscene_core::Color;

    use super::*;
    use crate::species::Species;

    fn site(label: &str, occupancy: f64, frac: DVec3, lattice: &Lattice) -> Site {
        let species = indexmap! {
            label.to_string() => Species::new(occupancy, Color::new("#808080"), 1.0),
        };
        Site::new(species, frac, lattice).unwrap()
    }

    #[test]
    fn test_reduced_formula_divides_by_gcd() {
        let lattice = Lattice::cubic(5.6).unwrap();
        let mut sites = Vec::new();
        for i in 0..4 {
            let offset = f64::from(i) * 0.2;
            sites.push(site("Na", 1.0, DVec3::splat(offset), &lattice));
            sites.push(site("Cl", 1.0, DVec3::splat(offset + 0.1), &lattice));
        }
        let structure = Structure::new(lattice, sites);
        assert_eq!(structure.reduced_formula(), "NaCl");
    }

    #[test]
    fn test_reduced_formula_keeps_counts() {
        let lattice = Lattice::cubic(4.0).unwrap();
        let sites = vec![
            site("Ti", 1.0, DVec3::ZERO, &lattice),
            site("O", 1.0, DVec3::new(0.3, 0.3, 0.0), &lattice),
            site("O", 1.0, DVec3::new(0.7, 0.7, 0.0), &lattice),
        ];
        let structure = Structure::new(lattice, sites);
        assert_eq!(structure.reduced_formula(), "TiO2");
    }

    #[test]
    fn test_reduced_formula_fractional_occupancy() {
        let lattice = Lattice::cubic(4.0).unwrap();
        let sites = vec![site("Fe", 0.5, DVec3::ZERO, &lattice)];
        let structure = Structure::new(lattice, sites);
        assert_eq!(structure.reduced_formula(), "Fe0.500");
    }

    #[test]
    fn test_site_index_out_of_range() {
        let lattice = Lattice::cubic(4.0).unwrap();
        let structure = Structure::new(lattice, Vec::new());
        assert!(matches!(
            structure.site(0),
            Err(StructureError::SiteIndexOutOfRange { index: 0, len: 0 })
        ));
    }
}
