//! Error types for crystallographic data and scene building.

use thiserror::Error;

/// The error type for structure and scene-building operations.
///
/// Degenerate geometry (failed hulls, unavailable ellipsoid decomposition) is
/// recovered locally by the builders and never surfaces here; these variants
/// are caller data-contract violations, reported fail-fast.
#[derive(Error, Debug)]
pub enum StructureError {
    /// A site was constructed with no species entries.
    #[error("site has no species entries")]
    EmptySpecies,

    /// A species occupancy lies outside (0, 1].
    #[error("species '{label}' has occupancy {occupancy} outside (0, 1]")]
    InvalidOccupancy {
        /// Species label.
        label: String,
        /// The offending occupancy.
        occupancy: f64,
    },

    /// A species display radius is not positive.
    #[error("species '{label}' has non-positive display radius {radius}")]
    InvalidRadius {
        /// Species label.
        label: String,
        /// The offending radius.
        radius: f64,
    },

    /// The lattice basis vectors do not span three dimensions.
    #[error("lattice basis is singular (volume {volume})")]
    SingularLattice {
        /// Absolute cell volume of the rejected basis.
        volume: f64,
    },

    /// A site index referenced a site that does not exist.
    #[error("site index {index} out of range for structure with {len} sites")]
    SiteIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of sites in the structure.
        len: usize,
    },

    /// A bond connected a site to itself within the home image.
    #[error("site {index} cannot bond to itself in the home image")]
    SelfBond {
        /// The offending site index.
        index: usize,
    },

    /// A configured tensor site property is missing on a site.
    #[error("site property '{name}' not present on site")]
    MissingSiteProperty {
        /// The configured property name.
        name: String,
    },
}

/// A specialized Result type for structure operations.
pub type Result<T> = std::result::Result<T, StructureError>;
