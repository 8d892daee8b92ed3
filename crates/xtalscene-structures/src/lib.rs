//! Crystallographic domain model and scene builders for xtalscene.
//!
//! This crate turns periodic atomic structures into scene trees:
//! - [`Lattice`], [`Species`], [`Site`], [`Structure`] — the data model
//! - [`StructureGraph`] — the periodic bonding graph
//! - [`build_site_scene`] — geometry for one site (atoms, bonds, polyhedra)
//! - [`build_structure_scene`] — the assembled scene for a whole structure,
//!   with periodic-image replication and cross-site bond consistency
//!
//! All builders are pure: inputs are borrowed, outputs are freshly allocated
//! trees, and identical inputs produce structurally equal scenes.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod builder;
pub mod error;
pub mod graph;
pub mod lattice;
pub mod site;
pub mod species;
pub mod structure;

pub use builder::{
    build_site_scene, build_structure_scene, ellipsoid_axes, resolve_draw_set, SiteSceneOptions,
    StructureSceneOptions,
};
pub use error::{Result, StructureError};
pub use graph::{Bond, ConnectedSite, StructureGraph};
pub use lattice::Lattice;
pub use site::Site;
pub use species::{Species, SpeciesMap};
pub use structure::Structure;
