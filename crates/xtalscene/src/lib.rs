//! xtalscene: crystal structures to renderer-agnostic 3D scene descriptions.
//!
//! Given a periodic atomic structure and its bonding graph, xtalscene
//! deterministically produces a tree of drawable primitives: atoms as spheres
//! (or partial-sphere "pie charts" for disordered sites), bonds as
//! half-cylinders, coordination environments as convex polyhedra, and the
//! repeating unit cell as an outline. The tree is plain serializable data;
//! turning it into pixels is the consuming renderer's job.
//!
//! # Quick Start
//!
//! ```
//! use xtalscene::*;
//!
//! fn main() -> Result<()> {
//!     let lattice = Lattice::cubic(4.1)?;
//!
//!     let na = Site::new(
//!         SpeciesMap::from([(
//!             "Na".to_string(),
//!             Species::new(1.0, Color::new("#ab5cf2"), 1.0),
//!         )]),
//!         DVec3::splat(0.25),
//!         &lattice,
//!     )?;
//!     let cl = Site::new(
//!         SpeciesMap::from([(
//!             "Cl".to_string(),
//!             Species::new(1.0, Color::new("#1ff01f"), 1.0),
//!         )]),
//!         DVec3::splat(0.75),
//!         &lattice,
//!     )?;
//!
//!     let mut graph = StructureGraph::new(Structure::new(lattice, vec![na, cl]));
//!     graph.add_bond(0, 1, IVec3::ZERO, None)?;
//!
//!     let scene = build_structure_scene(&graph, &StructureSceneOptions::default())?;
//!     assert_eq!(scene.name, "NaCl");
//!     assert!(scene.to_json().unwrap().contains("\"atoms\""));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! xtalscene is split into a **scene** layer and a **structures** layer:
//!
//! - `xtalscene-core` describes drawable geometry: [`Scene`] group nodes and
//!   the [`Primitive`] shapes they contain.
//! - `xtalscene-structures` holds the crystallographic model ([`Lattice`],
//!   [`Site`], [`Structure`], [`StructureGraph`]) and the two builders,
//!   [`build_site_scene`] and [`build_structure_scene`].
//!
//! Both builders are pure functions: no globals, no caches, and identical
//! inputs produce structurally equal scene trees, so they may be called
//! concurrently from any number of threads.

// Re-export core types
pub use xtalscene_core::{
    convex_hull, Color, Convex, Cubes, Cylinders, DMat3, DVec3, EllipsoidAxes, IVec3, Lines,
    Primitive, Scene, SceneError, Spheres, Surface,
};

// Re-export the domain model and builders
pub use xtalscene_structures::{
    build_site_scene, build_structure_scene, ellipsoid_axes, resolve_draw_set, Bond,
    ConnectedSite, Lattice, Result, Site, SiteSceneOptions, Species, SpeciesMap, Structure,
    StructureError, StructureGraph, StructureSceneOptions,
};
