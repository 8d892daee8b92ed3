//! Core scene-description types for xtalscene.
//!
//! This crate provides the renderer-agnostic building blocks used throughout
//! xtalscene-rs:
//! - [`Scene`] — a named group node; nested scenes form the scene tree
//! - [`Primitive`] — tagged shape descriptions (spheres, cylinders, cubes, ...)
//! - [`Color`] — opaque display-color tokens
//! - [`convex_hull`] — hull computation for coordination polyhedra
//!
//! Nothing in this crate knows about crystallography; it only describes
//! drawable geometry. The domain model and the scene builders live in
//! `xtalscene-structures`.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod color;
pub mod error;
pub mod hull;
pub mod scene;

pub use color::Color;
pub use error::{Result, SceneError};
pub use hull::convex_hull;
pub use scene::{Convex, Cubes, Cylinders, EllipsoidAxes, Lines, Primitive, Scene, Spheres, Surface};

// Re-export glam types for convenience
pub use glam::{DMat3, DVec3, IVec3};
