//! The scene tree: named groups of drawable primitives.
//!
//! A [`Scene`] is a named node whose contents are [`Primitive`]s; a nested
//! scene is itself a primitive, which is what makes the tree. Every type here
//! is a plain, immutable value object with structural equality, so two builds
//! from identical inputs compare equal. Serialization follows the camelCase,
//! type-tagged convention expected by WebGL-style scene renderers.

use glam::DVec3;
use serde::Serialize;

use crate::color::Color;
use crate::error::Result;

/// One sphere, or a partial-sphere segment, per position.
///
/// A full sphere leaves `phi_start`/`phi_end` unset. Disordered sites are
/// drawn as contiguous angular segments ("pie-chart spheres"), one segment
/// per species, with the angles in radians over `[0, 2π]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spheres {
    /// Sphere center positions.
    pub positions: Vec<DVec3>,
    /// Display color.
    pub color: Color,
    /// Sphere radius.
    pub radius: f64,
    /// Start angle of the segment, in radians.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phi_start: Option<f64>,
    /// End angle of the segment, in radians.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phi_end: Option<f64>,
    /// Principal axes stretching the sphere into an ellipsoid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ellipsoids: Option<EllipsoidAxes>,
}

impl Spheres {
    /// Creates full spheres with no angular restriction and no ellipsoid axes.
    pub fn new(positions: Vec<DVec3>, color: Color, radius: f64) -> Self {
        Self {
            positions,
            color,
            radius,
            phi_start: None,
            phi_end: None,
            ellipsoids: None,
        }
    }
}

/// Principal axes of an ellipsoid, scaled by the semi-axis lengths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EllipsoidAxes {
    /// The three scaled principal axes.
    pub axes: [DVec3; 3],
}

/// Cylinders, one per pair of endpoint positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cylinders {
    /// Endpoint pairs, one `[start, end]` per cylinder.
    pub position_pairs: Vec<[DVec3; 2]>,
    /// Display color.
    pub color: Color,
}

impl Cylinders {
    /// Creates cylinders from endpoint pairs.
    pub fn new(position_pairs: Vec<[DVec3; 2]>, color: Color) -> Self {
        Self {
            position_pairs,
            color,
        }
    }
}

/// Axis-aligned cubes, one per position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cubes {
    /// Cube center positions.
    pub positions: Vec<DVec3>,
    /// Display color.
    pub color: Color,
    /// Edge length.
    pub width: f64,
}

impl Cubes {
    /// Creates cubes of the given edge length.
    pub fn new(positions: Vec<DVec3>, color: Color, width: f64) -> Self {
        Self {
            positions,
            color,
            width,
        }
    }
}

/// A convex volume described by its vertices; the renderer triangulates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Convex {
    /// Vertex positions; the drawn shape is their convex hull.
    pub positions: Vec<DVec3>,
    /// Display color.
    pub color: Color,
}

impl Convex {
    /// Creates a convex volume from vertex positions.
    pub fn new(positions: Vec<DVec3>, color: Color) -> Self {
        Self { positions, color }
    }
}

/// An explicit triangulated surface: every three consecutive positions form
/// one triangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    /// Triangle-soup vertex positions.
    pub positions: Vec<DVec3>,
    /// Display color.
    pub color: Color,
}

impl Surface {
    /// Creates a surface from triangle-soup positions.
    pub fn new(positions: Vec<DVec3>, color: Color) -> Self {
        Self { positions, color }
    }
}

/// Line segments: every two consecutive positions form one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lines {
    /// Segment endpoint positions, in pairs.
    pub positions: Vec<DVec3>,
}

impl Lines {
    /// Creates line segments from paired endpoint positions.
    pub fn new(positions: Vec<DVec3>) -> Self {
        Self { positions }
    }
}

/// A drawable primitive, tagged by shape kind.
///
/// A nested [`Scene`] is itself a primitive; this is what lets groups contain
/// groups and form the scene tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    /// Spheres or partial-sphere segments.
    Spheres(Spheres),
    /// Cylinders between endpoint pairs.
    Cylinders(Cylinders),
    /// Axis-aligned cubes.
    Cubes(Cubes),
    /// A convex volume over vertex positions.
    Convex(Convex),
    /// An explicit triangulated surface.
    Surface(Surface),
    /// Line segments.
    Lines(Lines),
    /// A nested named group.
    Scene(Scene),
}

/// A named group node in the scene tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// The name of this group.
    pub name: String,
    /// The primitives (including nested scenes) in this group, in draw order.
    pub contents: Vec<Primitive>,
}

impl Scene {
    /// Creates an empty scene with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: Vec::new(),
        }
    }

    /// Creates a scene with the given name and contents.
    pub fn with_contents(name: impl Into<String>, contents: Vec<Primitive>) -> Self {
        Self {
            name: name.into(),
            contents,
        }
    }

    /// Appends a primitive to this scene.
    pub fn push(&mut self, primitive: Primitive) {
        self.contents.push(primitive);
    }

    /// Returns true if this scene has no contents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Serializes this scene tree to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<Scene> for Primitive {
    fn from(scene: Scene) -> Self {
        Primitive::Scene(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_nesting() {
        let mut root = Scene::new("root");
        root.push(Scene::with_contents("child", Vec::new()).into());
        assert_eq!(root.contents.len(), 1);
        match &root.contents[0] {
            Primitive::Scene(child) => assert_eq!(child.name, "child"),
            other => panic!("expected nested scene, got {other:?}"),
        }
    }

    #[test]
    fn test_structural_equality() {
        let make = || {
            Scene::with_contents(
                "a",
                vec![Primitive::Spheres(Spheres::new(
                    vec![DVec3::new(1.0, 2.0, 3.0)],
                    Color::new("#ff0000"),
                    0.5,
                ))],
            )
        };
        assert_eq!(make(), make());
    }

    #[test]
    fn test_spheres_json_omits_unset_fields() {
        let spheres = Spheres::new(vec![DVec3::ZERO], Color::new("#00ff00"), 1.0);
        let json = serde_json::to_string(&Primitive::Spheres(spheres)).unwrap();
        assert!(json.contains("\"type\":\"spheres\""));
        assert!(json.contains("\"radius\":1.0"));
        assert!(!json.contains("phiStart"));
        assert!(!json.contains("ellipsoids"));
    }

    #[test]
    fn test_segment_json_uses_camel_case() {
        let spheres = Spheres {
            phi_start: Some(0.0),
            phi_end: Some(1.0),
            ..Spheres::new(vec![DVec3::ZERO], Color::new("#00ff00"), 1.0)
        };
        let json = serde_json::to_string(&spheres).unwrap();
        assert!(json.contains("\"phiStart\":0.0"));
        assert!(json.contains("\"phiEnd\":1.0"));
    }

    #[test]
    fn test_cylinders_json_shape() {
        let cylinders = Cylinders::new(
            vec![[DVec3::ZERO, DVec3::new(0.0, 0.0, 1.0)]],
            Color::new("#555555"),
        );
        let json = serde_json::to_string(&Primitive::Cylinders(cylinders)).unwrap();
        assert!(json.contains("\"type\":\"cylinders\""));
        assert!(json.contains("\"positionPairs\":[[[0.0,0.0,0.0],[0.0,0.0,1.0]]]"));
    }

    #[test]
    fn test_scene_to_json() {
        let scene = Scene::with_contents(
            "NaCl",
            vec![Scene::with_contents("atoms", Vec::new()).into()],
        );
        let json = scene.to_json().unwrap();
        assert!(json.starts_with("{\"name\":\"NaCl\""));
        assert!(json.contains("\"type\":\"scene\""));
    }
}
