//! Convex hull computation for coordination polyhedra.

use chull::ConvexHullWrapper;
use glam::DVec3;

/// Computes the convex hull of a point set, returning the triangulated hull
/// as a flat vertex list: every three consecutive positions form one face.
///
/// Returns `None` when hull construction fails, e.g. for coplanar, collinear,
/// or otherwise degenerate input. Callers are expected to omit the polyhedron
/// in that case rather than abort.
#[must_use]
pub fn convex_hull(points: &[DVec3]) -> Option<Vec<DVec3>> {
    let rows: Vec<Vec<f64>> = points.iter().map(|p| vec![p.x, p.y, p.z]).collect();

    let hull = match ConvexHullWrapper::try_new(&rows, None) {
        Ok(hull) => hull,
        Err(_) => {
            log::debug!("convex hull construction failed on {} points", points.len());
            return None;
        }
    };

    let (vertices, indices) = hull.vertices_indices();
    let triangles = indices
        .iter()
        .map(|&idx| {
            let v = &vertices[idx];
            DVec3::new(v[0], v[1], v[2])
        })
        .collect();
    Some(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tetrahedron_hull() {
        let points = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        ];
        let hull = convex_hull(&points).expect("tetrahedron hull should exist");
        // 4 triangular faces, 3 vertices each
        assert_eq!(hull.len() % 3, 0);
        assert_eq!(hull.len(), 12);
    }

    #[test]
    fn test_octahedron_hull() {
        let points = vec![
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(-1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, -1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(0.0, 0.0, -1.0),
        ];
        let hull = convex_hull(&points).expect("octahedron hull should exist");
        // 8 triangular faces
        assert_eq!(hull.len(), 24);
    }

    #[test]
    fn test_coplanar_points_fail_gracefully() {
        let points = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
        ];
        assert!(convex_hull(&points).is_none());
    }

    #[test]
    fn test_too_few_points_fail_gracefully() {
        let points = vec![DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0)];
        assert!(convex_hull(&points).is_none());
    }
}
