//! Crystal lattices: basis matrices, coordinate transforms, and the unit-cell
//! outline.

use glam::{DMat3, DVec3};
use xtalscene_core::{Lines, Primitive};

use crate::error::{Result, StructureError};

/// Volume below which a basis is rejected as singular.
const VOLUME_TOL: f64 = 1e-10;

/// A crystal lattice defined by three basis vectors.
///
/// Fractional coordinates are multiples of the basis vectors; Cartesian
/// coordinates are their weighted sum. The inverse basis is precomputed at
/// construction, so a `Lattice` that exists can always convert both ways.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    matrix: DMat3,
    inverse: DMat3,
}

impl Lattice {
    /// Creates a lattice from the `a`, `b`, `c` basis vectors.
    ///
    /// Fails if the vectors do not span three dimensions.
    pub fn from_vectors(a: DVec3, b: DVec3, c: DVec3) -> Result<Self> {
        let matrix = DMat3::from_cols(a, b, c);
        let volume = matrix.determinant().abs();
        if volume < VOLUME_TOL {
            return Err(StructureError::SingularLattice { volume });
        }
        Ok(Self {
            matrix,
            inverse: matrix.inverse(),
        })
    }

    /// Creates a lattice from cell parameters: lengths `a`, `b`, `c` and
    /// angles `alpha`, `beta`, `gamma` in degrees.
    ///
    /// Follows the usual convention: `a` along x, `b` in the xy plane.
    pub fn from_parameters(
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    ) -> Result<Self> {
        let cos_alpha = alpha.to_radians().cos();
        let cos_beta = beta.to_radians().cos();
        let cos_gamma = gamma.to_radians().cos();
        let sin_gamma = gamma.to_radians().sin();

        let a_vec = DVec3::new(a, 0.0, 0.0);
        let b_vec = DVec3::new(b * cos_gamma, b * sin_gamma, 0.0);

        let c1 = c * cos_beta;
        let c2 = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c3 = (c * c - c1 * c1 - c2 * c2).sqrt();
        let c_vec = DVec3::new(c1, c2, c3);

        Self::from_vectors(a_vec, b_vec, c_vec)
    }

    /// Creates a cubic lattice with edge length `a`.
    pub fn cubic(a: f64) -> Result<Self> {
        Self::from_vectors(
            DVec3::new(a, 0.0, 0.0),
            DVec3::new(0.0, a, 0.0),
            DVec3::new(0.0, 0.0, a),
        )
    }

    /// Returns the basis matrix with `a`, `b`, `c` as columns.
    #[must_use]
    pub fn matrix(&self) -> DMat3 {
        self.matrix
    }

    /// Converts a fractional coordinate to Cartesian.
    #[must_use]
    pub fn cartesian(&self, frac: DVec3) -> DVec3 {
        self.matrix * frac
    }

    /// Converts a Cartesian coordinate to fractional.
    #[must_use]
    pub fn fractional(&self, cart: DVec3) -> DVec3 {
        self.inverse * cart
    }

    /// Returns the cell volume.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.matrix.determinant().abs()
    }

    /// Returns the cell parameters `(a, b, c, alpha, beta, gamma)` with
    /// angles in degrees.
    #[must_use]
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        let a_vec = self.matrix.x_axis;
        let b_vec = self.matrix.y_axis;
        let c_vec = self.matrix.z_axis;

        let a = a_vec.length();
        let b = b_vec.length();
        let c = c_vec.length();

        let alpha = (b_vec.dot(c_vec) / (b * c)).acos().to_degrees();
        let beta = (a_vec.dot(c_vec) / (a * c)).acos().to_degrees();
        let gamma = (a_vec.dot(b_vec) / (a * b)).acos().to_degrees();

        (a, b, c, alpha, beta, gamma)
    }

    /// Returns the unit-cell outline as a [`Lines`] primitive: the 12 cell
    /// edges as consecutive Cartesian endpoint pairs, translated by
    /// `-origin`.
    #[must_use]
    pub fn scene(&self, origin: DVec3) -> Primitive {
        let mut positions = Vec::with_capacity(24);
        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    let corner = DVec3::new(f64::from(i), f64::from(j), f64::from(k));
                    for axis in 0..3 {
                        // walk each edge once, from its low corner
                        if corner[axis] == 0.0 {
                            let mut other = corner;
                            other[axis] = 1.0;
                            positions.push(self.cartesian(corner) - origin);
                            positions.push(self.cartesian(other) - origin);
                        }
                    }
                }
            }
        }
        Primitive::Lines(Lines::new(positions))
    }
}
