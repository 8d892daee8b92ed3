//! Opaque display-color tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque display-color token, conventionally a hex string such as
/// `"#ff0000"`.
///
/// The scene builders never parse colors; they only copy and compare them, so
/// any token the consuming renderer understands is valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Creates a color from a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the color token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The neutral gray used for bonds and polyhedra of sites whose species
    /// carry more than one distinct display color.
    pub fn disordered_gray() -> Self {
        Self::new("#555555")
    }

    /// The white used to cap a disordered site whose occupancies sum to less
    /// than one.
    pub fn occupancy_cap() -> Self {
        Self::new("#ffffff")
    }
}

impl From<&str> for Color {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
