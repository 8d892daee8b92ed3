//! Periodic bonding graphs over structures.
//!
//! A [`StructureGraph`] owns a [`Structure`] plus an undirected multigraph of
//! bonds. Each edge records the image vector of its target endpoint relative
//! to its source endpoint's cell, so bonds across the cell boundary resolve
//! to concrete periodic images when queried.

use glam::IVec3;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::error::{Result, StructureError};
use crate::site::Site;
use crate::structure::Structure;

/// Edge payload of the bonding graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    /// Image vector of the target endpoint relative to the source endpoint.
    pub to_image: IVec3,
    /// Optional bond weight; carried through to [`ConnectedSite`] and ignored
    /// by the scene builders.
    pub weight: Option<f64>,
}

/// A bonded neighbor resolved to a concrete periodic image.
#[derive(Debug, Clone)]
pub struct ConnectedSite {
    /// Index of the neighbor site in the parent structure.
    pub index: usize,
    /// Periodic image the neighbor lives in.
    pub image: IVec3,
    /// The neighbor site translated to that image.
    pub site: Site,
    /// Optional bond weight.
    pub weight: Option<f64>,
}

/// A structure together with its bonding graph.
#[derive(Debug, Clone)]
pub struct StructureGraph {
    structure: Structure,
    graph: UnGraph<(), Bond>,
}

impl StructureGraph {
    /// Creates a bonding graph with no bonds over the given structure.
    #[must_use]
    pub fn new(structure: Structure) -> Self {
        let mut graph = UnGraph::new_undirected();
        for _ in 0..structure.len() {
            graph.add_node(());
        }
        Self { structure, graph }
    }

    /// Returns the underlying structure.
    #[must_use]
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Returns the number of bonds.
    #[must_use]
    pub fn num_bonds(&self) -> usize {
        self.graph.edge_count()
    }

    /// Adds a bond from site `from` in the home image to site `to` in image
    /// `to_image`.
    ///
    /// Fails on out-of-range indices and on a bond from a site to itself in
    /// the home image, which has no physical meaning.
    pub fn add_bond(
        &mut self,
        from: usize,
        to: usize,
        to_image: IVec3,
        weight: Option<f64>,
    ) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to && to_image == IVec3::ZERO {
            return Err(StructureError::SelfBond { index: from });
        }
        self.graph.add_edge(
            NodeIndex::new(from),
            NodeIndex::new(to),
            Bond { to_image, weight },
        );
        Ok(())
    }

    /// Returns the bonded neighbors of site `index` as seen from periodic
    /// image `image`.
    ///
    /// Each incident edge contributes one neighbor at absolute image
    /// `image + edge image` (orientation-corrected when the queried site is
    /// the edge's stored target). A bond from a site to its own periodic
    /// image is seen from both ends, so it contributes two neighbors.
    pub fn connected_sites(&self, index: usize, image: IVec3) -> Result<Vec<ConnectedSite>> {
        self.check_index(index)?;
        Ok(self.neighbors(index, image))
    }

    pub(crate) fn neighbors(&self, index: usize, image: IVec3) -> Vec<ConnectedSite> {
        let node = NodeIndex::new(index);
        let mut connected = Vec::new();
        for edge in self.graph.edges(node) {
            let bond = edge.weight();
            if edge.source() == edge.target() {
                for to_image in [bond.to_image, -bond.to_image] {
                    connected.push(self.resolve(index, image + to_image, bond.weight));
                }
            } else {
                let (other, to_image) = if edge.source() == node {
                    (edge.target(), bond.to_image)
                } else {
                    (edge.source(), -bond.to_image)
                };
                connected.push(self.resolve(other.index(), image + to_image, bond.weight));
            }
        }
        connected
    }

    fn resolve(&self, index: usize, image: IVec3, weight: Option<f64>) -> ConnectedSite {
        let site = self.structure.sites()[index].translated(image, self.structure.lattice());
        ConnectedSite {
            index,
            image,
            site,
            weight,
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.structure.len() {
            Ok(())
        } else {
            Err(StructureError::SiteIndexOutOfRange {
                index,
                len: self.structure.len(),
            })
        }
    }
}
