//! Scene builders: per-site geometry and whole-structure assembly.
//!
//! Two tightly coupled passes produce the scene tree. [`resolve_draw_set`]
//! decides which periodic images of each site appear; [`build_site_scene`]
//! emits the geometry for one resolved site; [`build_structure_scene`] drives
//! both and merges the per-site output into named category groups.

use std::collections::{BTreeSet, HashSet};
use std::f64::consts::TAU;

use glam::{DMat3, DVec3, IVec3};
use indexmap::IndexMap;
use xtalscene_core::{
    convex_hull, Color, Convex, Cubes, Cylinders, EllipsoidAxes, Primitive, Scene, Spheres,
    Surface,
};

use crate::error::{Result, StructureError};
use crate::graph::{ConnectedSite, StructureGraph};
use crate::site::Site;

/// Angular tolerance below which a disordered site's occupancy is considered
/// to fill the whole sphere.
const OCCUPANCY_ANGLE_TOL: f64 = 1e-8;

/// Fractional-coordinate tolerance for treating a site as lying on a cell
/// boundary.
const BOUNDARY_TOL: f64 = 0.05;

/// Options for [`build_site_scene`].
#[derive(Debug, Clone)]
pub struct SiteSceneOptions {
    /// Origin subtracted from every emitted Cartesian position.
    pub origin: DVec3,
    /// Name of a tensor site property to decompose into ellipsoid axes.
    /// A configured property must be present on the site.
    pub ellipsoid_property: Option<String>,
    /// Whether every bonded neighbor of the site is also being drawn. When
    /// false, no coordination polyhedron is emitted, since a partial one
    /// would under-represent the coordination environment.
    pub all_connected_sites_present: bool,
    /// Compute the polyhedron hull explicitly instead of trusting the
    /// renderer to triangulate the raw neighbor positions.
    pub explicit_polyhedra_hull: bool,
}

impl Default for SiteSceneOptions {
    fn default() -> Self {
        Self {
            origin: DVec3::ZERO,
            ellipsoid_property: None,
            all_connected_sites_present: true,
            explicit_polyhedra_hull: false,
        }
    }
}

/// Options for [`build_structure_scene`].
#[derive(Debug, Clone)]
pub struct StructureSceneOptions {
    /// Origin subtracted from every emitted Cartesian position.
    pub origin: DVec3,
    /// Replicate sites that lie on cell boundaries across the faces, edges,
    /// and corners they touch.
    pub draw_image_atoms: bool,
    /// Also draw sites outside the home cell that are bonded to a drawn
    /// site, so no drawn bond dangles into empty space.
    pub bonded_sites_outside_cell: bool,
    /// Drop bonds whose destination is not being drawn, trading bond
    /// completeness for the absence of dangling half-bonds.
    pub hide_incomplete_bonds: bool,
    /// Compute polyhedron hulls explicitly (see [`SiteSceneOptions`]).
    pub explicit_polyhedra_hull: bool,
}

impl Default for StructureSceneOptions {
    fn default() -> Self {
        Self {
            origin: DVec3::ZERO,
            draw_image_atoms: true,
            bonded_sites_outside_cell: true,
            hide_incomplete_bonds: false,
            explicit_polyhedra_hull: false,
        }
    }
}

/// Decomposes a symmetric displacement tensor into scaled ellipsoid axes.
///
/// Not yet implemented: a configured tensor property currently degrades to
/// plain spheres with a warning.
// TODO: eigen-decompose the tensor once a symmetric 3x3 eigensolver lands.
#[must_use]
pub fn ellipsoid_axes(tensor: &DMat3) -> Option<EllipsoidAxes> {
    let _ = tensor;
    log::warn!("ellipsoid decomposition is not implemented; drawing plain spheres");
    None
}

/// Builds the scene for one site: its atom geometry, the half-bonds to its
/// neighbors, and optionally its coordination polyhedron.
///
/// Returns a scene named after the site's species string, containing the
/// three sub-scenes `"atoms"`, `"bonds"`, and `"polyhedra"`.
///
/// Ordered sites emit one full sphere per species; disordered sites emit one
/// angular segment per species, proportional to occupancy, plus a white cap
/// when the occupancies do not sum to one. Vacancy entries emit small cubes.
/// Bonds are half-cylinders from the site to each bond midpoint; the
/// neighbor draws the other half when it is processed, so no global bond
/// deduplication is needed.
pub fn build_site_scene(
    site: &Site,
    connected_sites: &[ConnectedSite],
    options: &SiteSceneOptions,
) -> Result<Scene> {
    let position = site.cart_coords() - options.origin;

    let ellipsoids = match &options.ellipsoid_property {
        Some(name) => {
            let tensor =
                site.tensor_property(name)
                    .ok_or_else(|| StructureError::MissingSiteProperty {
                        name: name.clone(),
                    })?;
            ellipsoid_axes(tensor)
        }
        None => None,
    };

    // bonds and polyhedra take the site color; mixed-color sites go gray
    let site_color = site_display_color(site);
    let is_ordered = site.is_ordered();

    let mut atoms = Vec::with_capacity(site.species().len());
    let mut occupancy_cursor = 0.0;
    let mut last_phi_end = None;
    for entry in site.species().values() {
        if entry.is_vacancy {
            atoms.push(Primitive::Cubes(Cubes::new(
                vec![position],
                entry.color.clone(),
                crate::species::Species::VACANCY_WIDTH,
            )));
            continue;
        }
        let mut sphere = Spheres::new(vec![position], entry.color.clone(), entry.radius);
        if !is_ordered {
            // each species owns a contiguous angular slice proportional to
            // its occupancy (a sphere pie chart)
            let phi_start = occupancy_cursor * TAU;
            occupancy_cursor += entry.occupancy;
            let phi_end = occupancy_cursor * TAU;
            sphere.phi_start = Some(phi_start);
            sphere.phi_end = Some(phi_end);
            last_phi_end = Some(phi_end);
        }
        sphere.ellipsoids = ellipsoids.clone();
        atoms.push(Primitive::Spheres(sphere));
    }

    // unfilled occupancy gets a white cap segment
    if let (Some(phi_end), Some(first)) = (last_phi_end, site.species().values().next()) {
        if TAU - phi_end > OCCUPANCY_ANGLE_TOL {
            let mut cap = Spheres::new(vec![position], Color::occupancy_cap(), first.radius);
            cap.phi_start = Some(phi_end);
            cap.phi_end = Some(TAU);
            cap.ellipsoids = ellipsoids;
            atoms.push(Primitive::Spheres(cap));
        }
    }

    let mut bonds = Vec::with_capacity(connected_sites.len());
    let mut neighbor_positions = Vec::with_capacity(connected_sites.len());
    for connected in connected_sites {
        let neighbor_position = connected.site.cart_coords() - options.origin;
        let midpoint = (position + neighbor_position) / 2.0;
        bonds.push(Primitive::Cylinders(Cylinders::new(
            vec![[position, midpoint]],
            site_color.clone(),
        )));
        neighbor_positions.push(neighbor_position);
    }

    let mut polyhedra = Vec::new();
    if connected_sites.len() > 3 && options.all_connected_sites_present {
        if options.explicit_polyhedra_hull {
            // hull failure degrades to no polyhedron, never to a failed call
            if let Some(hull) = convex_hull(&neighbor_positions) {
                polyhedra.push(Primitive::Surface(Surface::new(hull, site_color.clone())));
            }
        } else {
            polyhedra.push(Primitive::Convex(Convex::new(
                neighbor_positions,
                site_color.clone(),
            )));
        }
    }

    Ok(Scene::with_contents(
        site.species_string(),
        vec![
            Scene::with_contents("atoms", atoms).into(),
            Scene::with_contents("bonds", bonds).into(),
            Scene::with_contents("polyhedra", polyhedra).into(),
        ],
    ))
}

/// Resolves which `(site index, image vector)` pairs must be drawn.
///
/// Every home-cell site is always included. With `draw_image_atoms`, a site
/// whose fractional coordinate lies within 0.05 of a cell boundary is
/// replicated once per non-empty subset of the boundary axes it touches, so
/// the structure looks continuous across the rendered cell. With
/// `bonded_sites_outside_cell`, neighbors outside the home cell that are
/// bonded to an included site are added as well (one pass, no transitive
/// closure).
///
/// The result is deduplicated and sorted by `(site index, image vector)`, so
/// downstream assembly is deterministic.
#[must_use]
pub fn resolve_draw_set(
    graph: &StructureGraph,
    draw_image_atoms: bool,
    bonded_sites_outside_cell: bool,
) -> Vec<(usize, IVec3)> {
    let structure = graph.structure();
    let mut draw_set: BTreeSet<(usize, [i32; 3])> =
        (0..structure.len()).map(|index| (index, [0, 0, 0])).collect();

    if draw_image_atoms {
        for (index, site) in structure.sites().iter().enumerate() {
            let frac = site.frac_coords();
            let near_zero: Vec<usize> =
                (0..3).filter(|&axis| frac[axis].abs() <= BOUNDARY_TOL).collect();
            for image in axis_subsets(&near_zero, 1) {
                draw_set.insert((index, image));
            }
            let near_one: Vec<usize> = (0..3)
                .filter(|&axis| (frac[axis] - 1.0).abs() <= BOUNDARY_TOL)
                .collect();
            for image in axis_subsets(&near_one, -1) {
                draw_set.insert((index, image));
            }
        }
    }

    if bonded_sites_outside_cell {
        let mut additions = Vec::new();
        for &(index, image) in &draw_set {
            for connected in graph.neighbors(index, IVec3::from_array(image)) {
                if connected.image != IVec3::ZERO {
                    additions.push((connected.index, connected.image.to_array()));
                }
            }
        }
        draw_set.extend(additions);
    }

    log::trace!("draw set holds {} site images", draw_set.len());
    draw_set
        .into_iter()
        .map(|(index, image)| (index, IVec3::from_array(image)))
        .collect()
}

/// One image vector per non-empty subset of `axes`, with `sign` on the
/// included axes.
fn axis_subsets(axes: &[usize], sign: i32) -> Vec<[i32; 3]> {
    let mut images = Vec::new();
    for mask in 1u32..(1 << axes.len()) {
        let mut image = [0i32; 3];
        for (bit, &axis) in axes.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                image[axis] = sign;
            }
        }
        images.push(image);
    }
    images
}

/// Builds the full scene for a bonded structure.
///
/// Resolves the draw set, builds each resolved site (translated to its
/// image), merges the per-site output into the `"atoms"`, `"bonds"`, and
/// `"polyhedra"` categories, and appends the unit-cell outline under
/// `"unit_cell"`. The returned scene is named with the structure's reduced
/// formula. Sites are processed in the draw set's sorted order, so identical
/// inputs yield structurally equal scenes.
pub fn build_structure_scene(
    graph: &StructureGraph,
    options: &StructureSceneOptions,
) -> Result<Scene> {
    let structure = graph.structure();
    let draw_set = resolve_draw_set(
        graph,
        options.draw_image_atoms,
        options.bonded_sites_outside_cell,
    );
    let drawn: HashSet<(usize, IVec3)> = draw_set.iter().copied().collect();

    let mut categories: IndexMap<String, Vec<Primitive>> = IndexMap::new();
    for category in ["atoms", "bonds", "polyhedra"] {
        categories.insert(category.to_string(), Vec::new());
    }

    for &(index, image) in &draw_set {
        let connected = graph.neighbors(index, image);

        // a polyhedron drawn with neighbors missing would misrepresent the
        // coordination environment, so completeness is checked against the
        // unfiltered neighbor list
        let drawn_count = connected
            .iter()
            .filter(|c| drawn.contains(&(c.index, c.image)))
            .count();
        let all_connected_sites_present = drawn_count == connected.len();

        let connected = if options.hide_incomplete_bonds {
            connected
                .into_iter()
                .filter(|c| drawn.contains(&(c.index, c.image)))
                .collect()
        } else {
            connected
        };

        let site_options = SiteSceneOptions {
            origin: options.origin,
            ellipsoid_property: None,
            all_connected_sites_present,
            explicit_polyhedra_hull: options.explicit_polyhedra_hull,
        };

        let site_scene = if image == IVec3::ZERO {
            build_site_scene(&structure.sites()[index], &connected, &site_options)?
        } else {
            let translated = structure.sites()[index].translated(image, structure.lattice());
            build_site_scene(&translated, &connected, &site_options)?
        };

        for node in site_scene.contents {
            if let Primitive::Scene(sub) = node {
                categories.entry(sub.name).or_default().extend(sub.contents);
            }
        }
    }

    categories
        .entry("unit_cell".to_string())
        .or_default()
        .push(structure.lattice().scene(options.origin));

    let contents = categories
        .into_iter()
        .map(|(name, primitives)| Scene::with_contents(name, primitives).into())
        .collect();
    Ok(Scene::with_contents(structure.reduced_formula(), contents))
}

impl Site {
    /// Convenience wrapper around [`build_site_scene`].
    pub fn scene(
        &self,
        connected_sites: &[ConnectedSite],
        options: &SiteSceneOptions,
    ) -> Result<Scene> {
        build_site_scene(self, connected_sites, options)
    }
}

impl StructureGraph {
    /// Convenience wrapper around [`build_structure_scene`].
    pub fn scene(&self, options: &StructureSceneOptions) -> Result<Scene> {
        build_structure_scene(self, options)
    }
}

fn site_display_color(site: &Site) -> Color {
    let distinct: HashSet<&Color> = site.species().values().map(|entry| &entry.color).collect();
    if distinct.len() > 1 {
        Color::disordered_gray()
    } else {
        site.species()
            .values()
            .next()
            .map(|entry| entry.color.clone())
            .unwrap_or_else(Color::disordered_gray)
    }
}
