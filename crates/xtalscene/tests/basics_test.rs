//! End-to-end tests for the public xtalscene API, driving the full
//! structure-to-scene pipeline on small real crystals.

use xtalscene::*;

fn species(label: &str, color: &str) -> SpeciesMap {
    SpeciesMap::from([(label.to_string(), Species::new(1.0, Color::new(color), 1.0))])
}

/// CsCl: Cs on the cell corner, Cl at the body center, Cl bonded to all
/// eight corner images.
fn cscl() -> StructureGraph {
    let lattice = Lattice::cubic(4.11).expect("cubic lattice");
    let cs = Site::new(species("Cs", "#57178f"), DVec3::ZERO, &lattice).expect("Cs site");
    let cl = Site::new(species("Cl", "#1ff01f"), DVec3::splat(0.5), &lattice).expect("Cl site");
    let mut graph = StructureGraph::new(Structure::new(lattice, vec![cs, cl]));
    for image in [
        IVec3::new(0, 0, 0),
        IVec3::new(1, 0, 0),
        IVec3::new(0, 1, 0),
        IVec3::new(0, 0, 1),
        IVec3::new(1, 1, 0),
        IVec3::new(1, 0, 1),
        IVec3::new(0, 1, 1),
        IVec3::new(1, 1, 1),
    ] {
        graph.add_bond(1, 0, image, None).expect("bond");
    }
    graph
}

fn subscene<'a>(scene: &'a Scene, name: &str) -> &'a Scene {
    scene
        .contents
        .iter()
        .find_map(|node| match node {
            Primitive::Scene(sub) if sub.name == name => Some(sub),
            _ => None,
        })
        .unwrap_or_else(|| panic!("missing sub-scene '{name}'"))
}

#[test]
fn test_cscl_scene_assembly() {
    let _ = env_logger::builder().is_test(true).try_init();

    let graph = cscl();
    let options = StructureSceneOptions {
        bonded_sites_outside_cell: false,
        ..StructureSceneOptions::default()
    };
    let scene = build_structure_scene(&graph, &options).expect("scene build");

    assert_eq!(scene.name, "CsCl");

    // the corner Cs is replicated to all eight touched corners, plus the
    // body-center Cl
    let atoms = subscene(&scene, "atoms");
    assert_eq!(atoms.contents.len(), 9);

    // only the home Cl sees its full coordination sphere drawn, so exactly
    // one coordination polyhedron appears
    let polyhedra = subscene(&scene, "polyhedra");
    assert_eq!(polyhedra.contents.len(), 1);
    assert!(matches!(polyhedra.contents[0], Primitive::Convex(_)));

    let unit_cell = subscene(&scene, "unit_cell");
    assert_eq!(unit_cell.contents.len(), 1);
    assert!(matches!(unit_cell.contents[0], Primitive::Lines(_)));
}

#[test]
fn test_cscl_scene_is_idempotent() {
    let graph = cscl();
    let options = StructureSceneOptions::default();
    let first = build_structure_scene(&graph, &options).expect("first build");
    let second = build_structure_scene(&graph, &options).expect("second build");
    assert_eq!(first, second);
}

#[test]
fn test_home_cell_only() {
    let graph = cscl();
    let options = StructureSceneOptions {
        draw_image_atoms: false,
        bonded_sites_outside_cell: false,
        ..StructureSceneOptions::default()
    };
    let scene = build_structure_scene(&graph, &options).expect("scene build");
    assert_eq!(subscene(&scene, "atoms").contents.len(), 2);
}

#[test]
fn test_explicit_hull_produces_triangulated_surface() {
    let graph = cscl();
    let options = StructureSceneOptions {
        bonded_sites_outside_cell: false,
        explicit_polyhedra_hull: true,
        ..StructureSceneOptions::default()
    };
    let scene = build_structure_scene(&graph, &options).expect("scene build");

    let polyhedra = subscene(&scene, "polyhedra");
    assert_eq!(polyhedra.contents.len(), 1);
    match &polyhedra.contents[0] {
        Primitive::Surface(surface) => {
            assert!(!surface.positions.is_empty());
            assert_eq!(surface.positions.len() % 3, 0);
        }
        other => panic!("expected a triangulated surface, got {other:?}"),
    }
}

#[test]
fn test_scene_serializes_to_json() {
    let graph = cscl();
    let options = StructureSceneOptions {
        bonded_sites_outside_cell: false,
        ..StructureSceneOptions::default()
    };
    let scene = build_structure_scene(&graph, &options).expect("scene build");
    let json = scene.to_json().expect("serialization");

    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(value["name"], "CsCl");
    let categories: Vec<&str> = value["contents"]
        .as_array()
        .expect("contents array")
        .iter()
        .map(|sub| sub["name"].as_str().expect("sub-scene name"))
        .collect();
    assert_eq!(categories, vec!["atoms", "bonds", "polyhedra", "unit_cell"]);
}

#[test]
fn test_disordered_site_end_to_end() {
    let lattice = Lattice::cubic(3.0).expect("cubic lattice");
    let fe = Site::new(
        SpeciesMap::from([(
            "Fe".to_string(),
            Species::new(0.5, Color::new("#e06633"), 1.0),
        )]),
        DVec3::splat(0.5),
        &lattice,
    )
    .expect("Fe site");
    let graph = StructureGraph::new(Structure::new(lattice, vec![fe]));

    let scene = build_structure_scene(&graph, &StructureSceneOptions::default()).expect("scene");
    assert_eq!(scene.name, "Fe0.500");

    // one half-occupancy slice plus the white cap
    let atoms = subscene(&scene, "atoms");
    assert_eq!(atoms.contents.len(), 2);
}

#[test]
fn test_site_scene_via_convenience_method() {
    let lattice = Lattice::cubic(4.0).expect("cubic lattice");
    let site = Site::new(species("Na", "#ab5cf2"), DVec3::splat(0.5), &lattice).expect("site");
    let scene = site
        .scene(&[], &SiteSceneOptions::default())
        .expect("site scene");
    assert_eq!(scene.name, "Na");
}
