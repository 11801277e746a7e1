use crate::core::classifier::config::ConfigClassifier;
use crate::core::models::builder::StructureBuilder;
use crate::core::models::coords::Coordinates;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

pub fn relative_error(value: f64, expected: f64) -> f64 {
    ((value - expected) / expected).abs()
}

/// Two partially overlapping spheres.
pub fn two_spheres() -> (Coordinates, Vec<f64>) {
    let coords = Coordinates::from(&[[0.0, 0.0, 0.0], [3.0, 0.4, 0.7]][..]);
    (coords, vec![1.8, 1.5])
}

/// Exact SASA of [`two_spheres`]: both sphere areas minus the two caps hidden in the lens.
pub fn two_spheres_exact_area(probe_radius: f64) -> f64 {
    let (coords, radii) = two_spheres();
    let r1 = radii[0] + probe_radius;
    let r2 = radii[1] + probe_radius;
    let d = (coords[1] - coords[0]).norm();
    let h1 = r1 - (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let h2 = r2 - (d * d + r2 * r2 - r1 * r1) / (2.0 * d);
    4.0 * PI * (r1 * r1 + r2 * r2) - 2.0 * PI * (r1 * h1 + r2 * h2)
}

/// A compact cluster of six mutually overlapping atoms.
pub fn six_atom_cluster() -> (Coordinates, Vec<f64>) {
    let coords = Coordinates::from(
        &[
            [0.0, 0.0, 0.0],
            [1.5, 0.0, 0.0],
            [0.0, 1.5, 0.0],
            [0.0, 0.0, 1.5],
            [1.5, 1.5, 1.5],
            [-1.2, 0.8, -0.9],
        ][..],
    );
    (coords, vec![1.7, 1.55, 1.52, 1.8, 1.7, 1.55])
}

/// `n` atoms scattered uniformly in a cube at roughly protein packing density.
pub fn random_cloud(seed: u64, n: usize) -> (Coordinates, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let half_side = 0.5 * (n as f64 * 15.0).cbrt();
    let coords: Coordinates = (0..n)
        .map(|_| {
            Point3::new(
                rng.gen_range(-half_side..half_side),
                rng.gen_range(-half_side..half_side),
                rng.gen_range(-half_side..half_side),
            )
        })
        .collect();
    let radii = (0..n).map(|_| rng.gen_range(1.4..2.0)).collect();
    (coords, radii)
}

pub const PROTEIN_CLASSIFIER_TOML: &str = r#"
name = "fixture-protein"

[types]
C_ALI = { radius = 1.87, class = "apolar" }
C_CAR = { radius = 1.76, class = "apolar" }
N     = { radius = 1.65, class = "polar" }
O     = { radius = 1.40, class = "polar" }

[atoms.ANY]
N  = "N"
CA = "C_ALI"
C  = "C_CAR"
O  = "O"
CB = "C_ALI"

[atoms.SER]
OG = "O"

[max_area.ALA]
total = 107.95
polar = 38.54
apolar = 69.41
main_chain = 38.54
side_chain = 69.41

[max_area.SER]
total = 116.06
polar = 65.62
apolar = 50.44
main_chain = 39.68
side_chain = 76.38
"#;

pub fn protein_classifier() -> ConfigClassifier {
    ConfigClassifier::from_toml_str(PROTEIN_CLASSIFIER_TOML).unwrap()
}

/// Chain A: ALA 1, SER 2, GLY 3 in an extended conformation. Chain B: one water far away.
///
/// GLY has no reference areas in [`PROTEIN_CLASSIFIER_TOML`], and the water oxygen is the only
/// atom of HOH.
pub fn tripeptide() -> Structure {
    let records: [(char, &str, &str, &str, [f64; 3], f64); 16] = [
        ('A', "1", "ALA", "N", [0.0, 0.0, 0.0], 1.55),
        ('A', "1", "ALA", "CA", [1.46, 0.0, 0.0], 1.70),
        ('A', "1", "ALA", "C", [2.0, 1.42, 0.0], 1.70),
        ('A', "1", "ALA", "O", [1.25, 2.39, 0.0], 1.52),
        ('A', "1", "ALA", "CB", [2.0, -0.77, 1.2], 1.70),
        ('A', "2", "SER", "N", [3.33, 1.55, 0.0], 1.55),
        ('A', "2", "SER", "CA", [3.96, 2.86, 0.0], 1.70),
        ('A', "2", "SER", "C", [5.47, 2.72, 0.0], 1.70),
        ('A', "2", "SER", "O", [6.05, 1.63, 0.0], 1.52),
        ('A', "2", "SER", "CB", [3.5, 3.6, 1.25], 1.70),
        ('A', "2", "SER", "OG", [3.9, 4.95, 1.2], 1.52),
        ('A', "3", "GLY", "N", [6.1, 3.86, 0.0], 1.55),
        ('A', "3", "GLY", "CA", [7.55, 3.9, 0.0], 1.70),
        ('A', "3", "GLY", "C", [8.1, 5.3, 0.0], 1.70),
        ('A', "3", "GLY", "O", [7.4, 6.3, 0.0], 1.52),
        ('B', "101", "HOH", "O", [25.0, 0.0, 0.0], 1.52),
    ];
    let mut builder = StructureBuilder::new();
    for (chain, number, residue, atom, [x, y, z], radius) in records {
        builder
            .add_atom(chain, number, residue, atom, Point3::new(x, y, z), radius)
            .unwrap();
    }
    builder.build()
}
