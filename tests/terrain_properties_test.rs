use std::collections::HashSet;

use terrain_demos::{
    camera::OrbitCamera,
    data_structures::{
        heightfield::{NoiseSettings, SimplexNoise},
        terrain::{GridLayout, TerrainMesh},
    },
    demos::terrain::TerrainSettings,
    pipelines::terrain::HeightBand,
};

fn noise_mesh(size: u32) -> TerrainMesh {
    TerrainMesh::build(size, GridLayout::default(), &SimplexNoise::default()).unwrap()
}

#[test]
fn noise_grid_has_expected_buffer_sizes() {
    for size in [1, 10, 64] {
        let mesh = noise_mesh(size);
        let side = (size + 1) as usize;
        assert_eq!(mesh.vertices.len(), side * side);
        assert_eq!(mesh.indices.len(), 6 * (size as usize) * (size as usize));
        assert!(mesh.indices.iter().all(|&i| (i as usize) < side * side));
    }
}

#[test]
fn every_vertex_is_referenced() {
    let mesh = noise_mesh(9);
    let used: HashSet<u32> = mesh.indices.iter().copied().collect();
    assert_eq!(used.len(), mesh.vertices.len());
}

#[test]
fn cells_share_their_diagonal() {
    let size = 6;
    let row_width = size + 1;
    let mesh = noise_mesh(size);
    for (cell, chunk) in mesh.indices.chunks(6).enumerate() {
        let (x, z) = (cell as u32 / size, cell as u32 % size);
        let top_right = z * row_width + x + 1;
        let bottom_left = (z + 1) * row_width + x;
        let first: HashSet<u32> = chunk[..3].iter().copied().collect();
        let second: HashSet<u32> = chunk[3..].iter().copied().collect();
        let shared: HashSet<u32> = first.intersection(&second).copied().collect();
        assert_eq!(shared, HashSet::from([top_right, bottom_left]), "cell {}", cell);
    }
}

#[test]
fn same_settings_give_byte_identical_buffers() {
    let settings = TerrainSettings {
        size: 40,
        ..Default::default()
    };
    let a = settings.build_mesh().unwrap();
    let b = settings.build_mesh().unwrap();
    assert_eq!(
        bytemuck::cast_slice::<_, u8>(&a.vertices),
        bytemuck::cast_slice::<_, u8>(&b.vertices)
    );
    assert_eq!(
        bytemuck::cast_slice::<_, u8>(&a.indices),
        bytemuck::cast_slice::<_, u8>(&b.indices)
    );
}

#[test]
fn different_seeds_give_different_terrain() {
    let base = TerrainSettings {
        size: 40,
        ..Default::default()
    };
    let reseeded = TerrainSettings {
        noise: NoiseSettings {
            seed: 7,
            ..base.noise
        },
        ..base
    };
    assert_ne!(base.build_mesh().unwrap(), reseeded.build_mesh().unwrap());
}

#[test]
fn reference_heights_map_to_bands() {
    assert_eq!(HeightBand::classify(-1.0), HeightBand::Water);
    assert_eq!(HeightBand::classify(0.02), HeightBand::Sand);
    assert_eq!(HeightBand::classify(0.2), HeightBand::Grass);
    assert_eq!(HeightBand::classify(0.5), HeightBand::Rock);
    assert_eq!(HeightBand::classify(0.9), HeightBand::Snow);
}

#[test]
fn orbit_reproduces_constants() {
    let camera = OrbitCamera::default();
    let quarter = std::f32::consts::FRAC_PI_2;
    let eye = camera.eye(quarter);
    assert!((eye.x - 7.5).abs() < 1e-5);
    assert!((eye.y - 1.5).abs() < 1e-5);
    assert!((eye.z + 5.0).abs() < 1e-5);
}
