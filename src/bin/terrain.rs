use terrain_demos::{context::WindowConfig, demos::terrain::TerrainDemo, flow};

fn main() -> anyhow::Result<()> {
    flow::run::<TerrainDemo>(WindowConfig::default())
}
