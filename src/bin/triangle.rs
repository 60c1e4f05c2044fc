use terrain_demos::{context::WindowConfig, demos::triangle::TriangleDemo, flow};

fn main() -> anyhow::Result<()> {
    flow::run::<TriangleDemo>(WindowConfig::default().with_title("Triangle"))
}
