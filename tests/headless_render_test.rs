#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn points_pipeline_draws_triangle_corners() {
    use common::test_utils::{FORMAT, Headless, clip_to_pixel, has_colour_near};
    use terrain_demos::{
        demos::triangle::{CLEAR_COLOUR, TRIANGLE, scene_vertices},
        pipelines::points::mk_point_pipeline,
        render::Render,
        resources::buffer::GpuMesh,
    };

    let gpu = Headless::new().unwrap();
    let pipeline = mk_point_pipeline(&gpu.device, FORMAT);
    let mesh = GpuMesh::from_vertices(&gpu.device, "Triangle", &scene_vertices());

    let pixels = gpu
        .render(CLEAR_COLOUR, |pass| {
            Render::mesh(&mesh, &pipeline, None).draw(pass);
        })
        .unwrap();

    let apex = TRIANGLE[0].position;
    assert!(has_colour_near(
        &pixels,
        clip_to_pixel(apex[0], apex[1]),
        [255, 0, 0, 255]
    ));

    // points only: the middle of the triangle keeps the clear colour
    let centre = pixels.get_pixel(32, 40).0;
    let expected = [CLEAR_COLOUR.r, CLEAR_COLOUR.g, CLEAR_COLOUR.b, CLEAR_COLOUR.a]
        .map(|c| (c * 255.0) as i32);
    for (got, want) in centre.iter().zip(expected) {
        assert!((*got as i32 - want).abs() <= 1, "{:?} vs {:?}", centre, expected);
    }
}

#[test]
#[cfg(feature = "integration-tests")]
fn terrain_covers_the_centre_of_the_view() {
    use common::test_utils::{FORMAT, HEIGHT, Headless, WIDTH};
    use std::time::Duration;
    use terrain_demos::{
        camera::{OrbitState, Projection},
        demos::terrain::TerrainSettings,
        pipelines::terrain::{SceneResources, mk_terrain_pipeline},
        render::Render,
        resources::buffer::GpuMesh,
    };

    let gpu = Headless::new().unwrap();
    let settings = TerrainSettings {
        size: 64,
        ..Default::default()
    };
    let mut scene = SceneResources::new(&gpu.device);
    let pipeline = mk_terrain_pipeline(&gpu.device, FORMAT, &scene.bind_group_layout);
    let mesh = GpuMesh::from_terrain(&gpu.device, "Terrain", &settings.build_mesh().unwrap());

    let projection = Projection::new(WIDTH, HEIGHT, settings.fovy, settings.znear, settings.zfar);
    let mut orbit = OrbitState::new(settings.camera, projection);
    scene.uniform = orbit.advance(Duration::ZERO, (WIDTH, HEIGHT));
    scene.write_to_buffer(&gpu.queue);

    let pixels = gpu
        .render(wgpu::Color::BLACK, |pass| {
            let draw = Render::mesh(&mesh, &pipeline, Some(&scene.bind_group));
            assert!(matches!(draw, Render::Indexed(_)));
            draw.draw(pass);
        })
        .unwrap();

    let centre = pixels.get_pixel(WIDTH / 2, HEIGHT / 2).0;
    assert_ne!(centre, [0, 0, 0, 255]);
}

#[test]
#[cfg(feature = "integration-tests")]
fn broken_shader_is_reported_not_fatal() {
    use common::test_utils::Headless;
    use terrain_demos::pipelines::{CompileStatus, compile_shader};

    let gpu = Headless::new().unwrap();
    let ok = compile_shader(
        &gpu.device,
        "Point Shader",
        terrain_demos::pipelines::points::shader_source().into(),
    );
    assert_eq!(ok.status, CompileStatus::Success);

    let broken = compile_shader(&gpu.device, "Broken Shader", "fn vs_main( {".into());
    assert!(!broken.status.is_success());
}
