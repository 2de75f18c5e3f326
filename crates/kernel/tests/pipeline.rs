use labyrinth_common::FLOATS_PER_QUAD;
use labyrinth_input::{InputState, Key};
use labyrinth_kernel::{CameraState, Labyrinth, LabyrinthConfig, MotionConfig};

#[test]
fn generate_flatten_and_walk() {
    let mut lab = Labyrinth::from_config(&LabyrinthConfig::default()).unwrap();
    lab.fill_randomly().unwrap();

    let mesh = lab.mesh();
    assert_eq!(mesh.vertices.len(), mesh.colors.len());
    assert_eq!(mesh.vertices.len(), mesh.quad_count() * FLOATS_PER_QUAD);
    assert_eq!(mesh.vertices, lab.vertices());
    assert_eq!(mesh.colors, lab.colors());

    let spawn = lab.start_position().unwrap();
    let mut camera = CameraState::at(spawn);
    let mut input = InputState::new();
    let config = MotionConfig::default();

    input.apply(Key::Up, true);
    for _ in 0..10 {
        camera.step(input.snapshot(), 0.1, &config);
    }
    assert!((camera.position.z - (spawn.z - 0.2)).abs() < 1e-5);
    assert!((camera.position.x - spawn.x).abs() < 1e-5);

    input.apply(Key::Up, false);
    let resting = camera;
    camera.step(input.snapshot(), 0.5, &config);
    assert_eq!(camera, resting);
}

#[test]
fn start_floor_is_the_only_blue_quad() {
    let mut lab = Labyrinth::from_config(&LabyrinthConfig::default()).unwrap();
    lab.fill_randomly().unwrap();

    let blue = lab
        .mesh()
        .colors
        .chunks_exact(FLOATS_PER_QUAD)
        .filter(|c| c[..3] == [0.0, 0.0, 1.0])
        .count();
    assert_eq!(blue, 1);
}
