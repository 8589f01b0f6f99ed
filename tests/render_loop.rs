use approx::assert_relative_eq;
use rand::{rngs::StdRng, SeedableRng};

use flag_wasm::clock::FrameClock;
use flag_wasm::controls::{OrbitInput, PointerButton};
use flag_wasm::{Demo, DemoConfig, Update};

fn demo() -> Demo {
    Demo::new(DemoConfig::default(), &mut StdRng::seed_from_u64(5)).unwrap()
}

fn orbit(demo: &Demo, inputs: &[OrbitInput]) {
    let updates = demo.updates();
    for input in inputs {
        updates.send(Update::Orbit(*input));
    }
}

#[test]
fn time_never_decreases() {
    let mut demo = demo();
    let mut clock = FrameClock::new();
    let mut last = demo.uniforms().time;
    for now in [100.0, 116.0, 133.0, 120.0, 150.0, f64::NAN, 170.0, 170.0] {
        let frame = demo.advance(clock.tick(now));
        assert!(frame.time >= last, "{} < {}", frame.time, last);
        assert_eq!(frame.time, demo.uniforms().time);
        last = frame.time;
    }
    assert_relative_eq!(last, 0.07, epsilon = 1e-5);
}

#[test]
fn negative_delta_is_ignored() {
    let mut demo = demo();
    demo.advance(1.0);
    demo.advance(-0.5);
    demo.advance(f32::NAN);
    assert_eq!(demo.uniforms().time, 1.0);
}

#[test]
fn first_tick_starts_the_clock() {
    let mut clock = FrameClock::new();
    assert_eq!(clock.tick(5_000.0), 0.0);
    assert_relative_eq!(clock.tick(5_250.0), 0.25);
    assert_eq!(clock.tick(5_100.0), 0.0);
}

#[test]
fn frame_carries_scene_matrices() {
    let mut demo = demo();
    let frame = demo.advance(0.0);
    assert_eq!(frame.model, demo.scene().mesh.model_matrix());
    assert_eq!(frame.view, demo.camera().view_matrix());
    assert_relative_eq!(frame.model.y_axis.y, 2.0 / 3.0);
}

#[test]
fn camera_keeps_moving_after_drag_ends() {
    let mut demo = demo();
    let radius = demo.camera().position.length();
    orbit(
        &demo,
        &[
            OrbitInput::PointerDown { button: PointerButton::Primary, x: 100.0, y: 100.0 },
            OrbitInput::PointerMove { x: 150.0, y: 100.0 },
            OrbitInput::PointerUp,
        ],
    );

    let mut previous = demo.camera().position;
    let mut steps = Vec::new();
    for _ in 0..20 {
        demo.advance(0.016);
        let position = demo.camera().position;
        steps.push(position.distance(previous));
        previous = position;
    }

    assert!(!demo.controls().is_dragging());
    assert!(steps.iter().all(|&s| s > 0.0));
    assert!(steps.windows(2).all(|w| w[1] < w[0]), "motion should ease out: {steps:?}");
    assert_relative_eq!(demo.camera().position.length(), radius, epsilon = 1e-4);
}

#[test]
fn damped_rotation_converges_to_full_drag() {
    let mut demo = demo();
    let start = demo.camera().position;
    orbit(
        &demo,
        &[
            OrbitInput::PointerDown { button: PointerButton::Primary, x: 0.0, y: 0.0 },
            OrbitInput::PointerMove { x: 50.0, y: 0.0 },
            OrbitInput::PointerUp,
        ],
    );
    for _ in 0..1000 {
        demo.advance(0.016);
    }

    // 50px across a 600px-high viewport is a sixth of a turn
    let expected = start.x.atan2(start.z) - std::f32::consts::TAU * 50.0 / 600.0;
    let end = demo.camera().position;
    assert_relative_eq!(end.x.atan2(end.z), expected, epsilon = 1e-3);
    assert_relative_eq!(end.y, start.y, epsilon = 1e-4);

    let before = demo.camera().position;
    demo.advance(0.016);
    assert_relative_eq!(demo.camera().position.distance(before), 0.0, epsilon = 1e-6);
}

#[test]
fn wheel_zooms_towards_target() {
    let mut demo = demo();
    let radius = demo.camera().position.length();
    orbit(&demo, &[OrbitInput::Wheel { delta_y: -100.0 }]);
    demo.advance(0.016);
    assert_relative_eq!(demo.camera().position.length(), radius * 0.95, epsilon = 1e-5);

    orbit(&demo, &[OrbitInput::Wheel { delta_y: 100.0 }]);
    demo.advance(0.016);
    assert_relative_eq!(demo.camera().position.length(), radius, epsilon = 1e-5);
}

#[test]
fn right_drag_pans_the_target() {
    let mut demo = demo();
    orbit(
        &demo,
        &[
            OrbitInput::PointerDown { button: PointerButton::Secondary, x: 200.0, y: 200.0 },
            OrbitInput::PointerMove { x: 260.0, y: 200.0 },
            OrbitInput::PointerUp,
        ],
    );
    for _ in 0..200 {
        demo.advance(0.016);
    }
    let camera = demo.camera();
    // dragging right drags the scene right, so the target slides left
    assert!(camera.target.length() > 0.01);
    assert!(camera.target.dot(camera.right()) < 0.0);
}

#[test]
fn moves_without_a_pressed_button_are_ignored() {
    let mut demo = demo();
    let start = demo.camera().position;
    orbit(&demo, &[OrbitInput::PointerMove { x: 400.0, y: 10.0 }]);
    for _ in 0..10 {
        demo.advance(0.016);
    }
    assert_eq!(demo.camera().position, start);
}
