use glam::Vec2;
use rand::{rngs::StdRng, SeedableRng};

use flag_wasm::params::{panel_controls, ControlKind, FrequencyAxis, ParamUpdate};
use flag_wasm::textures::FlagTexture;
use flag_wasm::uniforms::Color;
use flag_wasm::{Demo, DemoConfig, Update};

fn demo() -> Demo {
    Demo::new(DemoConfig::default(), &mut StdRng::seed_from_u64(11)).unwrap()
}

fn control(demo: &Demo, label: &str) -> flag_wasm::params::ControlSpec {
    panel_controls(demo.config())
        .into_iter()
        .find(|c| c.label == label)
        .unwrap()
}

#[test]
fn uniforms_start_from_config() {
    let demo = demo();
    let uniforms = demo.uniforms();
    assert_eq!(uniforms.frequency, Vec2::new(10.0, 5.0));
    assert_eq!(uniforms.time, 0.0);
    assert_eq!(uniforms.color, Color::MAGENTA);
    assert_eq!(uniforms.texture, FlagTexture::Norway);
}

#[test]
fn panel_lists_three_controls_in_order() {
    let controls = panel_controls(&DemoConfig::default());
    let labels: Vec<_> = controls.iter().map(|c| c.label).collect();
    assert_eq!(labels, ["Frequency X", "Frequency Y", "Texture"]);
    match &controls[0].kind {
        ControlKind::Slider { slider, axis } => {
            assert_eq!(*axis, FrequencyAxis::X);
            assert_eq!((slider.min, slider.max, slider.step), (0.0, 20.0, 0.01));
        }
        other => panic!("unexpected control {other:?}"),
    }
}

#[test]
fn frequency_x_reads_back_every_slider_step() {
    let mut demo = demo();
    let slider = control(&demo, "Frequency X");
    let updates = demo.updates();
    let mut mismatches = Vec::new();
    for k in 0..=2000u32 {
        let raw = format!("{}", k as f64 / 100.0);
        updates.send(Update::Param(slider.parse(&raw).unwrap()));
        demo.advance(0.0);
        let expected: f32 = raw.parse().unwrap();
        if demo.uniforms().frequency.x != expected {
            mismatches.push((raw, demo.uniforms().frequency.x));
        }
    }
    assert!(mismatches.is_empty(), "{} off-step readbacks: {:?}", mismatches.len(), &mismatches[..mismatches.len().min(5)]);
    assert_eq!(demo.uniforms().frequency.y, 5.0);
}

#[test]
fn off_step_values_snap_to_nearest_step() {
    let mut demo = demo();
    let slider = control(&demo, "Frequency X");
    demo.updates().send(Update::Param(slider.parse("3.14159").unwrap()));
    demo.advance(0.0);
    assert_eq!(demo.uniforms().frequency.x, 3.14);
}

#[test]
fn frequency_is_clamped_to_slider_range() {
    let mut demo = demo();
    demo.apply(Update::Param(ParamUpdate::Frequency(FrequencyAxis::Y, 42.0)));
    assert_eq!(demo.uniforms().frequency.y, 20.0);
    demo.apply(Update::Param(ParamUpdate::Frequency(FrequencyAxis::Y, -1.0)));
    assert_eq!(demo.uniforms().frequency.y, 0.0);
}

#[test]
fn selecting_france_only_changes_texture() {
    let mut demo = demo();
    demo.advance(0.5);
    let before = demo.uniforms().clone();

    let update = control(&demo, "Texture").parse("France").unwrap();
    assert_eq!(update, ParamUpdate::Texture(FlagTexture::France));
    demo.updates().send(Update::Param(update));
    demo.advance(0.0);

    let after = demo.uniforms();
    assert_eq!(after.texture, FlagTexture::France);
    assert_eq!(after.frequency, before.frequency);
    assert_eq!(after.color, before.color);
    assert_eq!(after.time, before.time);
}

#[test]
fn controls_reject_values_they_cannot_produce() {
    let demo = demo();
    assert_eq!(control(&demo, "Texture").parse("Sweden"), None);
    assert_eq!(control(&demo, "Frequency X").parse("fast"), None);
}

#[test]
fn queued_updates_apply_in_order_at_next_frame() {
    let mut demo = demo();
    let updates = demo.updates();
    updates.send(Update::Param(ParamUpdate::Frequency(FrequencyAxis::X, 3.0)));
    updates.send(Update::Param(ParamUpdate::Texture(FlagTexture::British)));
    updates.send(Update::Param(ParamUpdate::Frequency(FrequencyAxis::X, 7.0)));

    // nothing applied until the frame runs
    assert_eq!(demo.uniforms().frequency.x, 10.0);
    demo.advance(0.0);
    assert_eq!(demo.uniforms().frequency.x, 7.0);
    assert_eq!(demo.uniforms().texture, FlagTexture::British);
}

#[test]
fn sending_after_the_context_is_gone_is_harmless() {
    let updates = demo().updates();
    updates.send(Update::Param(ParamUpdate::Texture(FlagTexture::France)));
}

#[test]
fn texture_labels_round_trip() {
    for flag in FlagTexture::ALL {
        assert_eq!(FlagTexture::from_label(flag.label()), Some(flag));
        assert!(flag.path().starts_with("textures/"));
    }
}
