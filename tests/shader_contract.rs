use rand::{rngs::StdRng, SeedableRng};

use flag_wasm::geometry::PlaneGeometry;
use flag_wasm::shader::{ShaderInterface, ShaderSource};
use flag_wasm::{Demo, DemoConfig, DemoError};

const GEOMETRY: [&str; 4] = ["position", "normal", "uv", "aRandom"];

fn flag_geometry() -> PlaneGeometry {
    PlaneGeometry::new(1.0, 1.0, 4, 4).with_random_attribute(&mut StdRng::seed_from_u64(2))
}

/// Every declared input has an uploaded stream, and every stream the shader
/// leaves out is optional.
fn assert_uploads_cover(interface: &ShaderInterface, geometry: &PlaneGeometry) {
    let streams = geometry.attribute_streams();
    for name in &interface.attributes {
        let stream = streams.iter().find(|s| s.name == name.as_str());
        let stream = stream.unwrap_or_else(|| panic!("{name} has no stream"));
        assert_eq!(stream.data.len(), stream.components as usize * geometry.vertex_count());
    }
    for stream in streams.iter().filter(|s| !interface.attributes.contains(s.name)) {
        assert!(!stream.is_required(), "{} is required but undeclared", stream.name);
    }
}

#[test]
fn built_in_shaders_honour_the_contract() {
    let interface = ShaderSource::default().validate(&GEOMETRY).unwrap();
    for name in ["uFrequency", "uTime", "uColor", "uTexture", "projectionMatrix"] {
        assert!(interface.uniforms.contains(name), "{name} missing");
    }
    assert!(interface.attributes.contains("aRandom"));
    assert!(!interface.attributes.contains("vUv"));
}

#[test]
fn renamed_attribute_is_fatal() {
    let mut source = ShaderSource::default();
    source.vertex = source.vertex.replace("aRandom", "aRand");
    let err = source.validate(&GEOMETRY).unwrap_err();
    assert!(matches!(err, DemoError::ContractViolation(ref msg) if msg.contains("aRand")));
}

#[test]
fn shader_must_consume_random_attribute() {
    let mut source = ShaderSource::default();
    source.vertex = source.vertex.replace("in float aRandom;", "");
    assert!(matches!(
        source.validate(&GEOMETRY),
        Err(DemoError::ContractViolation(_))
    ));
}

#[test]
fn missing_or_extra_uniforms_are_fatal() {
    let mut missing = ShaderSource::default();
    missing.vertex = missing.vertex.replace("uniform float uTime;", "");
    assert!(missing.validate(&GEOMETRY).is_err());

    let mut extra = ShaderSource::default();
    extra.fragment = extra.fragment.replace(
        "uniform vec3 uColor;",
        "uniform vec3 uColor;\nuniform float uOpacity;",
    );
    let err = extra.validate(&GEOMETRY).unwrap_err();
    assert!(err.to_string().contains("uOpacity"));
}

#[test]
fn commented_declarations_do_not_count() {
    let mut source = ShaderSource::default();
    source.fragment.push_str("\n// uniform float uBogus;\n");
    assert!(source.validate(&GEOMETRY).is_ok());
}

#[test]
fn demo_refuses_mismatched_shaders() {
    let mut source = ShaderSource::default();
    source.vertex = source.vertex.replace("in vec2 uv;", "in vec2 uv;\nin vec4 color;");
    let result = Demo::with_shaders(DemoConfig::default(), source, &mut StdRng::seed_from_u64(1));
    assert!(matches!(result, Err(DemoError::ContractViolation(_))));
}

#[test]
fn built_in_shaders_match_uploaded_streams() {
    let geometry = flag_geometry();
    let interface = ShaderSource::default().validate(&geometry.attribute_names()).unwrap();
    assert_uploads_cover(&interface, &geometry);
}

#[test]
fn replacement_shader_may_ignore_uv() {
    let geometry = flag_geometry();
    let mut source = ShaderSource::default();
    source.vertex = source
        .vertex
        .replace("in vec2 uv;", "")
        .replace("vUv = uv;", "vUv = position.xy + 0.5;");
    let interface = source.validate(&geometry.attribute_names()).unwrap();
    assert!(!interface.attributes.contains("uv"));
    assert_uploads_cover(&interface, &geometry);
}

#[test]
fn replacement_shader_may_read_normals() {
    let geometry = flag_geometry();
    let mut source = ShaderSource::default();
    source.vertex = source.vertex.replace("in vec2 uv;", "in vec2 uv;\nin vec3 normal;");
    let interface = source.validate(&geometry.attribute_names()).unwrap();
    assert!(interface.attributes.contains("normal"));
    assert_uploads_cover(&interface, &geometry);
}

#[test]
fn block_comments_hide_declarations() {
    let mut source = ShaderSource::default();
    source.fragment.push_str("\n/*\nuniform float uOld;\n*/\n");
    source.vertex = source
        .vertex
        .replace("in float aRandom;", "in /* per-vertex */ float aRandom;");
    let interface = source.validate(&GEOMETRY).unwrap();
    assert!(!interface.uniforms.contains("uOld"));
    assert!(interface.attributes.contains("aRandom"));
}

#[test]
fn several_declarations_on_one_line_all_count() {
    let mut source = ShaderSource::default();
    source.vertex = source
        .vertex
        .replace("uniform vec2 uFrequency;\nuniform float uTime;", "uniform vec2 uFrequency; uniform float uTime;");
    let interface = source.validate(&GEOMETRY).unwrap();
    assert!(interface.uniforms.contains("uFrequency"));
    assert!(interface.uniforms.contains("uTime"));

    let mut extra = ShaderSource::default();
    extra.fragment = extra
        .fragment
        .replace("uniform vec3 uColor;", "uniform float uGlow; uniform vec3 uColor;");
    assert!(extra.validate(&GEOMETRY).unwrap_err().to_string().contains("uGlow"));
}
