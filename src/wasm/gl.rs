//! WebGL2 side of the shader program: compile, link, upload the plane and
//! issue the draw.

use js_sys::{Float32Array, Uint32Array};
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::texture::TextureProvider;
use crate::error::{DemoError, Result};
use crate::geometry::PlaneGeometry;
use crate::scene::Scene;
use crate::uniforms::{U_COLOR, U_FREQUENCY, U_MODEL, U_PROJECTION, U_TEXTURE, U_TIME, U_VIEW};
use crate::Frame;

struct Locations {
    projection: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    model: Option<WebGlUniformLocation>,
    frequency: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    texture: Option<WebGlUniformLocation>,
}

impl Locations {
    fn lookup(gl: &GL, program: &WebGlProgram) -> Self {
        let at = |name: &str| gl.get_uniform_location(program, name);
        Self {
            projection: at(U_PROJECTION),
            view: at(U_VIEW),
            model: at(U_MODEL),
            frequency: at(U_FREQUENCY),
            time: at(U_TIME),
            color: at(U_COLOR),
            texture: at(U_TEXTURE),
        }
    }
}

pub struct GlRenderer {
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    index_count: i32,
    locations: Locations,
    textures: TextureProvider,
}

impl GlRenderer {
    pub fn new(canvas: &HtmlCanvasElement, scene: &Scene) -> Result<Self> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or(DemoError::ContextUnavailable)?
            .dyn_into()
            .map_err(|_| DemoError::ContextUnavailable)?;

        let source = &scene.mesh.material.source;
        let vertex = compile_shader(&gl, GL::VERTEX_SHADER, "vertex", &source.vertex)?;
        let fragment = compile_shader(&gl, GL::FRAGMENT_SHADER, "fragment", &source.fragment)?;
        let program = link_program(&gl, &vertex, &fragment)?;

        let geometry = &scene.mesh.geometry;
        let vao = upload_geometry(&gl, &program, geometry)?;
        let locations = Locations::lookup(&gl, &program);
        let textures = TextureProvider::load(&gl)?;

        gl.enable(GL::DEPTH_TEST);
        if scene.mesh.material.double_sided {
            gl.disable(GL::CULL_FACE);
        } else {
            gl.enable(GL::CULL_FACE);
        }

        log::info!("shader program linked, {} indices uploaded", geometry.indices.len());
        Ok(Self {
            gl,
            program,
            vao,
            index_count: geometry.indices.len() as i32,
            locations,
            textures,
        })
    }

    pub fn draw(&self, scene: &Scene, frame: &Frame) -> Result<()> {
        let gl = &self.gl;
        let loc = &self.locations;
        let uniforms = &scene.mesh.material.uniforms;

        gl.viewport(0, 0, gl.drawing_buffer_width(), gl.drawing_buffer_height());
        let bg = scene.background;
        gl.clear_color(bg.r, bg.g, bg.b, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));

        gl.uniform_matrix4fv_with_f32_array(loc.projection.as_ref(), false, &frame.projection.to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(loc.view.as_ref(), false, &frame.view.to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(loc.model.as_ref(), false, &frame.model.to_cols_array());
        gl.uniform2f(loc.frequency.as_ref(), uniforms.frequency.x, uniforms.frequency.y);
        gl.uniform1f(loc.time.as_ref(), frame.time);
        gl.uniform3f(loc.color.as_ref(), uniforms.color.r, uniforms.color.g, uniforms.color.b);

        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, self.textures.get(uniforms.texture));
        gl.uniform1i(loc.texture.as_ref(), 0);

        gl.draw_elements_with_i32(GL::TRIANGLES, self.index_count, GL::UNSIGNED_INT, 0);
        gl.bind_vertex_array(None);

        match gl.get_error() {
            GL::NO_ERROR => Ok(()),
            code => Err(DemoError::Js(format!("WebGL error 0x{code:04x}"))),
        }
    }
}

fn compile_shader(gl: &GL, kind: u32, stage: &'static str, source: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or(DemoError::ResourceAllocation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(DemoError::ShaderCompile { stage, log })
    }
}

fn link_program(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or(DemoError::ResourceAllocation("program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(DemoError::ProgramLink(log))
    }
}

/// One buffer per geometry attribute plus the index buffer, all recorded in
/// one vertex array object. Attributes the program does not use are skipped,
/// except required ones.
fn upload_geometry(gl: &GL, program: &WebGlProgram, geometry: &PlaneGeometry) -> Result<WebGlVertexArrayObject> {
    let vao = gl
        .create_vertex_array()
        .ok_or(DemoError::ResourceAllocation("vertex array"))?;
    gl.bind_vertex_array(Some(&vao));

    for stream in geometry.attribute_streams() {
        let Ok(location) = u32::try_from(gl.get_attrib_location(program, stream.name)) else {
            if stream.is_required() {
                return Err(DemoError::InactiveAttribute(stream.name));
            }
            log::debug!("attribute `{}` unused by the program; not uploaded", stream.name);
            continue;
        };

        let buffer = gl
            .create_buffer()
            .ok_or(DemoError::ResourceAllocation("vertex buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let data = Float32Array::from(stream.data.as_slice());
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);
        gl.vertex_attrib_pointer_with_i32(location, stream.components, GL::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(location);
    }

    let indices = gl
        .create_buffer()
        .ok_or(DemoError::ResourceAllocation("index buffer"))?;
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
    let data = Uint32Array::from(geometry.indices.as_slice());
    gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &data, GL::STATIC_DRAW);

    gl.bind_vertex_array(None);
    gl.bind_buffer(GL::ARRAY_BUFFER, None);
    Ok(vao)
}
