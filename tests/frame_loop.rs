//! End-to-end exercise of the facade over the recording backend: a shader
//! program is built, geometry and a texture are uploaded, and the perf graph
//! runs through simulated frames, in the order an application loop would.

#![cfg(feature = "dummy")]

use std::time::{Duration, Instant};

use glbridge::{
    BufferTarget, BufferUsageHint, Canvas, Color, DummyGl, GlContext, PerfGraph, PixelFormat,
    PixelType, RecordedCall, ShaderKind, TextAlign, TextureTarget,
};

const VERTEX_SRC: &str = "#version 410\nin vec2 a_position;\nvoid main() { gl_Position = vec4(a_position, 0.0, 1.0); }";
const FRAGMENT_SRC: &str = "#version 410\nout vec4 color;\nvoid main() { color = vec4(1.0); }";

#[derive(bytemuck::Pod, bytemuck::Zeroable, Clone, Copy)]
#[repr(C)]
struct Vertex {
    position: [f32; 2],
    uv: [f32; 2],
}

/// Canvas that only counts calls; the overlay's exact geometry is covered by
/// the unit tests in `perf`.
#[derive(Default)]
struct CountingCanvas {
    draws: usize,
}

impl Canvas for CountingCanvas {
    fn begin_path(&mut self) {}
    fn rect(&mut self, _: f32, _: f32, _: f32, _: f32) {}
    fn move_to(&mut self, _: f32, _: f32) {}
    fn line_to(&mut self, _: f32, _: f32) {}
    fn fill(&mut self) {
        self.draws += 1;
    }
    fn set_fill_color(&mut self, _: Color) {}
    fn set_font_face(&mut self, _: &str) {}
    fn set_font_size(&mut self, _: f32) {}
    fn set_text_align(&mut self, _: TextAlign) {}
    fn text(&mut self, _: f32, _: f32, _: &str) {
        self.draws += 1;
    }
}

#[test]
fn shader_program_build_flow() {
    let _ = env_logger::builder().is_test(true).try_init();
    glbridge::init();

    let gl = GlContext::new(DummyGl::new());

    let vertex = gl.create_shader(ShaderKind::Vertex);
    gl.shader_source(vertex, VERTEX_SRC);
    gl.compile_shader(vertex);
    assert!(gl.compile_status(vertex));
    assert_eq!(gl.shader_info_log(vertex), "");

    let fragment = gl.create_shader(ShaderKind::Fragment);
    gl.shader_source(fragment, FRAGMENT_SRC);
    gl.compile_shader(fragment);
    assert!(gl.compile_status(fragment));

    let program = gl.create_program();
    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);
    assert!(gl.link_status(program));

    let position = gl.attrib_location(program, "a_position");
    assert!(position.is_valid());

    gl.delete_shader(vertex).unwrap();
    gl.delete_shader(fragment).unwrap();

    // The recorded stream must contain the sources exactly as marshalled.
    let sources: Vec<String> = gl
        .backend()
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            RecordedCall::ShaderSource { mut sources, .. } => Some(sources.remove(0)),
            _ => None,
        })
        .collect();
    assert_eq!(sources, vec![VERTEX_SRC.to_string(), FRAGMENT_SRC.to_string()]);
}

#[test]
fn failed_compile_surfaces_log_as_data() {
    let gl = GlContext::new(DummyGl::new());
    gl.backend().set_compile_status(false);
    gl.backend().set_shader_info_log("0:2: error: 'vec5' undeclared");

    let shader = gl.create_shader(ShaderKind::Vertex);
    gl.shader_source(shader, "void main() { vec5 broken; }");
    gl.compile_shader(shader);

    // A rejected compile is data for the caller, not an Err anywhere.
    assert!(!gl.compile_status(shader));
    assert_eq!(gl.shader_info_log(shader), "0:2: error: 'vec5' undeclared");
}

#[test]
fn frame_lockstep_loop() {
    let gl = GlContext::new(DummyGl::new());

    // Startup: geometry and a font atlas texture.
    let vao = gl.create_vertex_array();
    let vbo = gl.create_buffer();
    let quad = [
        Vertex { position: [0.0, 0.0], uv: [0.0, 0.0] },
        Vertex { position: [1.0, 0.0], uv: [1.0, 0.0] },
        Vertex { position: [1.0, 1.0], uv: [1.0, 1.0] },
        Vertex { position: [0.0, 1.0], uv: [0.0, 1.0] },
    ];
    gl.buffer_data(BufferTarget::Array, &quad, BufferUsageHint::StaticDraw)
        .unwrap();

    let atlas = gl.create_texture();
    gl.bind_texture(TextureTarget::Texture2d, atlas);
    gl.tex_image_2d(
        TextureTarget::Texture2d,
        0,
        64,
        64,
        PixelFormat::Red,
        PixelType::UnsignedByte,
        &[0u8; 64 * 64],
    )
    .unwrap();

    // Per-frame: timing sample, a glyph sub-upload, overlay render.
    let t0 = Instant::now();
    let mut graph = PerfGraph::new_at("Frame Time", "sans", t0);
    let mut canvas = CountingCanvas::default();

    let mut now = t0;
    for frame in 0..3 {
        now += Duration::from_millis(16);
        let (elapsed, delta) = graph.update_at(now);
        assert!(elapsed >= delta);

        gl.tex_sub_image_2d(
            TextureTarget::Texture2d,
            0,
            frame * 8,
            0,
            8,
            8,
            PixelFormat::Red,
            PixelType::UnsignedByte,
            &[0xff; 64],
        )
        .unwrap();

        graph.render(&mut canvas, 5.0, 5.0);
    }
    assert!(canvas.draws > 0);

    // Shutdown: every created resource is deleted exactly once.
    gl.delete_texture(atlas).unwrap();
    gl.delete_buffer(vbo).unwrap();
    gl.delete_vertex_array(vao).unwrap();

    let deletes = gl
        .backend()
        .calls()
        .into_iter()
        .filter(|call| {
            matches!(
                call,
                RecordedCall::DeleteTextures { .. }
                    | RecordedCall::DeleteBuffers { .. }
                    | RecordedCall::DeleteVertexArrays { .. }
            )
        })
        .count();
    assert_eq!(deletes, 3);
}
