//! Real driver backend via loaded OpenGL function pointers.

use std::os::raw::{c_char, c_void};

use super::GlBackend;

/// Backend that forwards every call to the driver through the `gl` bindings.
///
/// The function pointers are process-global, loaded once from the
/// collaborator that owns the window and its context:
///
/// ```ignore
/// window.make_context_current();
/// let backend = NativeGl::load(|name| window.get_proc_address(name));
/// let gl = GlContext::new(backend);
/// ```
///
/// All calls address whichever native context is currently bound, and must
/// stay on the thread that owns it.
pub struct NativeGl {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl NativeGl {
    /// Load the driver's function pointers and return a backend.
    ///
    /// `loader` resolves an entry-point name to its address, typically the
    /// windowing library's `get_proc_address`. A native context must be
    /// current on this thread when the returned backend is used.
    pub fn load<F>(loader: F) -> Self
    where
        F: FnMut(&str) -> *const c_void,
    {
        gl::load_with(loader);
        log::info!("loaded native GL entry points");
        Self {
            _not_send: std::marker::PhantomData,
        }
    }
}

impl GlBackend for NativeGl {
    unsafe fn create_shader(&self, kind: u32) -> u32 {
        gl::CreateShader(kind)
    }

    unsafe fn shader_source(
        &self,
        shader: u32,
        count: i32,
        strings: *const *const c_char,
        lengths: *const i32,
    ) {
        gl::ShaderSource(shader, count, strings, lengths);
    }

    unsafe fn compile_shader(&self, shader: u32) {
        gl::CompileShader(shader);
    }

    unsafe fn get_shader_iv(&self, shader: u32, pname: u32, params: *mut i32) {
        gl::GetShaderiv(shader, pname, params);
    }

    unsafe fn get_shader_info_log(
        &self,
        shader: u32,
        buf_size: i32,
        length: *mut i32,
        log: *mut u8,
    ) {
        gl::GetShaderInfoLog(shader, buf_size, length, log.cast::<c_char>());
    }

    unsafe fn delete_shader(&self, shader: u32) {
        gl::DeleteShader(shader);
    }

    unsafe fn create_program(&self) -> u32 {
        gl::CreateProgram()
    }

    unsafe fn attach_shader(&self, program: u32, shader: u32) {
        gl::AttachShader(program, shader);
    }

    unsafe fn link_program(&self, program: u32) {
        gl::LinkProgram(program);
    }

    unsafe fn get_program_iv(&self, program: u32, pname: u32, params: *mut i32) {
        gl::GetProgramiv(program, pname, params);
    }

    unsafe fn get_program_info_log(
        &self,
        program: u32,
        buf_size: i32,
        length: *mut i32,
        log: *mut u8,
    ) {
        gl::GetProgramInfoLog(program, buf_size, length, log.cast::<c_char>());
    }

    unsafe fn delete_program(&self, program: u32) {
        gl::DeleteProgram(program);
    }

    unsafe fn get_uniform_location(&self, program: u32, name: *const c_char) -> i32 {
        gl::GetUniformLocation(program, name)
    }

    unsafe fn get_attrib_location(&self, program: u32, name: *const c_char) -> i32 {
        gl::GetAttribLocation(program, name)
    }

    unsafe fn uniform_4fv(&self, location: i32, count: i32, values: *const f32) {
        gl::Uniform4fv(location, count, values);
    }

    unsafe fn uniform_2fv(&self, location: i32, count: i32, values: *const f32) {
        gl::Uniform2fv(location, count, values);
    }

    unsafe fn gen_buffers(&self, n: i32, out: *mut u32) {
        gl::GenBuffers(n, out);
    }

    unsafe fn buffer_data(&self, target: u32, size: isize, data: *const c_void, usage: u32) {
        gl::BufferData(target, size, data, usage);
    }

    unsafe fn delete_buffers(&self, n: i32, ids: *const u32) {
        gl::DeleteBuffers(n, ids);
    }

    unsafe fn gen_textures(&self, n: i32, out: *mut u32) {
        gl::GenTextures(n, out);
    }

    unsafe fn bind_texture(&self, target: u32, texture: u32) {
        gl::BindTexture(target, texture);
    }

    unsafe fn tex_image_2d(
        &self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        border: i32,
        format: u32,
        ty: u32,
        data: *const c_void,
    ) {
        gl::TexImage2D(
            target,
            level,
            internal_format,
            width,
            height,
            border,
            format,
            ty,
            data,
        );
    }

    unsafe fn tex_sub_image_2d(
        &self,
        target: u32,
        level: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        data: *const c_void,
    ) {
        gl::TexSubImage2D(target, level, x, y, width, height, format, ty, data);
    }

    unsafe fn delete_textures(&self, n: i32, ids: *const u32) {
        gl::DeleteTextures(n, ids);
    }

    unsafe fn gen_vertex_arrays(&self, n: i32, out: *mut u32) {
        gl::GenVertexArrays(n, out);
    }

    unsafe fn delete_vertex_arrays(&self, n: i32, ids: *const u32) {
        gl::DeleteVertexArrays(n, ids);
    }

    unsafe fn stencil_func(&self, func: u32, reference: i32, mask: u32) {
        gl::StencilFunc(func, reference, mask);
    }
}
