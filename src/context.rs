//! The command facade: safe, typed translation onto a [`GlBackend`].
//!
//! Every operation is a direct, allocation-minimal translation into one
//! native call (or a short fixed sequence). Validation happens on this side
//! of the boundary: data that would make the driver read out of bounds
//! (empty uploads, uniform slices with a bad stride, handles that were never
//! allocated) is rejected with [`GlError`] before any pointer is formed.
//!
//! Driver-reported compile/link failures are not errors here; they come back
//! as a status flag plus a log string, and the caller decides what to do.
//!
//! # Threading
//!
//! All calls mutate the driver's currently bound context, which is owned by
//! exactly one thread. A `GlContext` must live on that thread, and the
//! application must serialize all graphics work onto it; nothing in this
//! layer suspends, retries, or times out.

use std::os::raw::c_void;
use std::ptr;

use bytemuck::Pod;

use crate::backend::GlBackend;
use crate::error::GlError;
use crate::handle::{AttribLocation, Buffer, Program, Shader, Texture, UniformLocation, VertexArray};
use crate::marshal::CStringBlock;
use crate::types::{
    BufferTarget, BufferUsageHint, CompareFunc, PixelFormat, PixelType, ProgramParameter,
    ShaderKind, ShaderParameter, TextureTarget,
};

/// A graphics context bound to one backend.
///
/// The backend is passed in explicitly and every operation goes through
/// `&self`, so the dependency on driver state is visible in the API even
/// though the driver itself still works against its implicitly bound
/// context.
///
/// ```ignore
/// let gl = GlContext::new(NativeGl::load(|name| window.get_proc_address(name)));
/// let shader = gl.create_shader(ShaderKind::Vertex);
/// gl.shader_source(shader, VERTEX_SRC);
/// gl.compile_shader(shader);
/// if !gl.compile_status(shader) {
///     log::error!("vertex shader: {}", gl.shader_info_log(shader));
/// }
/// ```
pub struct GlContext<B: GlBackend> {
    backend: B,
}

impl<B: GlBackend> GlContext<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ------------------------------------------------------------------
    // Shaders
    // ------------------------------------------------------------------

    /// Ask the driver for a new shader object of the given kind.
    ///
    /// Check [`Shader::is_valid`] on the result; a zero ID means the driver
    /// refused, and passing it onward is undefined behavior at the driver
    /// level.
    pub fn create_shader(&self, kind: ShaderKind) -> Shader {
        let id = unsafe { self.backend.create_shader(kind.gl_enum()) };
        Shader::new(id)
    }

    /// Upload GLSL source text to a shader object.
    ///
    /// The source is copied into a NUL-terminated native buffer for the
    /// duration of the call; the driver copies it internally, so the buffer
    /// is released as soon as the call returns.
    ///
    /// # Panics
    ///
    /// Panics if `src` contains an interior NUL byte (see [`CStringBlock`]).
    pub fn shader_source(&self, shader: Shader, src: &str) {
        let block = CStringBlock::from_str(src);
        unsafe {
            self.backend
                .shader_source(shader.id(), 1, block.as_ptr(), ptr::null());
        }
        // block drops here, after the driver has copied the source
    }

    /// Compile the shader's current source.
    ///
    /// Compilation failure is not an error of this call; query it with
    /// [`compile_status`] and [`shader_info_log`].
    ///
    /// [`compile_status`]: Self::compile_status
    /// [`shader_info_log`]: Self::shader_info_log
    pub fn compile_shader(&self, shader: Shader) {
        unsafe { self.backend.compile_shader(shader.id()) };
    }

    /// Query an integer parameter on a shader object.
    pub fn shader_parameter(&self, shader: Shader, pname: ShaderParameter) -> i32 {
        let mut value = 0;
        unsafe {
            self.backend
                .get_shader_iv(shader.id(), pname.gl_enum(), &mut value);
        }
        value
    }

    /// Whether the last compile of `shader` succeeded.
    pub fn compile_status(&self, shader: Shader) -> bool {
        self.shader_parameter(shader, ShaderParameter::CompileStatus) != 0
    }

    /// The shader's info log, or an empty string if there is none.
    ///
    /// Two-step protocol: the log length is queried first, and when it is
    /// zero no fetch call is issued at all. Handing the driver a zero-length
    /// destination buffer is undefined on some implementations.
    pub fn shader_info_log(&self, shader: Shader) -> String {
        let len = self.shader_parameter(shader, ShaderParameter::InfoLogLength);
        if len <= 0 {
            return String::new();
        }
        let mut buf = vec![0u8; len as usize];
        let mut written = 0;
        unsafe {
            self.backend
                .get_shader_info_log(shader.id(), len, &mut written, buf.as_mut_ptr());
        }
        buf.truncate(written.clamp(0, len) as usize);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Delete a shader object.
    ///
    /// Deleting a handle that was never allocated is a caller bug: it is
    /// rejected here rather than forwarded, since the driver does not check.
    pub fn delete_shader(&self, shader: Shader) -> Result<(), GlError> {
        if !shader.is_valid() {
            return Err(GlError::InvalidHandle(
                "delete_shader: shader was never allocated".to_string(),
            ));
        }
        unsafe { self.backend.delete_shader(shader.id()) };
        Ok(())
    }

    // ------------------------------------------------------------------
    // Programs
    // ------------------------------------------------------------------

    /// Ask the driver for a new program object.
    pub fn create_program(&self) -> Program {
        let id = unsafe { self.backend.create_program() };
        Program::new(id)
    }

    /// Attach a compiled shader to a program.
    pub fn attach_shader(&self, program: Program, shader: Shader) {
        unsafe { self.backend.attach_shader(program.id(), shader.id()) };
    }

    /// Link the program from its attached shaders.
    ///
    /// Link failure is reported by [`link_status`] and
    /// [`program_info_log`], not by this call.
    ///
    /// [`link_status`]: Self::link_status
    /// [`program_info_log`]: Self::program_info_log
    pub fn link_program(&self, program: Program) {
        unsafe { self.backend.link_program(program.id()) };
    }

    /// Query an integer parameter on a program object.
    pub fn program_parameter(&self, program: Program, pname: ProgramParameter) -> i32 {
        let mut value = 0;
        unsafe {
            self.backend
                .get_program_iv(program.id(), pname.gl_enum(), &mut value);
        }
        value
    }

    /// Whether the last link of `program` succeeded.
    pub fn link_status(&self, program: Program) -> bool {
        self.program_parameter(program, ProgramParameter::LinkStatus) != 0
    }

    /// The program's info log, or an empty string if there is none.
    ///
    /// Same length-then-fetch protocol as [`shader_info_log`].
    ///
    /// [`shader_info_log`]: Self::shader_info_log
    pub fn program_info_log(&self, program: Program) -> String {
        let len = self.program_parameter(program, ProgramParameter::InfoLogLength);
        if len <= 0 {
            return String::new();
        }
        let mut buf = vec![0u8; len as usize];
        let mut written = 0;
        unsafe {
            self.backend
                .get_program_info_log(program.id(), len, &mut written, buf.as_mut_ptr());
        }
        buf.truncate(written.clamp(0, len) as usize);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Delete a program object. Same precondition as [`delete_shader`].
    ///
    /// [`delete_shader`]: Self::delete_shader
    pub fn delete_program(&self, program: Program) -> Result<(), GlError> {
        if !program.is_valid() {
            return Err(GlError::InvalidHandle(
                "delete_program: program was never allocated".to_string(),
            ));
        }
        unsafe { self.backend.delete_program(program.id()) };
        Ok(())
    }

    /// Look up a uniform variable by name.
    ///
    /// Returns an invalid location (`-1`) when the name does not resolve;
    /// check [`UniformLocation::is_valid`].
    pub fn uniform_location(&self, program: Program, name: &str) -> UniformLocation {
        let block = CStringBlock::from_str(name);
        let location = unsafe {
            self.backend
                .get_uniform_location(program.id(), block.string_ptr(0))
        };
        UniformLocation::new(location)
    }

    /// Look up a vertex attribute by name.
    pub fn attrib_location(&self, program: Program, name: &str) -> AttribLocation {
        let block = CStringBlock::from_str(name);
        let location = unsafe {
            self.backend
                .get_attrib_location(program.id(), block.string_ptr(0))
        };
        AttribLocation::new(location)
    }

    // ------------------------------------------------------------------
    // Uniform upload
    // ------------------------------------------------------------------

    /// Upload one or more `vec4` uniform values from a flat slice.
    ///
    /// The count is inferred as `values.len() / 4`. A slice that is empty or
    /// not a multiple of four would make the driver read out of bounds, so
    /// it is rejected here.
    pub fn uniform4fv(&self, location: UniformLocation, values: &[f32]) -> Result<(), GlError> {
        let count = Self::uniform_count(values, 4, "uniform4fv")?;
        unsafe {
            self.backend
                .uniform_4fv(location.location(), count, values.as_ptr());
        }
        Ok(())
    }

    /// Upload one or more `vec2` uniform values from a flat slice.
    ///
    /// Same contract as [`uniform4fv`] with a component width of two.
    ///
    /// [`uniform4fv`]: Self::uniform4fv
    pub fn uniform2fv(&self, location: UniformLocation, values: &[f32]) -> Result<(), GlError> {
        let count = Self::uniform_count(values, 2, "uniform2fv")?;
        unsafe {
            self.backend
                .uniform_2fv(location.location(), count, values.as_ptr());
        }
        Ok(())
    }

    fn uniform_count(values: &[f32], width: usize, op: &str) -> Result<i32, GlError> {
        if values.is_empty() || values.len() % width != 0 {
            return Err(GlError::InvalidParameter(format!(
                "{op}: slice length {} is not a positive multiple of {width}",
                values.len()
            )));
        }
        Ok((values.len() / width) as i32)
    }

    // ------------------------------------------------------------------
    // Buffers
    // ------------------------------------------------------------------

    /// Ask the driver for one new buffer object.
    pub fn create_buffer(&self) -> Buffer {
        let mut id = 0;
        unsafe { self.backend.gen_buffers(1, &mut id) };
        Buffer::new(id)
    }

    /// Upload data to the buffer currently bound at `target`.
    ///
    /// Accepts any plain-old-data slice and forwards its byte length and a
    /// pointer to its first element. An empty slice is a caller bug: the
    /// driver would be told to allocate nothing, or worse, and is never
    /// called.
    pub fn buffer_data<T: Pod>(
        &self,
        target: BufferTarget,
        data: &[T],
        usage: BufferUsageHint,
    ) -> Result<(), GlError> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        if bytes.is_empty() {
            return Err(GlError::InvalidParameter(
                "buffer_data: empty upload".to_string(),
            ));
        }
        unsafe {
            self.backend.buffer_data(
                target.gl_enum(),
                bytes.len() as isize,
                bytes.as_ptr().cast::<c_void>(),
                usage.gl_enum(),
            );
        }
        Ok(())
    }

    /// Delete a buffer object. Same precondition as [`delete_shader`].
    ///
    /// [`delete_shader`]: Self::delete_shader
    pub fn delete_buffer(&self, buffer: Buffer) -> Result<(), GlError> {
        if !buffer.is_valid() {
            return Err(GlError::InvalidHandle(
                "delete_buffer: buffer was never allocated".to_string(),
            ));
        }
        let id = buffer.id();
        unsafe { self.backend.delete_buffers(1, &id) };
        Ok(())
    }

    // ------------------------------------------------------------------
    // Textures
    // ------------------------------------------------------------------

    /// Ask the driver for one new texture object.
    pub fn create_texture(&self) -> Texture {
        let mut id = 0;
        unsafe { self.backend.gen_textures(1, &mut id) };
        Texture::new(id)
    }

    /// Bind a texture to a target on the current context.
    pub fn bind_texture(&self, target: TextureTarget, texture: Texture) {
        unsafe { self.backend.bind_texture(target.gl_enum(), texture.id()) };
    }

    /// Upload a full texture image to the texture bound at `target`.
    ///
    /// `data` must be non-empty; an empty upload is rejected before the
    /// driver is called.
    #[allow(clippy::too_many_arguments)]
    pub fn tex_image_2d(
        &self,
        target: TextureTarget,
        level: i32,
        width: i32,
        height: i32,
        format: PixelFormat,
        ty: PixelType,
        data: &[u8],
    ) -> Result<(), GlError> {
        if data.is_empty() {
            return Err(GlError::InvalidParameter(
                "tex_image_2d: empty upload".to_string(),
            ));
        }
        unsafe {
            self.backend.tex_image_2d(
                target.gl_enum(),
                level,
                format.gl_enum() as i32,
                width,
                height,
                0,
                format.gl_enum(),
                ty.gl_enum(),
                data.as_ptr().cast::<c_void>(),
            );
        }
        Ok(())
    }

    /// Upload a sub-rectangle of the texture bound at `target`.
    ///
    /// Same empty-data precondition as [`tex_image_2d`].
    ///
    /// [`tex_image_2d`]: Self::tex_image_2d
    #[allow(clippy::too_many_arguments)]
    pub fn tex_sub_image_2d(
        &self,
        target: TextureTarget,
        level: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        format: PixelFormat,
        ty: PixelType,
        data: &[u8],
    ) -> Result<(), GlError> {
        if data.is_empty() {
            return Err(GlError::InvalidParameter(
                "tex_sub_image_2d: empty upload".to_string(),
            ));
        }
        unsafe {
            self.backend.tex_sub_image_2d(
                target.gl_enum(),
                level,
                x,
                y,
                width,
                height,
                format.gl_enum(),
                ty.gl_enum(),
                data.as_ptr().cast::<c_void>(),
            );
        }
        Ok(())
    }

    /// Delete a texture object. Same precondition as [`delete_shader`].
    ///
    /// [`delete_shader`]: Self::delete_shader
    pub fn delete_texture(&self, texture: Texture) -> Result<(), GlError> {
        if !texture.is_valid() {
            return Err(GlError::InvalidHandle(
                "delete_texture: texture was never allocated".to_string(),
            ));
        }
        let id = texture.id();
        unsafe { self.backend.delete_textures(1, &id) };
        Ok(())
    }

    // ------------------------------------------------------------------
    // Vertex arrays and fixed-function state
    // ------------------------------------------------------------------

    /// Ask the driver for one new vertex array object.
    pub fn create_vertex_array(&self) -> VertexArray {
        let mut id = 0;
        unsafe { self.backend.gen_vertex_arrays(1, &mut id) };
        VertexArray::new(id)
    }

    /// Delete a vertex array object. Same precondition as [`delete_shader`].
    ///
    /// [`delete_shader`]: Self::delete_shader
    pub fn delete_vertex_array(&self, vao: VertexArray) -> Result<(), GlError> {
        if !vao.is_valid() {
            return Err(GlError::InvalidHandle(
                "delete_vertex_array: vertex array was never allocated".to_string(),
            ));
        }
        let id = vao.id();
        unsafe { self.backend.delete_vertex_arrays(1, &id) };
        Ok(())
    }

    /// Set the stencil test function on the current context.
    pub fn stencil_func(&self, func: CompareFunc, reference: i32, mask: u32) {
        unsafe { self.backend.stencil_func(func.gl_enum(), reference, mask) };
    }
}
