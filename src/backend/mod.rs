//! Native-call backends.
//!
//! This module defines the seam between the safe facade and the graphics
//! driver: the [`GlBackend`] trait enumerates exactly the native entry points
//! the facade issues, with the raw pointer and integer conventions of the C
//! API.
//!
//! # Available Backends
//!
//! - `dummy` (default): records calls instead of issuing them, for tests
//! - `native-gl`: forwards to the real driver through loaded function pointers
//!
//! # Safety
//!
//! Every trait method is `unsafe`: pointer arguments must be valid for the
//! access the corresponding native call performs, and the caller must be on
//! the one thread that owns the current native context. The facade
//! ([`GlContext`]) is the intended caller; it validates data before any
//! pointer crosses this boundary.
//!
//! [`GlContext`]: crate::context::GlContext

#[cfg(feature = "dummy")]
pub mod dummy;

#[cfg(feature = "native-gl")]
pub mod native;

#[cfg(feature = "dummy")]
pub use dummy::{DummyGl, RecordedCall};

#[cfg(feature = "native-gl")]
pub use native::NativeGl;

use std::os::raw::{c_char, c_void};

/// The raw native-call surface used by the facade.
///
/// Method shapes mirror the C entry points one-to-one so that a backend
/// implementation is a direct forward, never a reinterpretation. All state
/// touched by these calls lives in the driver's currently bound context;
/// none of it is visible to Rust.
pub trait GlBackend {
    // ------------------------------------------------------------------
    // Shaders and programs
    // ------------------------------------------------------------------

    /// `glCreateShader`
    unsafe fn create_shader(&self, kind: u32) -> u32;

    /// `glShaderSource`. `strings` points to `count` NUL-terminated strings;
    /// `lengths` may be null (strings are then read up to their terminators).
    unsafe fn shader_source(
        &self,
        shader: u32,
        count: i32,
        strings: *const *const c_char,
        lengths: *const i32,
    );

    /// `glCompileShader`
    unsafe fn compile_shader(&self, shader: u32);

    /// `glGetShaderiv`
    unsafe fn get_shader_iv(&self, shader: u32, pname: u32, params: *mut i32);

    /// `glGetShaderInfoLog`. Writes at most `buf_size` bytes including the
    /// terminating NUL; stores the number of bytes written (excluding the
    /// NUL) through `length` when it is non-null.
    unsafe fn get_shader_info_log(&self, shader: u32, buf_size: i32, length: *mut i32, log: *mut u8);

    /// `glDeleteShader`
    unsafe fn delete_shader(&self, shader: u32);

    /// `glCreateProgram`
    unsafe fn create_program(&self) -> u32;

    /// `glAttachShader`
    unsafe fn attach_shader(&self, program: u32, shader: u32);

    /// `glLinkProgram`
    unsafe fn link_program(&self, program: u32);

    /// `glGetProgramiv`
    unsafe fn get_program_iv(&self, program: u32, pname: u32, params: *mut i32);

    /// `glGetProgramInfoLog`. Same conventions as [`get_shader_info_log`].
    ///
    /// [`get_shader_info_log`]: Self::get_shader_info_log
    unsafe fn get_program_info_log(
        &self,
        program: u32,
        buf_size: i32,
        length: *mut i32,
        log: *mut u8,
    );

    /// `glDeleteProgram`
    unsafe fn delete_program(&self, program: u32);

    /// `glGetUniformLocation`. `name` must be NUL-terminated.
    unsafe fn get_uniform_location(&self, program: u32, name: *const c_char) -> i32;

    /// `glGetAttribLocation`. `name` must be NUL-terminated.
    unsafe fn get_attrib_location(&self, program: u32, name: *const c_char) -> i32;

    // ------------------------------------------------------------------
    // Uniform upload
    // ------------------------------------------------------------------

    /// `glUniform4fv`. `values` must address `count * 4` floats.
    unsafe fn uniform_4fv(&self, location: i32, count: i32, values: *const f32);

    /// `glUniform2fv`. `values` must address `count * 2` floats.
    unsafe fn uniform_2fv(&self, location: i32, count: i32, values: *const f32);

    // ------------------------------------------------------------------
    // Buffers
    // ------------------------------------------------------------------

    /// `glGenBuffers`
    unsafe fn gen_buffers(&self, n: i32, out: *mut u32);

    /// `glBufferData`. `data` must address `size` bytes.
    unsafe fn buffer_data(&self, target: u32, size: isize, data: *const c_void, usage: u32);

    /// `glDeleteBuffers`
    unsafe fn delete_buffers(&self, n: i32, ids: *const u32);

    // ------------------------------------------------------------------
    // Textures
    // ------------------------------------------------------------------

    /// `glGenTextures`
    unsafe fn gen_textures(&self, n: i32, out: *mut u32);

    /// `glBindTexture`
    unsafe fn bind_texture(&self, target: u32, texture: u32);

    /// `glTexImage2D`
    #[allow(clippy::too_many_arguments)]
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
    );

    /// `glTexSubImage2D`
    #[allow(clippy::too_many_arguments)]
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
    );

    /// `glDeleteTextures`
    unsafe fn delete_textures(&self, n: i32, ids: *const u32);

    // ------------------------------------------------------------------
    // Vertex arrays and fixed-function state
    // ------------------------------------------------------------------

    /// `glGenVertexArrays`
    unsafe fn gen_vertex_arrays(&self, n: i32, out: *mut u32);

    /// `glDeleteVertexArrays`
    unsafe fn delete_vertex_arrays(&self, n: i32, ids: *const u32);

    /// `glStencilFunc`
    unsafe fn stencil_func(&self, func: u32, reference: i32, mask: u32);
}
