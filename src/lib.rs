//! # glbridge
//!
//! A thin, typed interop layer between safe Rust and the OpenGL-family C
//! API, plus a frame-timing overlay widget as an example consumer.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`GlContext`] - Command facade translating slices, strings and typed
//!   enums into native calls, with caller-bug validation up front
//! - [`GlBackend`] - Trait for the raw native-call seam, with a real driver
//!   backend ([`NativeGl`]) and a recording test backend ([`DummyGl`])
//! - [`handle`] - Typed, zero-cost wrappers for driver resource IDs
//! - [`CStringBlock`] - Single-allocation NUL-terminated string marshalling
//! - [`PerfGraph`] - Fixed-size ring of frame times with a chart renderer
//!
//! ## Example
//!
//! ```ignore
//! use glbridge::{GlContext, NativeGl, ShaderKind};
//!
//! let gl = GlContext::new(NativeGl::load(|name| window.get_proc_address(name)));
//! let shader = gl.create_shader(ShaderKind::Fragment);
//! gl.shader_source(shader, FRAGMENT_SRC);
//! gl.compile_shader(shader);
//! assert!(gl.compile_status(shader), "{}", gl.shader_info_log(shader));
//! ```
//!
//! ## Threading
//!
//! The native API addresses whichever context is currently bound, and that
//! context belongs to exactly one thread. Everything here is synchronous and
//! single-threaded by contract; the application loop is the single ordering
//! authority for graphics calls.

pub mod backend;
pub mod context;
pub mod error;
pub mod handle;
pub mod marshal;
pub mod perf;
pub mod types;

pub use backend::GlBackend;
#[cfg(feature = "dummy")]
pub use backend::{DummyGl, RecordedCall};
#[cfg(feature = "native-gl")]
pub use backend::NativeGl;
pub use context::GlContext;
pub use error::GlError;
pub use handle::{AttribLocation, Buffer, Program, Shader, Texture, UniformLocation, VertexArray};
pub use marshal::CStringBlock;
pub use perf::{Canvas, Color, PerfGraph, TextAlign, GRAPH_HISTORY_COUNT};
pub use types::{
    BufferTarget, BufferUsageHint, CompareFunc, PixelFormat, PixelType, ProgramParameter,
    ShaderKind, ShaderParameter, TextureTarget,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the interop layer.
///
/// Only announces itself on the log; safe to call before any context exists.
pub fn init() {
    log::info!("glbridge v{VERSION} initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[cfg(feature = "dummy")]
    #[test]
    fn test_facade_over_dummy_backend() {
        let gl = GlContext::new(DummyGl::new());
        let buffer = gl.create_buffer();
        assert!(buffer.is_valid());
    }
}
