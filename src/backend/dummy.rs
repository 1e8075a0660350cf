//! Recording no-op backend for tests.
//!
//! `DummyGl` never touches a driver. It records every call it receives,
//! copying pointer arguments into owned data so tests can assert on exactly
//! what would have crossed the native boundary, and synthesizes plausible
//! replies for the query calls (monotonic IDs, configurable status values
//! and info logs).

use std::cell::{Cell, RefCell};
use std::ffi::CStr;
use std::os::raw::{c_char, c_void};

use super::GlBackend;

/// One recorded native call, with pointer arguments copied into owned data.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    CreateShader {
        kind: u32,
    },
    ShaderSource {
        shader: u32,
        count: i32,
        sources: Vec<String>,
    },
    CompileShader {
        shader: u32,
    },
    GetShaderIv {
        shader: u32,
        pname: u32,
    },
    GetShaderInfoLog {
        shader: u32,
        buf_size: i32,
    },
    DeleteShader {
        shader: u32,
    },
    CreateProgram,
    AttachShader {
        program: u32,
        shader: u32,
    },
    LinkProgram {
        program: u32,
    },
    GetProgramIv {
        program: u32,
        pname: u32,
    },
    GetProgramInfoLog {
        program: u32,
        buf_size: i32,
    },
    DeleteProgram {
        program: u32,
    },
    GetUniformLocation {
        program: u32,
        name: String,
    },
    GetAttribLocation {
        program: u32,
        name: String,
    },
    Uniform4fv {
        location: i32,
        count: i32,
        values: Vec<f32>,
    },
    Uniform2fv {
        location: i32,
        count: i32,
        values: Vec<f32>,
    },
    GenBuffers {
        n: i32,
    },
    BufferData {
        target: u32,
        bytes: Vec<u8>,
        usage: u32,
    },
    DeleteBuffers {
        ids: Vec<u32>,
    },
    GenTextures {
        n: i32,
    },
    BindTexture {
        target: u32,
        texture: u32,
    },
    TexImage2d {
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        has_data: bool,
    },
    TexSubImage2d {
        target: u32,
        level: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        byte_len: usize,
    },
    DeleteTextures {
        ids: Vec<u32>,
    },
    GenVertexArrays {
        n: i32,
    },
    DeleteVertexArrays {
        ids: Vec<u32>,
    },
    StencilFunc {
        func: u32,
        reference: i32,
        mask: u32,
    },
}

/// Backend that records calls instead of issuing them.
///
/// IDs handed out by the gen/create calls start at 1 and count up, so every
/// returned handle is valid. Query replies default to success with an empty
/// info log; tests override them with the `set_*` methods.
///
/// Interior mutability is `Cell`/`RefCell`, so the type is single-threaded
/// like the context it stands in for.
pub struct DummyGl {
    calls: RefCell<Vec<RecordedCall>>,
    next_id: Cell<u32>,
    compile_status: Cell<i32>,
    link_status: Cell<i32>,
    shader_log: RefCell<String>,
    program_log: RefCell<String>,
    uniform_location: Cell<i32>,
    attrib_location: Cell<i32>,
}

impl DummyGl {
    /// Create a recording backend that reports success for every query.
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            compile_status: Cell::new(1),
            link_status: Cell::new(1),
            shader_log: RefCell::new(String::new()),
            program_log: RefCell::new(String::new()),
            uniform_location: Cell::new(0),
            attrib_location: Cell::new(0),
        }
    }

    /// All calls recorded so far, in issue order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Number of calls recorded so far.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Set the value reported for `GL_COMPILE_STATUS` queries.
    pub fn set_compile_status(&self, ok: bool) {
        self.compile_status.set(ok as i32);
    }

    /// Set the value reported for `GL_LINK_STATUS` queries.
    pub fn set_link_status(&self, ok: bool) {
        self.link_status.set(ok as i32);
    }

    /// Set the shader info log returned by subsequent fetches.
    pub fn set_shader_info_log(&self, log: &str) {
        *self.shader_log.borrow_mut() = log.to_owned();
    }

    /// Set the program info log returned by subsequent fetches.
    pub fn set_program_info_log(&self, log: &str) {
        *self.program_log.borrow_mut() = log.to_owned();
    }

    /// Set the value returned by uniform-location lookups.
    pub fn set_uniform_location(&self, location: i32) {
        self.uniform_location.set(location);
    }

    /// Set the value returned by attribute-location lookups.
    pub fn set_attrib_location(&self, location: i32) {
        self.attrib_location.set(location);
    }

    fn record(&self, call: RecordedCall) {
        self.calls.borrow_mut().push(call);
    }

    fn alloc_id(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn alloc_ids(&self, n: i32, out: *mut u32) {
        for i in 0..n as usize {
            unsafe { *out.add(i) = self.alloc_id() };
        }
    }

    /// Write `log` into a caller buffer with `glGetShaderInfoLog` semantics:
    /// at most `buf_size` bytes including the NUL, written length excludes it.
    fn write_log(log: &str, buf_size: i32, length: *mut i32, out: *mut u8) {
        if buf_size <= 0 || out.is_null() {
            if !length.is_null() {
                unsafe { *length = 0 };
            }
            return;
        }
        let n = log.len().min(buf_size as usize - 1);
        unsafe {
            std::ptr::copy_nonoverlapping(log.as_ptr(), out, n);
            *out.add(n) = 0;
            if !length.is_null() {
                *length = n as i32;
            }
        }
    }
}

impl Default for DummyGl {
    fn default() -> Self {
        Self::new()
    }
}

impl GlBackend for DummyGl {
    unsafe fn create_shader(&self, kind: u32) -> u32 {
        self.record(RecordedCall::CreateShader { kind });
        self.alloc_id()
    }

    unsafe fn shader_source(
        &self,
        shader: u32,
        count: i32,
        strings: *const *const c_char,
        _lengths: *const i32,
    ) {
        let sources = (0..count as usize)
            .map(|i| {
                CStr::from_ptr(*strings.add(i))
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        self.record(RecordedCall::ShaderSource {
            shader,
            count,
            sources,
        });
    }

    unsafe fn compile_shader(&self, shader: u32) {
        self.record(RecordedCall::CompileShader { shader });
    }

    unsafe fn get_shader_iv(&self, shader: u32, pname: u32, params: *mut i32) {
        self.record(RecordedCall::GetShaderIv { shader, pname });
        let value = match pname {
            0x8B81 => self.compile_status.get(),
            0x8B84 => {
                let log = self.shader_log.borrow();
                if log.is_empty() {
                    0
                } else {
                    log.len() as i32 + 1
                }
            }
            _ => 0,
        };
        *params = value;
    }

    unsafe fn get_shader_info_log(
        &self,
        shader: u32,
        buf_size: i32,
        length: *mut i32,
        log: *mut u8,
    ) {
        self.record(RecordedCall::GetShaderInfoLog { shader, buf_size });
        Self::write_log(&self.shader_log.borrow(), buf_size, length, log);
    }

    unsafe fn delete_shader(&self, shader: u32) {
        self.record(RecordedCall::DeleteShader { shader });
    }

    unsafe fn create_program(&self) -> u32 {
        self.record(RecordedCall::CreateProgram);
        self.alloc_id()
    }

    unsafe fn attach_shader(&self, program: u32, shader: u32) {
        self.record(RecordedCall::AttachShader { program, shader });
    }

    unsafe fn link_program(&self, program: u32) {
        self.record(RecordedCall::LinkProgram { program });
    }

    unsafe fn get_program_iv(&self, program: u32, pname: u32, params: *mut i32) {
        self.record(RecordedCall::GetProgramIv { program, pname });
        let value = match pname {
            0x8B82 => self.link_status.get(),
            0x8B84 => {
                let log = self.program_log.borrow();
                if log.is_empty() {
                    0
                } else {
                    log.len() as i32 + 1
                }
            }
            _ => 0,
        };
        *params = value;
    }

    unsafe fn get_program_info_log(
        &self,
        program: u32,
        buf_size: i32,
        length: *mut i32,
        log: *mut u8,
    ) {
        self.record(RecordedCall::GetProgramInfoLog { program, buf_size });
        Self::write_log(&self.program_log.borrow(), buf_size, length, log);
    }

    unsafe fn delete_program(&self, program: u32) {
        self.record(RecordedCall::DeleteProgram { program });
    }

    unsafe fn get_uniform_location(&self, program: u32, name: *const c_char) -> i32 {
        self.record(RecordedCall::GetUniformLocation {
            program,
            name: CStr::from_ptr(name).to_string_lossy().into_owned(),
        });
        self.uniform_location.get()
    }

    unsafe fn get_attrib_location(&self, program: u32, name: *const c_char) -> i32 {
        self.record(RecordedCall::GetAttribLocation {
            program,
            name: CStr::from_ptr(name).to_string_lossy().into_owned(),
        });
        self.attrib_location.get()
    }

    unsafe fn uniform_4fv(&self, location: i32, count: i32, values: *const f32) {
        let values = std::slice::from_raw_parts(values, count as usize * 4).to_vec();
        self.record(RecordedCall::Uniform4fv {
            location,
            count,
            values,
        });
    }

    unsafe fn uniform_2fv(&self, location: i32, count: i32, values: *const f32) {
        let values = std::slice::from_raw_parts(values, count as usize * 2).to_vec();
        self.record(RecordedCall::Uniform2fv {
            location,
            count,
            values,
        });
    }

    unsafe fn gen_buffers(&self, n: i32, out: *mut u32) {
        self.record(RecordedCall::GenBuffers { n });
        self.alloc_ids(n, out);
    }

    unsafe fn buffer_data(&self, target: u32, size: isize, data: *const c_void, usage: u32) {
        let bytes = std::slice::from_raw_parts(data.cast::<u8>(), size as usize).to_vec();
        self.record(RecordedCall::BufferData {
            target,
            bytes,
            usage,
        });
    }

    unsafe fn delete_buffers(&self, n: i32, ids: *const u32) {
        let ids = std::slice::from_raw_parts(ids, n as usize).to_vec();
        self.record(RecordedCall::DeleteBuffers { ids });
    }

    unsafe fn gen_textures(&self, n: i32, out: *mut u32) {
        self.record(RecordedCall::GenTextures { n });
        self.alloc_ids(n, out);
    }

    unsafe fn bind_texture(&self, target: u32, texture: u32) {
        self.record(RecordedCall::BindTexture { target, texture });
    }

    unsafe fn tex_image_2d(
        &self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        _border: i32,
        format: u32,
        ty: u32,
        data: *const c_void,
    ) {
        self.record(RecordedCall::TexImage2d {
            target,
            level,
            internal_format,
            width,
            height,
            format,
            ty,
            has_data: !data.is_null(),
        });
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
        // Sub-uploads are tightly packed client memory in this layer.
        let byte_len = if data.is_null() {
            0
        } else {
            (width * height).max(0) as usize
        };
        self.record(RecordedCall::TexSubImage2d {
            target,
            level,
            x,
            y,
            width,
            height,
            format,
            ty,
            byte_len,
        });
    }

    unsafe fn delete_textures(&self, n: i32, ids: *const u32) {
        let ids = std::slice::from_raw_parts(ids, n as usize).to_vec();
        self.record(RecordedCall::DeleteTextures { ids });
    }

    unsafe fn gen_vertex_arrays(&self, n: i32, out: *mut u32) {
        self.record(RecordedCall::GenVertexArrays { n });
        self.alloc_ids(n, out);
    }

    unsafe fn delete_vertex_arrays(&self, n: i32, ids: *const u32) {
        let ids = std::slice::from_raw_parts(ids, n as usize).to_vec();
        self.record(RecordedCall::DeleteVertexArrays { ids });
    }

    unsafe fn stencil_func(&self, func: u32, reference: i32, mask: u32) {
        self.record(RecordedCall::StencilFunc {
            func,
            reference,
            mask,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one() {
        let backend = DummyGl::new();
        let mut ids = [0u32; 3];
        unsafe { backend.gen_buffers(3, ids.as_mut_ptr()) };
        assert_eq!(ids, [1, 2, 3]);
        let shader = unsafe { backend.create_shader(0x8B31) };
        assert_eq!(shader, 4);
    }

    #[test]
    fn test_info_log_write_semantics() {
        let backend = DummyGl::new();
        backend.set_shader_info_log("syntax error");

        let mut pname_out = 0i32;
        unsafe { backend.get_shader_iv(1, 0x8B84, &mut pname_out) };
        assert_eq!(pname_out, 13); // log length plus terminator

        let mut buf = [0xffu8; 13];
        let mut written = 0i32;
        unsafe { backend.get_shader_info_log(1, 13, &mut written, buf.as_mut_ptr()) };
        assert_eq!(written, 12);
        assert_eq!(&buf[..12], b"syntax error");
        assert_eq!(buf[12], 0);
    }

    #[test]
    fn test_recorded_call_order() {
        let backend = DummyGl::new();
        unsafe {
            backend.bind_texture(0x0DE1, 5);
            backend.stencil_func(0x0207, 0, 0xff);
        }
        assert_eq!(
            backend.calls(),
            vec![
                RecordedCall::BindTexture {
                    target: 0x0DE1,
                    texture: 5
                },
                RecordedCall::StencilFunc {
                    func: 0x0207,
                    reference: 0,
                    mask: 0xff
                },
            ]
        );
    }
}
