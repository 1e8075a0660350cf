//! Typed enums for native API parameters.
//!
//! The native API takes everything as a bare `GLenum`. These enums narrow
//! each parameter to the values that are actually meaningful for it, and
//! convert to the Khronos-assigned constants at the call boundary. The
//! numeric values are fixed by the OpenGL specification and identical across
//! drivers.

/// Kind of shader object to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ShaderKind {
    /// Vertex shader.
    Vertex = 0x8B31,
    /// Fragment shader.
    Fragment = 0x8B30,
}

/// Binding target for buffer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BufferTarget {
    /// Vertex attribute data (`GL_ARRAY_BUFFER`).
    Array = 0x8892,
    /// Index data (`GL_ELEMENT_ARRAY_BUFFER`).
    ElementArray = 0x8893,
}

/// Usage hint passed along with a buffer upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BufferUsageHint {
    /// Written once, drawn at most a few times.
    StreamDraw = 0x88E0,
    /// Written once, drawn many times.
    StaticDraw = 0x88E4,
    /// Rewritten repeatedly, drawn many times.
    DynamicDraw = 0x88E8,
}

/// Binding target for texture operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TextureTarget {
    /// Two-dimensional texture (`GL_TEXTURE_2D`).
    Texture2d = 0x0DE1,
}

/// Client pixel data layout for texture uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelFormat {
    /// Single-channel (`GL_RED`), e.g. font atlases.
    Red = 0x1903,
    /// Three-channel RGB.
    Rgb = 0x1907,
    /// Four-channel RGBA.
    Rgba = 0x1908,
}

/// Component type of client pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelType {
    /// One byte per component.
    UnsignedByte = 0x1401,
    /// One `f32` per component.
    Float = 0x1406,
}

/// Comparison function for the stencil test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CompareFunc {
    Never = 0x0200,
    Less = 0x0201,
    Equal = 0x0202,
    LessEqual = 0x0203,
    Greater = 0x0204,
    NotEqual = 0x0205,
    GreaterEqual = 0x0206,
    Always = 0x0207,
}

/// Integer parameters queryable on a shader object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ShaderParameter {
    /// Whether the last compile succeeded (`GL_COMPILE_STATUS`).
    CompileStatus = 0x8B81,
    /// Length of the info log including the terminating NUL.
    InfoLogLength = 0x8B84,
    /// The kind the shader was created as (`GL_SHADER_TYPE`).
    ShaderType = 0x8B4F,
}

/// Integer parameters queryable on a program object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ProgramParameter {
    /// Whether the last link succeeded (`GL_LINK_STATUS`).
    LinkStatus = 0x8B82,
    /// Whether the last validation succeeded (`GL_VALIDATE_STATUS`).
    ValidateStatus = 0x8B83,
    /// Length of the info log including the terminating NUL.
    InfoLogLength = 0x8B84,
}

macro_rules! gl_enum_conversion {
    ($($ty:ident),+ $(,)?) => {
        $(impl $ty {
            /// The Khronos-assigned `GLenum` value.
            pub(crate) const fn gl_enum(self) -> u32 {
                self as u32
            }
        })+
    };
}

gl_enum_conversion!(
    ShaderKind,
    BufferTarget,
    BufferUsageHint,
    TextureTarget,
    PixelFormat,
    PixelType,
    CompareFunc,
    ShaderParameter,
    ProgramParameter,
);
