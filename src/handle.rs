//! Typed wrappers around native resource identifiers.
//!
//! The native API hands out plain integers for every kind of resource, so a
//! buffer ID compiles fine where a texture ID is expected. These wrappers
//! exist purely to make that mix-up a type error. They carry no behavior
//! beyond a validity predicate and they never own the underlying GPU object;
//! the driver does.
//!
//! The driver reserves ID `0` to mean "no object", so a zero-valued handle is
//! the invalid/default state for every object kind. Shader variable locations
//! use a different convention: the lookup returns `-1` for "not found", and
//! `0` is a perfectly valid location, so [`UniformLocation`] and
//! [`AttribLocation`] wrap a signed value and treat non-negative as valid.

use static_assertions::assert_impl_all;

macro_rules! object_handle {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a native identifier.
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// The raw native identifier.
            pub const fn id(self) -> u32 {
                self.0
            }

            /// Whether the driver actually allocated this object.
            ///
            /// The zero value is the driver's "no object" sentinel; a handle
            /// is valid exactly when its identifier is non-zero.
            pub const fn is_valid(self) -> bool {
                self.0 != 0
            }
        }

        assert_impl_all!($name: Send, Sync, Copy);
    };
}

object_handle! {
    /// A compiled GLSL shader object.
    Shader
}

object_handle! {
    /// A linked shader program.
    Program
}

object_handle! {
    /// A buffer object (vertex, index, ...).
    Buffer
}

object_handle! {
    /// A texture object.
    Texture
}

object_handle! {
    /// A vertex array object.
    VertexArray
}

/// The location of a uniform variable within a linked program.
///
/// Locations are not object IDs: the native lookup returns `-1` when the
/// name does not resolve, and `0` is a valid location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(i32);

impl UniformLocation {
    /// Wrap a native location value.
    pub const fn new(location: i32) -> Self {
        Self(location)
    }

    /// The raw native location.
    pub const fn location(self) -> i32 {
        self.0
    }

    /// Whether the lookup resolved to an actual uniform.
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl Default for UniformLocation {
    fn default() -> Self {
        Self(-1)
    }
}

/// The location of a vertex attribute within a linked program.
///
/// Same convention as [`UniformLocation`]: `-1` means "not found" and `0`
/// is a valid attribute index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttribLocation(i32);

impl AttribLocation {
    /// Wrap a native location value.
    pub const fn new(location: i32) -> Self {
        Self(location)
    }

    /// The raw native location.
    pub const fn location(self) -> i32 {
        self.0
    }

    /// Whether the lookup resolved to an actual attribute.
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl Default for AttribLocation {
    fn default() -> Self {
        Self(-1)
    }
}

assert_impl_all!(UniformLocation: Send, Sync, Copy);
assert_impl_all!(AttribLocation: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(u32::MAX, true)]
    fn test_object_handle_validity(#[case] id: u32, #[case] valid: bool) {
        assert_eq!(Shader::new(id).is_valid(), valid);
        assert_eq!(Program::new(id).is_valid(), valid);
        assert_eq!(Buffer::new(id).is_valid(), valid);
        assert_eq!(Texture::new(id).is_valid(), valid);
        assert_eq!(VertexArray::new(id).is_valid(), valid);
    }

    #[rstest]
    #[case(-1, false)]
    #[case(0, true)]
    #[case(3, true)]
    fn test_location_validity(#[case] location: i32, #[case] valid: bool) {
        assert_eq!(UniformLocation::new(location).is_valid(), valid);
        assert_eq!(AttribLocation::new(location).is_valid(), valid);
    }

    #[test]
    fn test_defaults_are_invalid() {
        assert!(!Shader::default().is_valid());
        assert!(!Buffer::default().is_valid());
        assert!(!UniformLocation::default().is_valid());
        assert!(!AttribLocation::default().is_valid());
    }

    #[test]
    fn test_handle_roundtrip() {
        let buffer = Buffer::new(42);
        assert_eq!(buffer.id(), 42);
        assert_eq!(UniformLocation::new(7).location(), 7);
    }
}
