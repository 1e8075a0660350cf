//! Native string marshalling.
//!
//! The native API expects text as NUL-terminated C strings, and the
//! multi-string entry points (`glShaderSource`-shaped calls) expect an array
//! of pointers to them. [`CStringBlock`] copies any number of Rust strings
//! into one contiguous heap allocation, each followed by a NUL terminator,
//! and keeps an array of pointers into that allocation ready to hand to the
//! driver.
//!
//! Release is scoped: dropping the block frees the allocation exactly once,
//! on every exit path. The driver copies string arguments during the call it
//! receives them in, so the block never needs to outlive the call it was
//! built for.
//!
//! ```ignore
//! let block = CStringBlock::from_str(source);
//! unsafe { backend.shader_source(shader.id(), 1, block.as_ptr(), ptr::null()) };
//! // block drops here, allocation freed
//! ```

use std::os::raw::c_char;

/// One or more NUL-terminated C strings in a single contiguous allocation.
///
/// The pointers returned by [`as_ptr`] and [`string_ptr`] are valid only
/// while the block is alive; the borrow checker enforces that for safe
/// callers, but code that stashes the raw pointers must not let them outlive
/// the block.
///
/// Holds raw pointers into its own storage, so the type is neither `Send`
/// nor `Sync`. That matches the single-threaded contract of the native
/// context the pointers are destined for.
///
/// [`as_ptr`]: Self::as_ptr
/// [`string_ptr`]: Self::string_ptr
pub struct CStringBlock {
    // Boxed so the byte storage never moves while the struct itself does.
    data: Box<[u8]>,
    pointers: Box<[*const c_char]>,
}

impl CStringBlock {
    /// Copy `strings` into a single NUL-terminated block.
    ///
    /// # Panics
    ///
    /// Panics if `strings` is empty or if any string contains an interior
    /// NUL byte. Both are caller bugs: the native call this block feeds
    /// would read garbage, so fail fast instead.
    pub fn new(strings: &[&str]) -> Self {
        assert!(
            !strings.is_empty(),
            "CStringBlock::new: expected at least one string"
        );

        let total: usize = strings.iter().map(|s| s.len() + 1).sum();
        // Zero-filled, so every terminator slot is already NUL.
        let mut data = vec![0u8; total].into_boxed_slice();
        let mut pointers = Vec::with_capacity(strings.len());

        let mut offset = 0;
        for (i, s) in strings.iter().enumerate() {
            assert!(
                !s.as_bytes().contains(&0),
                "CStringBlock::new: string {i} contains an interior NUL byte"
            );
            data[offset..offset + s.len()].copy_from_slice(s.as_bytes());
            pointers.push(data[offset..].as_ptr() as *const c_char);
            offset += s.len() + 1;
        }

        Self {
            data,
            pointers: pointers.into_boxed_slice(),
        }
    }

    /// Marshal a single string.
    pub fn from_str(s: &str) -> Self {
        Self::new(&[s])
    }

    /// Number of strings in the block. Always at least one.
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    /// Always `false`; a block cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Total size of the backing allocation in bytes, terminators included.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Pointer array in the shape `glShaderSource` expects.
    pub fn as_ptr(&self) -> *const *const c_char {
        self.pointers.as_ptr()
    }

    /// Pointer to the `index`-th NUL-terminated string.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn string_ptr(&self, index: usize) -> *const c_char {
        self.pointers[index]
    }
}

impl std::fmt::Debug for CStringBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CStringBlock")
            .field("strings", &self.pointers.len())
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    fn read_back(block: &CStringBlock, index: usize) -> String {
        unsafe { CStr::from_ptr(block.string_ptr(index)) }
            .to_str()
            .unwrap()
            .to_owned()
    }

    #[test]
    fn test_single_string() {
        let block = CStringBlock::from_str("void main() {}");
        assert_eq!(block.len(), 1);
        assert!(!block.is_empty());
        assert_eq!(read_back(&block, 0), "void main() {}");
        // One byte per input byte plus the terminator.
        assert_eq!(block.byte_len(), 15);
    }

    #[test]
    fn test_multiple_strings_share_one_allocation() {
        let block = CStringBlock::new(&["alpha", "b", "gamma"]);
        assert_eq!(block.len(), 3);
        assert_eq!(read_back(&block, 0), "alpha");
        assert_eq!(read_back(&block, 1), "b");
        assert_eq!(read_back(&block, 2), "gamma");
        assert_eq!(block.byte_len(), 6 + 2 + 6);

        // All pointers address the same contiguous block, in order.
        let base = block.string_ptr(0) as usize;
        assert_eq!(block.string_ptr(1) as usize, base + 6);
        assert_eq!(block.string_ptr(2) as usize, base + 8);
    }

    #[test]
    fn test_empty_string_is_just_a_terminator() {
        let block = CStringBlock::new(&[""]);
        assert_eq!(read_back(&block, 0), "");
        assert_eq!(block.byte_len(), 1);
    }

    #[test]
    fn test_pointer_array_matches_string_ptrs() {
        let block = CStringBlock::new(&["one", "two"]);
        let array = block.as_ptr();
        unsafe {
            assert_eq!(*array, block.string_ptr(0));
            assert_eq!(*array.add(1), block.string_ptr(1));
        }
    }

    #[test]
    #[should_panic(expected = "at least one string")]
    fn test_zero_strings_panics() {
        let _ = CStringBlock::new(&[]);
    }

    #[test]
    #[should_panic(expected = "interior NUL")]
    fn test_interior_nul_panics() {
        let _ = CStringBlock::new(&["ok", "bad\0bad"]);
    }
}
