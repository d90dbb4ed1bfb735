use std::ffi::c_void;
use std::ptr;

/// Opaque handle to a shared object mapped into this process.
///
/// Non-owning: the dynamic linker owns the mapping and its lifetime, so
/// dropping a `LibHandle` unloads nothing. Null is the "no library loaded"
/// sentinel and must be checked before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibHandle(*mut c_void);

// SAFETY: the handle is a process-global token owned by the linker; copying
// or sharing it across threads does not touch the mapping itself.
unsafe impl Send for LibHandle {}
unsafe impl Sync for LibHandle {}

impl LibHandle {
    /// The "no library loaded" sentinel.
    pub const fn null() -> Self {
        Self(ptr::null_mut())
    }

    /// Wrap a raw `dlopen`-style handle obtained elsewhere.
    pub const fn from_raw(raw: *mut c_void) -> Self {
        Self(raw)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl Default for LibHandle {
    fn default() -> Self {
        Self::null()
    }
}
