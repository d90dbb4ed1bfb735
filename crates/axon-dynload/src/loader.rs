use std::ffi::{CStr, CString};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use libc::{c_int, RTLD_LOCAL, RTLD_NOW};
use log::error;

use crate::errors::{DynloadError, Result};
use crate::types::LibHandle;

// Deep binding resolves a plugin's internal references within its own scope
// before the global one. glibc only; bionic and musl do not define the flag.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
const OPEN_FLAGS: c_int = RTLD_NOW | RTLD_LOCAL | libc::RTLD_DEEPBIND;
#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
const OPEN_FLAGS: c_int = RTLD_NOW | RTLD_LOCAL;

/// Map the shared object at `path` into the process, with immediate symbol
/// binding and local visibility.
///
/// `Ok` guarantees a non-null handle; no symbol lookup or other validation is
/// performed beyond what the linker itself does. On failure the linker's
/// `dlerror` text is logged once at error severity together with the attempted
/// path, and returned inside the error.
pub fn open_lib(path: impl AsRef<Path>) -> Result<LibHandle> {
    let path = path.as_ref();
    let c_path = match CString::new(path.as_os_str().as_bytes()) {
        Ok(c) => c,
        Err(e) => return Err(load_failed(path, e.to_string())),
    };

    // SAFETY: c_path is a valid NUL-terminated string; dlopen has no other
    // preconditions.
    let raw = unsafe { libc::dlopen(c_path.as_ptr(), OPEN_FLAGS) };
    if raw.is_null() {
        return Err(load_failed(path, dlerror_string()));
    }
    Ok(LibHandle::from_raw(raw))
}

fn load_failed(path: &Path, reason: String) -> DynloadError {
    error!(
        "failed to load shared object at {}: {}",
        path.display(),
        reason
    );
    DynloadError::DynamicLoad {
        path: path.display().to_string(),
        reason,
    }
}

/// Last linker error, or a fixed fallback when the linker reports none.
fn dlerror_string() -> String {
    // SAFETY: dlerror returns null or a NUL-terminated string owned by the
    // linker, valid until the next dlfcn call on this thread.
    unsafe {
        let err = libc::dlerror();
        if err.is_null() {
            "unknown dlopen error".to_string()
        } else {
            CStr::from_ptr(err).to_string_lossy().into_owned()
        }
    }
}
