//! Linker-side diagnostics for loaded backend plugins.
//!
//! Two strategies, fixed per build target: the full dump walks the linker's
//! own metadata via `dlinfo` (glibc Linux); everywhere else the dump is a
//! silent no-op (Android above all, where bionic exposes no linker
//! introspection).

use std::io::Write;

use crate::types::LibHandle;

#[cfg(all(target_os = "linux", target_env = "gnu"))]
mod glibc;
#[cfg(all(target_os = "linux", target_env = "gnu"))]
use glibc::dump;

#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
fn dump(_handle: LibHandle, _out: &mut dyn Write) {}

/// Write a human-readable report of the linker's view of `handle`: namespace
/// id, origin directory, and every loaded object in link order centered on
/// the handle's own entry.
///
/// Best-effort only. A null handle is noted, any metadata query failure ends
/// the dump early, and sink write errors are discarded. Never returns an
/// error and never panics; a stale handle degrades to partial or empty output.
pub fn dump_lib_info(handle: LibHandle, out: &mut dyn Write) {
    dump(handle, out)
}
