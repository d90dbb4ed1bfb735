use std::ffi::{c_void, CStr};
use std::io::Write;
use std::ptr;

use libc::{c_char, c_ulong, Lmid_t, RTLD_DI_LINKMAP, RTLD_DI_LMID, RTLD_DI_ORIGIN};

use crate::types::LibHandle;

// glibc's public `link_map` node, as exposed through RTLD_DI_LINKMAP. Not
// defined by libc 0.2, so the documented public prefix is declared here. Only
// `l_name`, `l_next`, and `l_prev` are read below; layout matches glibc.
#[repr(C)]
struct link_map {
    l_addr: c_ulong,
    l_name: *mut c_char,
    l_ld: *mut c_void,
    l_next: *mut link_map,
    l_prev: *mut link_map,
}

// RTLD_DI_ORIGIN copies into a caller-provided buffer with no length argument;
// origins longer than this are truncated by the underlying call. Known bound.
const ORIGIN_BUF_LEN: usize = 512;

pub(super) fn dump(handle: LibHandle, out: &mut dyn Write) {
    let _ = writeln!(out, "\n--- Lib Info ---");
    if handle.is_null() {
        let _ = writeln!(out, "Handle is nullptr");
        return;
    }

    let raw = handle.as_ptr();

    // Each query failing ends the dump with whatever was written so far.
    let mut ns_idx: Lmid_t = 0;
    // SAFETY: raw is a non-null handle from dlopen; ns_idx is a valid Lmid_t
    // out-slot for RTLD_DI_LMID.
    if unsafe { libc::dlinfo(raw, RTLD_DI_LMID, &mut ns_idx as *mut Lmid_t as *mut c_void) } != 0 {
        return;
    }

    let mut origin = [0u8; ORIGIN_BUF_LEN];
    // SAFETY: RTLD_DI_ORIGIN writes a NUL-terminated path into the buffer.
    if unsafe { libc::dlinfo(raw, RTLD_DI_ORIGIN, origin.as_mut_ptr() as *mut c_void) } != 0 {
        return;
    }

    let mut lm: *mut link_map = ptr::null_mut();
    // SAFETY: RTLD_DI_LINKMAP stores the handle's own link_map node pointer.
    if unsafe { libc::dlinfo(raw, RTLD_DI_LINKMAP, &mut lm as *mut *mut link_map as *mut c_void) }
        != 0
    {
        return;
    }
    if lm.is_null() {
        return;
    }

    let _ = writeln!(out, "Lib Namespace: {ns_idx}");
    let _ = writeln!(out, "Lib Origin: {}", origin_str(&origin));

    let _ = writeln!(out, "loaded objects:");

    // Two independent walks from the handle's own node, not one linear pass:
    // objects loaded after it first, then the node itself marked, then the
    // objects loaded before it.
    // SAFETY: the nodes form a linker-owned doubly linked list; each non-null
    // l_next/l_prev points at a live link_map for the duration of the walk.
    unsafe {
        let mut forward = (*lm).l_next;
        while !forward.is_null() {
            let _ = writeln!(out, "  {}", object_name(forward));
            forward = (*forward).l_next;
        }

        let _ = writeln!(out, "***{}", object_name(lm));

        let mut backward = (*lm).l_prev;
        while !backward.is_null() {
            let _ = writeln!(out, "  {}", object_name(backward));
            backward = (*backward).l_prev;
        }
    }

    let _ = writeln!(out);
}

/// Display name of a link-map node. Empty for the main program.
///
/// # Safety
///
/// `node` must point at a live link_map.
unsafe fn object_name(node: *const link_map) -> String {
    let name = (*node).l_name;
    if name.is_null() {
        String::new()
    } else {
        CStr::from_ptr(name).to_string_lossy().into_owned()
    }
}

fn origin_str(buf: &[u8]) -> String {
    let end = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}
