//! End-to-end: load a real system library and dump the linker's view of it.

#![cfg(all(target_os = "linux", target_env = "gnu"))]

use axon_dynload::{dump_lib_info, open_lib};

#[test]
fn load_then_dump_round_trip() {
    let handle = open_lib("libm.so.6").expect("system libm should be loadable");
    assert!(!handle.is_null());

    let mut out = Vec::new();
    dump_lib_info(handle, &mut out);
    let text = String::from_utf8(out).expect("dump is valid UTF-8");

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), Some("--- Lib Info ---"));
    assert_eq!(lines.next(), Some("Lib Namespace: 0"));

    let origin = lines.next().expect("origin line");
    assert!(origin.starts_with("Lib Origin: /"), "got {origin:?}");

    assert_eq!(lines.next(), Some("loaded objects:"));

    // After the section line, every non-blank entry is either indented or the
    // single marked current module.
    let rest: Vec<&str> = lines.collect();
    let marked: Vec<&&str> = rest.iter().filter(|l| l.starts_with("***")).collect();
    assert_eq!(marked.len(), 1);
    assert!(marked[0].contains("libm"));

    for line in rest.iter().filter(|l| !l.starts_with("***") && !l.is_empty()) {
        assert!(line.starts_with("  "), "unexpected line: {line:?}");
    }

    // The process's own entry precedes libm in load order, so the backward
    // walk is non-empty: at least one indented object after the marker.
    let marker_at = rest.iter().position(|l| l.starts_with("***")).unwrap();
    assert!(rest[marker_at + 1..].iter().any(|l| l.starts_with("  ")));

    assert!(text.ends_with("\n\n"));
}
