//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string for `--version`. Non-release builds say so.
pub fn version_line() -> String {
    let line = format!(
        "mole-panic {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    );
    if BUILD_PROFILE == "release" {
        line
    } else {
        format!("{} [{}]", line, BUILD_PROFILE)
    }
}
