//! Command: print version information.

/// The build version: `PSMOD_VERSION` at build time, else the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("PSMOD_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the psmod version to stdout.
pub fn run() {
    println!("psmod {}", version());
}
