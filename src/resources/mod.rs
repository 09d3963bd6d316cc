//! Filesystem primitives an install plan is made of.
pub mod fs;
pub mod helpers;

use anyhow::Result;

/// Interface for a single mutating step that can be described and applied.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the change.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be applied due to I/O failures,
    /// permission issues or invalid paths.
    fn apply(&self) -> Result<ResourceChange>;
}

/// Result of applying a resource change.
///
/// # Examples
///
/// ```
/// use psmod_cli::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let noop = ResourceChange::AlreadyCorrect;
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, noop);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created, replaced or removed.
    Applied,
    /// Resource was already in the desired state.
    AlreadyCorrect,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Noop;

    impl Applicable for Noop {
        fn description(&self) -> String {
            "noop".to_string()
        }

        fn apply(&self) -> Result<ResourceChange> {
            Ok(ResourceChange::AlreadyCorrect)
        }
    }

    #[test]
    fn trait_object_is_usable() {
        let r: Box<dyn Applicable> = Box::new(Noop);
        assert_eq!(r.description(), "noop");
        assert_eq!(r.apply().unwrap(), ResourceChange::AlreadyCorrect);
    }
}
