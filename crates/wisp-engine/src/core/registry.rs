use crate::api::types::TargetId;
use crate::components::target::{RevealKind, Target};

/// Simple target storage using a flat Vec.
/// A page registers tens of targets, not thousands; linear scans are fine.
pub struct Registry {
    targets: Vec<Target>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            targets: Vec::with_capacity(64),
        }
    }

    /// Create a registry with a specific target capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            targets: Vec::with_capacity(capacity),
        }
    }

    /// Add a target to the registry.
    pub fn spawn(&mut self, target: Target) {
        self.targets.push(target);
    }

    /// Remove a target by ID. Returns the removed target if found.
    pub fn despawn(&mut self, id: TargetId) -> Option<Target> {
        if let Some(idx) = self.targets.iter().position(|t| t.id == id) {
            Some(self.targets.swap_remove(idx))
        } else {
            None
        }
    }

    /// Get a reference to a target by ID.
    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a target by ID.
    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut Target> {
        self.targets.iter_mut().find(|t| t.id == id)
    }

    /// Iterate over all targets.
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    /// Iterate over all targets mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Target> {
        self.targets.iter_mut()
    }

    /// Find the first target of the given kind.
    pub fn find_by_kind(&self, kind: RevealKind) -> Option<&Target> {
        self.targets.iter().find(|t| t.kind == kind)
    }

    /// Find all targets of the given kind.
    pub fn find_all_by_kind(&self, kind: RevealKind) -> Vec<&Target> {
        self.targets.iter().filter(|t| t.kind == kind).collect()
    }

    /// Number of targets in the registry.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Clear all targets.
    pub fn clear(&mut self) {
        self.targets.clear();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
