//! Policy trait for per-ship action selection.

/// A policy that picks an action-table index for each ship.
///
/// Actions are indices into the 17-way table of
/// [`action_table`](crate::rl::action_table).
pub trait Policy {
    /// Selects one action per ship given their feature vectors.
    ///
    /// # Arguments
    ///
    /// * `features` - Per-ship vectors built by [`FeatureExtractor`](crate::features::FeatureExtractor)
    ///
    /// # Returns
    ///
    /// A vector of action indices, one per ship, in input order.
    fn select_actions(&mut self, features: &[Vec<f32>]) -> Vec<usize>;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}
