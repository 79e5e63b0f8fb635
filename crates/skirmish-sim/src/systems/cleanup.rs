//! End-of-tick compaction.

use crate::registry::Registry;

/// Despawn everything marked for removal during the tick.
pub fn run(registry: &mut Registry) {
    let removed = registry.compact();
    if removed > 0 {
        tracing::trace!(removed, "compacted registry");
    }
}
