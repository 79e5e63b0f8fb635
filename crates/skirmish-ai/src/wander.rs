//! Random patrol destinations for enemies without a patrol route.

use glam::DVec2;
use rand::Rng;

use skirmish_core::arena::Arena;
use skirmish_core::constants::WANDER_POINT_ATTEMPTS;

/// Pick a random open point reachable in a straight line from `from`, far
/// enough from the walls to hold a body of `radius`. `None` if every
/// attempt was blocked.
pub fn pick_wander_point<R: Rng>(
    rng: &mut R,
    arena: &Arena,
    from: DVec2,
    radius: f64,
) -> Option<DVec2> {
    let lo = arena.bounds.min + DVec2::splat(radius);
    let hi = arena.bounds.max - DVec2::splat(radius);
    if hi.x <= lo.x || hi.y <= lo.y {
        return None;
    }

    (0..WANDER_POINT_ATTEMPTS)
        .map(|_| DVec2::new(rng.gen_range(lo.x..hi.x), rng.gen_range(lo.y..hi.y)))
        .find(|p| arena.segment_is_open(from, *p, radius))
}
