use hexnav_core::Tile;

/// Euclidean (L2) distance between the centers of two tiles.
#[inline]
pub fn euclidean(a: &Tile, b: &Tile) -> f32 {
    (b.x - a.x).hypot(b.y - a.y)
}
