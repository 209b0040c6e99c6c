use hexnav_core::Point;

/// Whether `to` is a staggered-row neighbor candidate of `from`.
///
/// Candidates are the eight cells of the surrounding 3×3 block. On even
/// rows the same-row cell to the left is excluded; on odd rows the
/// same-row cell to the right is excluded. Bounds and passability are not
/// checked here.
#[inline]
pub fn is_staggered_neighbor(from: Point, to: Point) -> bool {
    let d = to - from;
    if d.x.abs() > 1 || d.y.abs() > 1 || d == Point::ZERO {
        return false;
    }
    if d.y != 0 {
        return true;
    }
    if from.y.rem_euclid(2) == 0 { d.x == 1 } else { d.x == -1 }
}

/// Reusable buffer for staggered-row neighbor enumeration.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the staggered-row neighbors of `p` in row-major order,
    /// keeping only those for which `keep` returns `true`.
    pub fn staggered(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for dy in -1..=1 {
            for dx in -1..=1 {
                let n = p.shift(dx, dy);
                if is_staggered_neighbor(p, n) && keep(n) {
                    self.buf.push(n);
                }
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_row_drops_left_sibling() {
        let mut nb = Neighbors::new();
        let p = Point::from_row_col(2, 2);
        let got = nb.staggered(p, |_| true).to_vec();
        assert_eq!(got.len(), 7);
        assert!(!got.contains(&Point::from_row_col(2, 1)));
        assert!(got.contains(&Point::from_row_col(2, 3)));
        assert!(!got.contains(&p));
    }

    #[test]
    fn odd_row_drops_right_sibling() {
        let mut nb = Neighbors::new();
        let p = Point::from_row_col(1, 2);
        let got = nb.staggered(p, |_| true).to_vec();
        assert_eq!(got.len(), 7);
        assert!(!got.contains(&Point::from_row_col(1, 3)));
        assert!(got.contains(&Point::from_row_col(1, 1)));
        for d in [(0, 1), (0, 2), (0, 3), (2, 1), (2, 2), (2, 3)] {
            assert!(got.contains(&Point::from_row_col(d.0, d.1)));
        }
    }

    #[test]
    fn keep_filters_candidates() {
        let mut nb = Neighbors::new();
        let got = nb.staggered(Point::ZERO, |n| n.x >= 0 && n.y >= 0).to_vec();
        assert_eq!(
            got,
            vec![
                Point::from_row_col(0, 1),
                Point::from_row_col(1, 0),
                Point::from_row_col(1, 1)
            ]
        );
    }

    #[test]
    fn negative_rows_use_euclidean_parity() {
        let p = Point::from_row_col(-1, 0);
        assert!(is_staggered_neighbor(p, Point::from_row_col(-1, -1)));
        assert!(!is_staggered_neighbor(p, Point::from_row_col(-1, 1)));
    }

    #[test]
    fn far_cells_are_not_candidates() {
        let p = Point::from_row_col(4, 4);
        assert!(!is_staggered_neighbor(p, Point::from_row_col(6, 4)));
        assert!(!is_staggered_neighbor(p, Point::from_row_col(4, 2)));
        assert!(!is_staggered_neighbor(p, p));
    }
}
