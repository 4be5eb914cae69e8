//! Regular sample grids and their wireline adjacency.
//!
//! Points are laid out row-major: grid cell `(x, z)` lives at linear index
//! `x * cols + z`.

use glam::Vec3;

/// A regular grid of base points on a horizontal plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SampleGrid {
    pub rows: usize,
    pub cols: usize,
    /// Position of cell `(0, 0)`.
    pub origin: Vec3,
    /// Distance between neighbouring cells along x and z.
    pub spacing: f32,
}

impl SampleGrid {
    #[inline]
    pub const fn new(rows: usize, cols: usize, origin: Vec3, spacing: f32) -> Self {
        Self { rows, cols, origin, spacing }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear index of cell `(x, z)`.
    #[inline]
    pub fn index(&self, x: usize, z: usize) -> usize {
        x * self.cols + z
    }

    /// Base positions of every cell, in linear-index order.
    pub fn points(&self) -> Vec<Vec3> {
        let mut out = Vec::with_capacity(self.len());
        for x in 0..self.rows {
            for z in 0..self.cols {
                out.push(self.origin + Vec3::new(x as f32, 0.0, z as f32) * self.spacing);
            }
        }
        out
    }

    /// Number of segments [`build_adjacency_lines`] emits for a full grid.
    #[inline]
    pub fn segment_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.rows * (self.cols - 1) + self.cols * (self.rows - 1)
    }
}

/// A wireline segment between two points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
}

impl LineSegment {
    #[inline]
    pub const fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }
}

/// Regenerates `out` with one segment from every cell to its right neighbour
/// `(x, z + 1)` and its lower neighbour `(x + 1, z)`.
///
/// Cells (or neighbours) whose index falls outside `points` are skipped, so a
/// point list shorter than `rows * cols` yields the segments that exist.
pub fn build_adjacency_lines_into(
    points: &[Vec3],
    rows: usize,
    cols: usize,
    out: &mut Vec<LineSegment>,
) {
    out.clear();

    for x in 0..rows {
        for z in 0..cols {
            let index = x * cols + z;
            let Some(&p) = points.get(index) else { continue };

            if z + 1 < cols {
                if let Some(&right) = points.get(index + 1) {
                    out.push(LineSegment::new(p, right));
                }
            }
            if x + 1 < rows {
                if let Some(&below) = points.get(index + cols) {
                    out.push(LineSegment::new(p, below));
                }
            }
        }
    }
}

pub fn build_adjacency_lines(points: &[Vec3], rows: usize, cols: usize) -> Vec<LineSegment> {
    let mut out = Vec::new();
    build_adjacency_lines_into(points, rows, cols, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize) -> SampleGrid {
        SampleGrid::new(rows, cols, Vec3::new(-1.0, -1.0, -1.0), 1.0)
    }

    // ── SampleGrid ────────────────────────────────────────────────────────

    #[test]
    fn points_are_row_major() {
        let g = grid(3, 4);
        let pts = g.points();
        assert_eq!(pts.len(), 12);
        assert_eq!(pts[g.index(0, 0)], Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(pts[g.index(0, 1)], Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(pts[g.index(2, 3)], Vec3::new(1.0, -1.0, 2.0));
    }

    #[test]
    fn points_respect_spacing() {
        let g = SampleGrid::new(2, 2, Vec3::ZERO, 0.5);
        assert_eq!(g.points()[3], Vec3::new(0.5, 0.0, 0.5));
    }

    // ── adjacency ─────────────────────────────────────────────────────────

    #[test]
    fn full_grid_segment_count() {
        for (rows, cols) in [(1, 1), (1, 5), (4, 1), (2, 3), (20, 20), (7, 11)] {
            let g = grid(rows, cols);
            let lines = build_adjacency_lines(&g.points(), rows, cols);
            assert_eq!(lines.len(), rows * (cols - 1) + cols * (rows - 1));
            assert_eq!(lines.len(), g.segment_count());
        }
    }

    #[test]
    fn endpoints_reference_grid_points() {
        let g = grid(5, 6);
        let pts = g.points();
        for seg in build_adjacency_lines(&pts, g.rows, g.cols) {
            assert!(pts.contains(&seg.start));
            assert!(pts.contains(&seg.end));
            // Neighbours are exactly one spacing apart.
            assert!(((seg.end - seg.start).length() - g.spacing).abs() < 1e-6);
        }
    }

    #[test]
    fn first_cell_links_right_then_down() {
        let g = grid(2, 2);
        let pts = g.points();
        let lines = build_adjacency_lines(&pts, 2, 2);
        assert_eq!(lines[0], LineSegment::new(pts[0], pts[1]));
        assert_eq!(lines[1], LineSegment::new(pts[0], pts[2]));
    }

    #[test]
    fn short_point_list_is_skipped_silently() {
        let g = grid(3, 3);
        let mut pts = g.points();
        pts.truncate(7); // last row is missing two cells

        let lines = build_adjacency_lines(&pts, 3, 3);
        assert!(lines.len() < g.segment_count());
        for seg in &lines {
            assert!(pts.contains(&seg.start) && pts.contains(&seg.end));
        }
    }

    #[test]
    fn empty_inputs_yield_no_segments() {
        assert!(build_adjacency_lines(&[], 4, 4).is_empty());
        assert!(build_adjacency_lines(&grid(2, 2).points(), 0, 0).is_empty());
        assert_eq!(grid(0, 5).segment_count(), 0);
    }

    #[test]
    fn into_variant_reuses_buffer() {
        let g = grid(4, 4);
        let pts = g.points();
        let mut out = vec![LineSegment::new(Vec3::ONE, Vec3::ONE); 100];
        build_adjacency_lines_into(&pts, 4, 4, &mut out);
        assert_eq!(out, build_adjacency_lines(&pts, 4, 4));
    }
}
