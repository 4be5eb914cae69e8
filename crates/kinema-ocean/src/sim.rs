//! CPU side of the ocean scene: displaced sample points and the wireline
//! overlay, regenerated every frame into reused buffers.

use glam::Vec3;
use kinema_kernels::{build_adjacency_lines_into, LineSegment, SampleGrid, WaveField};

#[derive(Debug, Clone)]
pub struct OceanSim {
    grid: SampleGrid,
    field: WaveField,
    base: Vec<Vec3>,

    displaced: Vec<Vec3>,
    segments: Vec<LineSegment>,
    line_vertices: Vec<Vec3>,
}

impl OceanSim {
    pub fn new(grid: SampleGrid, field: WaveField) -> Self {
        let base = grid.points();
        Self {
            displaced: Vec::with_capacity(base.len()),
            segments: Vec::with_capacity(grid.segment_count()),
            line_vertices: Vec::with_capacity(grid.segment_count() * 2),
            grid,
            field,
            base,
        }
    }

    /// Recomputes displaced points and adjacency lines for `time` seconds.
    pub fn step(&mut self, time: f32) {
        self.field.displace_into(&self.base, time, &mut self.displaced);
        build_adjacency_lines_into(
            &self.displaced,
            self.grid.rows,
            self.grid.cols,
            &mut self.segments,
        );

        self.line_vertices.clear();
        self.line_vertices
            .extend(self.segments.iter().flat_map(|s| [s.start, s.end]));
    }

    /// Displaced sphere centers from the last step.
    pub fn positions(&self) -> &[Vec3] {
        &self.displaced
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    /// Segment endpoints flattened into a line list.
    pub fn line_vertices(&self) -> &[Vec3] {
        &self.line_vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use kinema_kernels::WaveDescriptor;

    fn sim() -> OceanSim {
        let grid = SampleGrid::new(4, 5, Vec3::new(-1.0, -1.0, -1.0), 1.0);
        let field = WaveField::new(vec![WaveDescriptor::new(Vec2::new(1.0, 0.1), 0.35, 20.0, 0.8)]);
        OceanSim::new(grid, field)
    }

    #[test]
    fn step_fills_all_buffers() {
        let mut s = sim();
        s.step(0.5);
        assert_eq!(s.positions().len(), 20);
        assert_eq!(s.segments().len(), 4 * 4 + 5 * 3);
        assert_eq!(s.line_vertices().len(), s.segments().len() * 2);
    }

    #[test]
    fn repeated_steps_do_not_accumulate() {
        let mut s = sim();
        s.step(0.0);
        let first: Vec<Vec3> = s.positions().to_vec();
        s.step(3.0);
        s.step(0.0);
        assert_eq!(s.positions(), first.as_slice());
        assert_eq!(s.segments().len(), 31);
    }

    #[test]
    fn lines_follow_displaced_points() {
        let mut s = sim();
        s.step(1.25);
        let seg = s.segments()[0];
        assert_eq!(seg.start, s.positions()[0]);
        assert_eq!(seg.end, s.positions()[1]);
        assert_eq!(s.line_vertices()[0], seg.start);
        assert_eq!(s.line_vertices()[1], seg.end);
    }
}
