use std::f32::consts::TAU;

use super::{MeshData, MeshTopology, MeshVertex};

/// Filled disc in the XY plane as a triangle fan.
///
/// Vertex 0 is the center (uv 0.5, 0.5); vertices `1..=segments + 1` walk the
/// perimeter, the last one repeating the first so the fan closes. Perimeter
/// UVs remap `cos/sin` from `[-1, 1]` to `[0, 1]`.
pub fn disc(segments: u32, radius: f32) -> MeshData {
    let segments = segments.max(3);
    let normal = [0.0, 0.0, 1.0];

    let mut vertices = Vec::with_capacity(segments as usize + 2);
    vertices.push(MeshVertex {
        pos: [0.0; 3],
        normal,
        uv: [0.5, 0.5],
    });

    for i in 0..=segments {
        let angle = i as f32 * (TAU / segments as f32);
        let (s, c) = angle.sin_cos();
        vertices.push(MeshVertex {
            pos: [c * radius, s * radius, 0.0],
            normal,
            uv: [c * 0.5 + 0.5, s * 0.5 + 0.5],
        });
    }

    let mut indices = Vec::with_capacity(segments as usize * 3);
    for i in 1..=segments {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    MeshData {
        vertices,
        indices,
        topology: MeshTopology::Triangles,
    }
}

/// Dashed circle outline in the XY plane as a line list.
///
/// Places `segments` points on the circle and links point `i` to `i + 1`
/// (wrapping) for every even `i`, leaving a gap after each dash.
pub fn dashed_ring(segments: u32, radius: f32) -> MeshData {
    let segments = segments.max(2);

    let vertices = (0..segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * TAU;
            let (s, c) = angle.sin_cos();
            MeshVertex {
                pos: [c * radius, s * radius, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [0.0, 0.0],
            }
        })
        .collect();

    let indices = (0..segments)
        .step_by(2)
        .flat_map(|i| [i, (i + 1) % segments])
        .collect();

    MeshData {
        vertices,
        indices,
        topology: MeshTopology::Lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radius_of(v: &MeshVertex) -> f32 {
        (v.pos[0] * v.pos[0] + v.pos[1] * v.pos[1]).sqrt()
    }

    #[test]
    fn disc_layout() {
        let m = disc(64, 0.3);
        assert_eq!(m.vertices.len(), 66);
        assert_eq!(m.primitive_count(), 64);
        assert_eq!(m.vertices[0].uv, [0.5, 0.5]);
        assert_eq!(&m.indices[..3], &[0, 1, 2]);
        assert_eq!(&m.indices[m.indices.len() - 3..], &[0, 64, 65]);

        for v in &m.vertices[1..] {
            assert!((radius_of(v) - 0.3).abs() < 1e-5);
            assert!((0.0..=1.0).contains(&v.uv[0]) && (0.0..=1.0).contains(&v.uv[1]));
        }
    }

    #[test]
    fn disc_closes_on_first_perimeter_vertex() {
        let m = disc(16, 1.0);
        let first = m.vertices[1].pos;
        let last = m.vertices[17].pos;
        assert!((first[0] - last[0]).abs() < 1e-5);
        assert!((first[1] - last[1]).abs() < 1e-5);
    }

    #[test]
    fn every_disc_index_is_in_range() {
        let m = disc(8, 1.0);
        let n = m.vertices.len() as u32;
        assert!(m.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn dashed_ring_links_even_vertices() {
        let m = dashed_ring(100, 0.75);
        assert_eq!(m.vertices.len(), 100);
        assert_eq!(m.topology, MeshTopology::Lines);
        assert_eq!(m.primitive_count(), 50);
        assert_eq!(&m.indices[..4], &[0, 1, 2, 3]);
        for v in &m.vertices {
            assert!((radius_of(v) - 0.75).abs() < 1e-5);
        }
    }

    #[test]
    fn odd_dashed_ring_wraps_to_zero() {
        let m = dashed_ring(5, 1.0);
        assert_eq!(m.indices, vec![0, 1, 2, 3, 4, 0]);
    }
}
