use std::collections::HashMap;
use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::{MeshData, MeshTopology, MeshVertex};

/// Unit-icosahedron based sphere.
///
/// Each subdivision level splits every triangle into four, reusing shared
/// edge midpoints. Vertex count is `10 * 4^n + 2`. Normals point outwards;
/// UVs are equirectangular (a visible seam is acceptable for shading).
pub fn icosphere(radius: f32, subdivisions: u32) -> MeshData {
    let (mut positions, mut triangles) = icosahedron();

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next = Vec::with_capacity(triangles.len() * 4);

        for [a, b, c] in triangles {
            let ab = midpoint(&mut positions, &mut midpoints, a, b);
            let bc = midpoint(&mut positions, &mut midpoints, b, c);
            let ca = midpoint(&mut positions, &mut midpoints, c, a);
            next.extend_from_slice(&[[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }

        triangles = next;
    }

    let vertices = positions
        .iter()
        .map(|p| MeshVertex {
            pos: (*p * radius).to_array(),
            normal: p.to_array(),
            uv: [
                0.5 + p.z.atan2(p.x) / TAU,
                0.5 - p.y.clamp(-1.0, 1.0).asin() / PI,
            ],
        })
        .collect();

    MeshData {
        vertices,
        indices: triangles.into_iter().flatten().collect(),
        topology: MeshTopology::Triangles,
    }
}

fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    *cache.entry(key).or_insert_with(|| {
        let p = (positions[a as usize] + positions[b as usize]).normalize();
        positions.push(p);
        (positions.len() - 1) as u32
    })
}

fn icosahedron() -> (Vec<Vec3>, Vec<[u32; 3]>) {
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;

    let positions = [
        [-1.0, t, 0.0], [1.0, t, 0.0], [-1.0, -t, 0.0], [1.0, -t, 0.0],
        [0.0, -1.0, t], [0.0, 1.0, t], [0.0, -1.0, -t], [0.0, 1.0, -t],
        [t, 0.0, -1.0], [t, 0.0, 1.0], [-t, 0.0, -1.0], [-t, 0.0, 1.0],
    ]
    .into_iter()
    .map(|p| Vec3::from_array(p).normalize())
    .collect();

    let triangles = vec![
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];

    (positions, triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_triangle_counts() {
        for n in 0..4u32 {
            let m = icosphere(1.0, n);
            assert_eq!(m.vertices.len(), 10 * 4usize.pow(n) + 2, "level {n}");
            assert_eq!(m.primitive_count(), 20 * 4usize.pow(n), "level {n}");
        }
    }

    #[test]
    fn vertices_lie_on_radius_with_unit_normals() {
        let m = icosphere(0.25, 2);
        for v in &m.vertices {
            let p = Vec3::from_array(v.pos);
            let n = Vec3::from_array(v.normal);
            assert!((p.length() - 0.25).abs() < 1e-5);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(p.normalize().dot(n) > 0.9999);
        }
    }

    #[test]
    fn triangles_wind_outwards() {
        let m = icosphere(1.0, 1);
        for tri in m.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(m.vertices[i as usize].pos));
            let face_normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(face_normal.dot(centroid) > 0.0);
        }
    }
}
