use super::mesh::{Mesh, Vertex};
use nalgebra::Point2;

/// Create a structured vertex lattice over `[x_min, x_max] × [0, depth]`.
///
/// `nx` and `ny` are the number of intervals along each axis, so the lattice has
/// `(nx + 1) * (ny + 1)` vertices. Edge coordinates are set exactly so that the
/// boundary predicates see the faces at `x_min`, `x_max`, `0` and `depth`
/// without rounding noise.
pub fn create_regular_2d_lattice(x_range: [f64; 2], depth: f64, nx: usize, ny: usize) -> Mesh {
    let nx = nx.max(1);
    let ny = ny.max(1);
    let dx = (x_range[1] - x_range[0]) / nx as f64;
    let dy = depth / ny as f64;

    let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        let y = if j == ny { depth } else { j as f64 * dy };
        for i in 0..=nx {
            let x = if i == nx {
                x_range[1]
            } else {
                x_range[0] + i as f64 * dx
            };
            vertices.push(Vertex {
                position: Point2::new(x, y),
                on_boundary: i == 0 || i == nx || j == 0 || j == ny,
            });
        }
    }

    Mesh::new(vertices)
}
