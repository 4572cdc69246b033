use nalgebra::Point2;

/// The vertex set handed over by the external mesher.
pub struct Mesh {
    pub vertices: Vec<Vertex>,
}

/// A mesh vertex in the device frame.
pub struct Vertex {
    pub position: Point2<f64>,
    /// `true` when the vertex lies on the outer boundary of the discretized domain.
    pub on_boundary: bool,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
