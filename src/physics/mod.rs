pub mod bc;
pub mod boundary;
pub mod field;
pub mod geometry;
pub mod mobility;
pub mod transport;

pub use boundary::{BoundaryRegion, PeriodicLateral};
pub use field::FieldSampler;
pub use geometry::{BOUNDARY_EPS, DeviceGeometry, DomainBounds, GeometryError, StripGeometry};
pub use mobility::{CarrierType, MobilityModel};
pub use transport::{Diffusion, DriftTransport, TransportConfig};
