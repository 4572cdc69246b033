use std::sync::Arc;

use super::boundary::{BoundaryRegion, PeriodicLateral};
use super::geometry::DeviceGeometry;
use crate::discretization::mesh::Mesh;
use nalgebra::Point2;
use tracing::debug;

/// Subdomain identifier stored as a runtime string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Label(pub Arc<str>);

impl Label {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label::new(name)
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Label::new(name)
    }
}

pub const CENTRAL_STRIP: &str = "central_strip";
pub const NEIGHBOUR_STRIPS: &str = "neighbour_strips";
pub const BACK_PLANE: &str = "back_plane";

/// Which potential problem the boundary conditions are set up for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldRegime {
    Electric,
    Weighting,
}

/// A labelled region with the Dirichlet value imposed on it.
#[derive(Clone, Debug)]
pub struct SubdomainRule {
    pub label: Label,
    pub region: BoundaryRegion,
    pub value: f64,
}

/// Boundary-condition setup handed to the potential solver.
///
/// Later rules take precedence over earlier ones when regions overlap.
#[derive(Default, Clone, Debug)]
pub struct BoundaryRegistry {
    rules: Vec<SubdomainRule>,
    periodic: Option<PeriodicLateral>,
}

impl BoundaryRegistry {
    pub fn add(&mut self, rule: SubdomainRule) {
        self.rules.push(rule);
    }

    pub fn set_periodic(&mut self, periodic: PeriodicLateral) {
        self.periodic = Some(periodic);
    }

    pub fn rules(&self) -> &[SubdomainRule] {
        &self.rules
    }

    pub fn periodic(&self) -> Option<&PeriodicLateral> {
        self.periodic.as_ref()
    }

    pub fn rule(&self, label: &str) -> Option<&SubdomainRule> {
        self.rules.iter().rev().find(|r| r.label.as_str() == label)
    }

    pub fn find_for(&self, x: &Point2<f64>, on_boundary: bool) -> Option<&SubdomainRule> {
        self.rules
            .iter()
            .rev()
            .find(|r| r.region.classify(x, on_boundary))
    }

    /// Resolve the governing rule of every mesh vertex.
    pub fn mark<'a>(&'a self, mesh: &Mesh) -> Vec<Option<&'a SubdomainRule>> {
        let marks: Vec<_> = mesh
            .vertices
            .iter()
            .map(|v| self.find_for(&v.position, v.on_boundary))
            .collect();

        for rule in &self.rules {
            let count = marks
                .iter()
                .flatten()
                .filter(|m| m.label == rule.label)
                .count();
            debug!(label = rule.label.as_str(), count, "marked vertices");
        }
        marks
    }

    /// Dirichlet value per vertex, `None` where no rule applies.
    pub fn dirichlet_values(&self, mesh: &Mesh) -> Vec<Option<f64>> {
        self.mark(mesh)
            .into_iter()
            .map(|m| m.map(|r| r.value))
            .collect()
    }

    /// Pairs `(source, target)` of vertex indices identified by the periodic map.
    ///
    /// A source is any vertex outside the target face whose image lands within
    /// `tol` of a target vertex.
    pub fn periodic_pairs(&self, mesh: &Mesh, tol: f64) -> Vec<(usize, usize)> {
        let Some(periodic) = &self.periodic else {
            return Vec::new();
        };

        let targets: Vec<(usize, Point2<f64>)> = mesh
            .vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| periodic.inside(&v.position, v.on_boundary))
            .map(|(i, v)| (i, v.position))
            .collect();

        let mut pairs = Vec::new();
        for (i, v) in mesh.vertices.iter().enumerate() {
            if periodic.inside(&v.position, v.on_boundary) {
                continue;
            }
            let image = periodic.map(&v.position);
            if !periodic.inside(&image, v.on_boundary) {
                continue;
            }
            if let Some((j, _)) = targets
                .iter()
                .find(|(_, p)| (p - image).norm() < tol)
            {
                pairs.push((i, *j));
            }
        }
        debug!(pairs = pairs.len(), "periodic vertex pairs");
        pairs
    }
}

impl DeviceGeometry {
    pub fn registry(&self, regime: FieldRegime) -> BoundaryRegistry {
        match regime {
            FieldRegime::Electric => self.electric_registry(),
            FieldRegime::Weighting => self.weighting_registry(),
        }
    }

    /// Strips at their bias, neighbours grounded, back plane at the bias voltage.
    pub fn electric_registry(&self) -> BoundaryRegistry {
        let mut reg = BoundaryRegistry::default();
        reg.add(SubdomainRule {
            label: Label::from(CENTRAL_STRIP),
            region: BoundaryRegion::CentralStrip(self.strips),
            value: self.strip_voltage,
        });
        reg.add(SubdomainRule {
            label: Label::from(NEIGHBOUR_STRIPS),
            region: BoundaryRegion::NeighbourStrip(self.strips),
            value: 0.0,
        });
        reg.add(SubdomainRule {
            label: Label::from(BACK_PLANE),
            region: BoundaryRegion::BackPlane(self.bounds()),
            value: self.bias_voltage,
        });
        reg.set_periodic(PeriodicLateral::new(self.bounds()));
        debug!(rules = reg.rules.len(), "electric field boundary conditions");
        reg
    }

    /// Unit potential on the readout strip, every other electrode grounded.
    pub fn weighting_registry(&self) -> BoundaryRegistry {
        let mut reg = BoundaryRegistry::default();
        reg.add(SubdomainRule {
            label: Label::from(CENTRAL_STRIP),
            region: BoundaryRegion::CentralStripWeighting {
                strips: self.strips,
                depletion_width: self.depletion_width,
            },
            value: 1.0,
        });
        reg.add(SubdomainRule {
            label: Label::from(NEIGHBOUR_STRIPS),
            region: BoundaryRegion::NeighbourStripWeighting {
                strips: self.strips,
                depletion_width: self.depletion_width,
            },
            value: 0.0,
        });
        reg.add(SubdomainRule {
            label: Label::from(BACK_PLANE),
            region: BoundaryRegion::BackPlaneWeighting(self.weighting_bounds()),
            value: 0.0,
        });
        reg.set_periodic(PeriodicLateral::new(self.weighting_bounds()));
        debug!(rules = reg.rules.len(), "weighting field boundary conditions");
        reg
    }
}
