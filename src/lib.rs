//! Drift transport of charge carriers in segmented silicon sensors, and the
//! boundary classification used to set up the electric and weighting
//! potential problems of a strip detector.
//!
//! The field solution itself comes from an external solver through
//! [`physics::FieldSampler`]; this crate turns it into carrier velocities
//! ([`physics::DriftTransport`]) and tells the solver which mesh points belong
//! to which electrode ([`physics::bc::BoundaryRegistry`]).

pub mod discretization;
pub mod numerics;
pub mod physics;
