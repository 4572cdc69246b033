use thiserror::Error;

/// Tolerance absorbing mesh-vertex jitter in every boundary comparison.
pub const BOUNDARY_EPS: f64 = 3.0e-16;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("pitch must be positive, got {0}")]
    NonPositivePitch(f64),
    #[error("strip width must be non-negative, got {0}")]
    NegativeWidth(f64),
    #[error("strip width {width} exceeds pitch {pitch}")]
    WidthExceedsPitch { pitch: f64, width: f64 },
    #[error("{name} must be positive, got {value}")]
    NonPositiveExtent { name: &'static str, value: f64 },
    #[error("depletion width {depletion_width} exceeds device depth {depth}")]
    DepletionExceedsDepth { depletion_width: f64, depth: f64 },
    #[error("central strip index {0} leaves no room for its neighbours")]
    StripIndexTooLarge(u32),
    #[error("empty lateral range [{x_min}, {x_max}]")]
    EmptyRange { x_min: f64, x_max: f64 },
}

/// One strip in a periodic array of strips.
///
/// `index` is the position of the central strip in the array, which also
/// equals the number of neighbouring strips on each side of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripGeometry {
    pitch: f64,
    width: f64,
    index: u32,
}

impl StripGeometry {
    /// Largest central index whose array size `2·index + 1` fits in a `u32`.
    pub const MAX_INDEX: u32 = (u32::MAX - 1) / 2;

    pub fn new(pitch: f64, width: f64, index: u32) -> Result<Self, GeometryError> {
        if !(pitch > 0.0) {
            return Err(GeometryError::NonPositivePitch(pitch));
        }
        if !(width >= 0.0) {
            return Err(GeometryError::NegativeWidth(width));
        }
        if width > pitch {
            return Err(GeometryError::WidthExceedsPitch { pitch, width });
        }
        if index > Self::MAX_INDEX {
            return Err(GeometryError::StripIndexTooLarge(index));
        }
        Ok(Self {
            pitch,
            width,
            index,
        })
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Total number of strips in the array, central one included.
    pub fn strip_count(&self) -> u32 {
        2 * self.index + 1
    }

    /// Left edge of the strip window in the strip's own frame.
    pub fn left_limit(&self) -> f64 {
        (self.pitch - self.width) / 2.0
    }

    /// Right edge of the strip window in the strip's own frame.
    pub fn right_limit(&self) -> f64 {
        self.left_limit() + self.width
    }

    /// Whether `x` falls inside the window of strip `slot` (0-based).
    pub(crate) fn window_contains(&self, slot: u32, x: f64) -> bool {
        let x_translated = x - self.pitch * f64::from(slot);
        x_translated > self.left_limit() * (1.0 - BOUNDARY_EPS)
            && x_translated < self.right_limit() * (1.0 + BOUNDARY_EPS)
    }
}

/// Lateral extent and vertical position of the back plane.
///
/// `depth` is the device thickness for the electric field and the depletion
/// width for the weighting field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub depth: f64,
}

impl DomainBounds {
    pub fn new(x_min: f64, x_max: f64, depth: f64) -> Result<Self, GeometryError> {
        if !(x_max > x_min) {
            return Err(GeometryError::EmptyRange { x_min, x_max });
        }
        if !(depth > 0.0) {
            return Err(GeometryError::NonPositiveExtent {
                name: "depth",
                value: depth,
            });
        }
        Ok(Self {
            x_min,
            x_max,
            depth,
        })
    }

    /// Closed containment test used to stop carriers leaving the bulk.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= 0.0 && y <= self.depth
    }
}

/// A strip sensor cross-section: strip array on the front face at `y = 0`,
/// back plane at `y = depth`, periodic lateral faces at `x = 0` and `x = x_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceGeometry {
    pub strips: StripGeometry,
    pub depth: f64,
    pub depletion_width: f64,
    /// Potential applied to the central strip [V].
    pub strip_voltage: f64,
    /// Potential applied to the back plane [V].
    pub bias_voltage: f64,
}

impl DeviceGeometry {
    /// A fully depleted device with grounded strips and back plane.
    pub fn new(pitch: f64, width: f64, nns: u32, depth: f64) -> Result<Self, GeometryError> {
        if !(depth > 0.0) {
            return Err(GeometryError::NonPositiveExtent {
                name: "depth",
                value: depth,
            });
        }
        Ok(Self {
            strips: StripGeometry::new(pitch, width, nns)?,
            depth,
            depletion_width: depth,
            strip_voltage: 0.0,
            bias_voltage: 0.0,
        })
    }

    pub fn with_depletion_width(mut self, depletion_width: f64) -> Result<Self, GeometryError> {
        if !(depletion_width > 0.0) {
            return Err(GeometryError::NonPositiveExtent {
                name: "depletion width",
                value: depletion_width,
            });
        }
        if depletion_width > self.depth {
            return Err(GeometryError::DepletionExceedsDepth {
                depletion_width,
                depth: self.depth,
            });
        }
        self.depletion_width = depletion_width;
        Ok(self)
    }

    pub fn with_voltages(mut self, strip_voltage: f64, bias_voltage: f64) -> Self {
        self.strip_voltage = strip_voltage;
        self.bias_voltage = bias_voltage;
        self
    }

    pub fn x_min(&self) -> f64 {
        0.0
    }

    pub fn x_max(&self) -> f64 {
        self.strips.pitch() * f64::from(self.strips.strip_count())
    }

    /// Bounds used by the electric-field configuration.
    pub fn bounds(&self) -> DomainBounds {
        DomainBounds {
            x_min: self.x_min(),
            x_max: self.x_max(),
            depth: self.depth,
        }
    }

    /// Bounds used by the weighting-field configuration.
    pub fn weighting_bounds(&self) -> DomainBounds {
        DomainBounds {
            x_min: self.x_min(),
            x_max: self.x_max(),
            depth: self.depletion_width,
        }
    }
}
