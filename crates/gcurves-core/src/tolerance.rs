/// Tolerances for the geometric computations in this workspace.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Linear tolerance for distance and extent comparisons (in model units)
    pub linear: f64,
    /// Convergence tolerance on squared distances during projection refinement
    pub projection_sq: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-7;
    pub const DEFAULT_PROJECTION_SQ: f64 = 1e-4;

    pub fn new(linear: f64, projection_sq: f64) -> Self {
        Self {
            linear,
            projection_sq,
        }
    }

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            projection_sq: Self::DEFAULT_PROJECTION_SQ,
        }
    }

    /// Check if two values are equal within linear tolerance
    pub fn linear_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }

    /// Check if a value is zero within linear tolerance
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
