/// Finite and strictly positive, the contract for computational controls
/// and required element attributes at export time.
pub fn is_finite_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
