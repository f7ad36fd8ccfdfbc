//! Computational control parameters for the transient solver run.

/// Time-stepping controls handed to the external solver.
///
/// Values are not range-checked while editing; the export path requires
/// each to be finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputationalParams {
    /// Computation time step, seconds.
    pub dtcomp: f64,
    /// Output interval, seconds.
    pub dtout: f64,
    /// Total simulated time, seconds.
    pub tmax: f64,
}

impl Default for ComputationalParams {
    fn default() -> Self {
        Self {
            dtcomp: 0.01,
            dtout: 0.1,
            tmax: 10.0,
        }
    }
}

/// Partial update merged into the current parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputationalParamsPatch {
    pub dtcomp: Option<f64>,
    pub dtout: Option<f64>,
    pub tmax: Option<f64>,
}

impl ComputationalParams {
    pub fn apply(&mut self, patch: ComputationalParamsPatch) {
        if let Some(v) = patch.dtcomp {
            self.dtcomp = v;
        }
        if let Some(v) = patch.dtout {
            self.dtout = v;
        }
        if let Some(v) = patch.tmax {
            self.tmax = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_merges_only_present_fields() {
        let mut params = ComputationalParams::default();
        params.apply(ComputationalParamsPatch {
            tmax: Some(25.0),
            ..Default::default()
        });
        assert_eq!(params.tmax, 25.0);
        assert_eq!(params.dtcomp, 0.01);
        assert_eq!(params.dtout, 0.1);
    }
}
