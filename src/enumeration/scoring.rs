//! Slice scoring and the monotone upper bound used for pruning.

/// Shared scoring context: dataset-level constants every score evaluation
/// needs.
#[derive(Debug, Clone, Copy)]
pub struct ScoreContext {
    /// Average error over the full dataset.
    pub e_avg: f64,
    /// Score weight in `[0, 1]`: 0 = size only, 1 = error only.
    pub alpha: f64,
    /// Number of dataset rows.
    pub num_rows: usize,
    /// Minimum slice size.
    pub min_sup: usize,
}

impl ScoreContext {
    /// Score of a slice with the given measured size and total error.
    ///
    /// `sc = alpha * ((total_error/size) / e_avg - 1) - (1-alpha) * (n/size - 1)`
    ///
    /// Degenerate inputs (empty slice, zero average error) map to `-inf` so
    /// such slices are never selected.
    pub fn score(&self, size: f64, total_error: f64) -> f64 {
        if size <= 0.0 || self.e_avg <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let n = self.num_rows as f64;
        let sc = self.alpha * ((total_error / size) / self.e_avg - 1.0)
            - (1.0 - self.alpha) * (n / size - 1.0);
        if sc.is_nan() {
            f64::NEG_INFINITY
        } else {
            sc
        }
    }

    /// Upper bound on the score of any slice consistent with the given
    /// aggregated stats (size, error, and max-error upper bounds).
    ///
    /// The score is monotone in the actual size on either side of its
    /// optimum, so probing three candidate sizes suffices: the minimum
    /// support, the size where the error cap `s * max_error` meets
    /// `total_error`, and the size bound itself. The total error is capped at
    /// `s * max_error` for each probe and the maximum over the probes is a
    /// valid bound for every consistent slice.
    pub fn score_ub(&self, size: f64, total_error: f64, max_error: f64) -> f64 {
        if self.e_avg <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let n = self.num_rows as f64;
        let min_sup = self.min_sup as f64;
        // f64::max treats a NaN probe (max_error == 0) as absent.
        let probes = [min_sup, (total_error / max_error).max(min_sup), size];
        let mut best = f64::NEG_INFINITY;
        for s in probes {
            if s <= 0.0 {
                continue;
            }
            let err = (s * max_error).min(total_error);
            let sc = self.alpha * ((err / s) / self.e_avg - 1.0)
                - (1.0 - self.alpha) * (n / s - 1.0);
            if sc > best {
                best = sc;
            }
        }
        best
    }
}
