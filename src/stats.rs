/// Arithmetic mean of `values`.
///
/// Returns `f64::NAN` for empty input; callers decide what an all-missing
/// column becomes.
pub fn mean(values: &[f64]) -> f64 {
    let mut acc = MeanAccumulator::new();
    for &v in values {
        acc.update(v);
    }
    acc.mean().unwrap_or(f64::NAN)
}

/// Median of `values`, sorting a copy first.
///
/// Even-length input yields the average of the two central elements. Returns
/// `f64::NAN` for empty input.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        sorted[mid - 1] / 2.0 + sorted[mid] / 2.0
    } else {
        sorted[mid]
    }
}

/// Welford-style running mean. Each step scales before subtracting, so finite
/// input near `f64::MAX` keeps a finite mean.
#[derive(Debug, Clone, Default)]
pub struct MeanAccumulator {
    count: u64,
    mean: f64,
}

impl MeanAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new value to the running statistics
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let n = self.count as f64;
        self.mean += value / n - self.mean / n;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> Option<f64> {
        if self.count > 0 {
            Some(self.mean)
        } else {
            None
        }
    }
}
