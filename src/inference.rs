use crate::missing::MissingSentinels;
use crate::types::ColumnKind;

/// Numeric vs categorical inference state for a column
#[derive(Debug, Clone)]
pub struct KindInferencer {
    /// Non-missing cells that parse as a finite number
    numeric_count: u64,
    /// Non-missing cells that don't
    text_count: u64,
    /// Minimum numeric share for a numeric verdict
    threshold: f64,
}

impl KindInferencer {
    pub fn new(threshold: f64) -> Self {
        Self {
            numeric_count: 0,
            text_count: 0,
            threshold,
        }
    }

    /// Add a value for inference
    pub fn observe(&mut self, value: &str, sentinels: &MissingSentinels) {
        if sentinels.is_missing(value) {
            return;
        }

        if is_numeric(value) {
            self.numeric_count += 1;
        } else {
            self.text_count += 1;
        }
    }

    /// Get the inferred kind. A column with nothing but missing cells is numeric.
    pub fn inferred_kind(&self) -> ColumnKind {
        let observed = self.numeric_count + self.text_count;
        if observed == 0 {
            return ColumnKind::Numeric;
        }

        let share = self.numeric_count as f64 / observed as f64;
        if self.numeric_count > 0 && share >= self.threshold {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }
}

/// Classify a column's cells in one pass
pub fn classify_column<'a>(
    cells: impl IntoIterator<Item = &'a str>,
    sentinels: &MissingSentinels,
    threshold: f64,
) -> ColumnKind {
    let mut inferencer = KindInferencer::new(threshold);
    for cell in cells {
        inferencer.observe(cell, sentinels);
    }
    inferencer.inferred_kind()
}

/// Check if a value is numeric (integer or float)
pub fn is_numeric(value: &str) -> bool {
    parse_numeric(value).is_some()
}

/// Parse a numeric value. `NaN` and infinities are not numbers for our purposes.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
