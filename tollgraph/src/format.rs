//! Display formatting of path costs.
//!
//! Formatting is applied at the boundary only, all comparisons inside the algorithms work on
//! the raw weights.
use serde::{Deserialize, Serialize};

pub trait FormatCost {
    fn format_cost(&self, cost: f64) -> String;
}

/// Formats costs as `{prefix}{cost}{suffix}`, for example `"$ 12.50"` or `"340 km"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostFormat {
    pub prefix: String,
    pub suffix: String,

    /// number of decimal places. `None` keeps the shortest representation of the value.
    pub precision: Option<usize>,
}

impl CostFormat {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }
}

impl FormatCost for CostFormat {
    fn format_cost(&self, cost: f64) -> String {
        let value = if cost.is_infinite() && cost.is_sign_positive() {
            "∞".to_string()
        } else if let Some(precision) = self.precision {
            format!("{:.*}", precision, cost)
        } else {
            cost.to_string()
        };
        format!("{}{}{}", self.prefix, value, self.suffix)
    }
}

impl<F> FormatCost for F
where
    F: Fn(f64) -> String,
{
    fn format_cost(&self, cost: f64) -> String {
        self(cost)
    }
}
