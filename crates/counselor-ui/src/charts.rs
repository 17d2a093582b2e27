//! Numeric inputs for the external chart renderer.
//!
//! Only the data shapes live here; layout and drawing belong to whatever
//! renders the view.

use counselor_core::types::Facts;

/// Single-series bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub labels: Vec<String>,
    pub series: Vec<f64>,
    pub name: String,
}

impl BarChart {
    /// Offers, students placed, and companies visited in 2022–23.
    pub fn placement_counts(facts: &Facts) -> Self {
        Self {
            labels: vec![
                "Offers".to_string(),
                "Students placed".to_string(),
                "Companies visited".to_string(),
            ],
            series: vec![
                f64::from(facts.offers_2023),
                f64::from(facts.placed_2023),
                f64::from(facts.companies_2023),
            ],
            name: "2022–23".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// Two-slice pie derived from a placed percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Placed vs remaining. The percentage is clamped into 0..=100.
    pub fn placed(percent: f64) -> Self {
        let placed = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let remaining = 100.0 - placed;
        Self {
            slices: vec![
                PieSlice {
                    label: format!("Placed ({}%)", placed),
                    value: placed,
                },
                PieSlice {
                    label: format!("Remaining ({:.1}%)", remaining),
                    value: remaining,
                },
            ],
        }
    }
}
