//! Roast shrinkage and cost per roasted kilogram

use serde::{Deserialize, Serialize};

use super::{ValidationError, CURRENCY};
use crate::utils::format_currency;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoastInput {
    /// Green beans loaded into one batch, grams
    pub batch_input: Option<f64>,
    /// Roasted beans out of that batch, grams
    pub batch_output: Option<f64>,
    /// Green bean price per kilogram
    #[serde(default)]
    pub green_price: f64,
    /// Roasting wage per kilogram of green beans
    #[serde(default)]
    pub roast_wage: f64,
    /// Green beans roasted today, kilograms
    #[serde(default)]
    pub total_green: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoastReport {
    pub weight_loss_percent: f64,
    /// Cost per kilogram of roasted coffee, 0 when nothing was roasted
    pub cost_per_kg_roasted: f64,
    pub cost_per_kg_display: String,
    pub batch_output: f64,
    /// Kilograms of roasted coffee produced from `total_green`
    pub total_roasted_output: f64,
}

pub fn calculate_roast(input: &RoastInput) -> Result<RoastReport, ValidationError> {
    let mut invalid = Vec::new();

    let batch_input = input.batch_input.filter(|v| *v > 0.0);
    if batch_input.is_none() {
        invalid.push("batch_input".to_string());
    }

    // An absent input cannot be exceeded, only a present one.
    let batch_output = input.batch_output.filter(|out| {
        *out >= 0.0 && input.batch_input.map_or(true, |inp| *out <= inp)
    });
    if batch_output.is_none() {
        invalid.push("batch_output".to_string());
    }

    let (Some(batch_input), Some(batch_output)) = (batch_input, batch_output) else {
        return Err(ValidationError::invalid_fields(invalid));
    };

    let weight_loss_percent = (batch_input - batch_output) / batch_input * 100.0;
    let total_roasted_output = input.total_green * (1.0 - weight_loss_percent / 100.0);

    let cost_per_kg_roasted = if total_roasted_output > 0.0 {
        let overall_cost = (input.green_price + input.roast_wage) * input.total_green;
        overall_cost / total_roasted_output
    } else {
        0.0
    };

    Ok(RoastReport {
        weight_loss_percent,
        cost_per_kg_roasted,
        cost_per_kg_display: format!("{} {}/kg", format_currency(cost_per_kg_roasted), CURRENCY),
        batch_output,
        total_roasted_output,
    })
}
