//! Café daily and monthly revenue

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Days used to project daily figures to a month
pub const DAYS_IN_MONTH: f64 = 30.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CafeInput {
    /// Cost of one kilogram of coffee
    pub cost_per_kg: Option<f64>,
    /// Sale price of a single shot
    pub cost_single_shot: Option<f64>,
    /// Sale price of one kilogram of mix sold as beans
    #[serde(default)]
    pub sell_price_kg: f64,
    /// Sale price of a double shot
    #[serde(default)]
    pub cost_double_shot: f64,
    #[serde(default)]
    pub gram_single: f64,
    #[serde(default)]
    pub gram_double: f64,
    /// Non-coffee cost per shot (milk, cups, ...)
    #[serde(default)]
    pub other_cost_per_shot: f64,
    #[serde(default)]
    pub sales_single: f64,
    #[serde(default)]
    pub sales_double: f64,
    /// Kilograms of mix sold as beans per day
    #[serde(default)]
    pub sales_mix_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CafeReport {
    pub daily_revenue: f64,
    pub daily_cost: f64,
    pub daily_profit: f64,
    pub daily_kg_used: f64,
    pub monthly_revenue: f64,
    pub monthly_profit: f64,
    pub monthly_kg_used: f64,
}

pub fn calculate_cafe_revenue(input: &CafeInput) -> Result<CafeReport, ValidationError> {
    let cost_per_kg = input.cost_per_kg.filter(|v| *v > 0.0);
    let cost_single_shot = input.cost_single_shot.filter(|v| *v > 0.0);

    let (Some(cost_per_kg), Some(cost_single_shot)) = (cost_per_kg, cost_single_shot) else {
        let mut invalid = Vec::new();
        if cost_per_kg.is_none() {
            invalid.push("cost_per_kg".to_string());
        }
        if cost_single_shot.is_none() {
            invalid.push("cost_single_shot".to_string());
        }
        return Err(ValidationError::invalid_fields(invalid));
    };

    let daily_revenue = input.sales_single * cost_single_shot
        + input.sales_double * input.cost_double_shot
        + input.sales_mix_kg * input.sell_price_kg;

    let grams_used = input.sales_single * input.gram_single
        + input.sales_double * input.gram_double
        + input.sales_mix_kg * 1000.0;
    let daily_kg_used = grams_used / 1000.0;

    let coffee_cost = daily_kg_used * cost_per_kg;
    let other_cost = (input.sales_single + input.sales_double) * input.other_cost_per_shot;
    let daily_cost = coffee_cost + other_cost;
    let daily_profit = daily_revenue - daily_cost;

    Ok(CafeReport {
        daily_revenue,
        daily_cost,
        daily_profit,
        daily_kg_used,
        monthly_revenue: daily_revenue * DAYS_IN_MONTH,
        monthly_profit: daily_profit * DAYS_IN_MONTH,
        monthly_kg_used: daily_kg_used * DAYS_IN_MONTH,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn daily_and_monthly_figures() {
        let input = CafeInput {
            cost_per_kg: Some(1_000_000.0),
            cost_single_shot: Some(50_000.0),
            sell_price_kg: 1_500_000.0,
            cost_double_shot: 80_000.0,
            gram_single: 9.0,
            gram_double: 18.0,
            other_cost_per_shot: 5_000.0,
            sales_single: 100.0,
            sales_double: 50.0,
            sales_mix_kg: 1.0,
        };
        let report = calculate_cafe_revenue(&input).unwrap();

        // 100*50k + 50*80k + 1*1.5M
        assert!(close(report.daily_revenue, 10_500_000.0));
        // (900 + 900 + 1000) g
        assert!(close(report.daily_kg_used, 2.8));
        // 2.8kg * 1M + 150 shots * 5k
        assert!(close(report.daily_cost, 3_550_000.0));
        assert!(close(report.daily_profit, 6_950_000.0));
        assert!(close(report.monthly_revenue, 315_000_000.0));
        assert!(close(report.monthly_profit, 208_500_000.0));
        assert!(close(report.monthly_kg_used, 84.0));
    }

    #[test]
    fn optional_fields_default_to_zero() {
        let input: CafeInput = serde_json::from_str(
            r#"{"cost_per_kg": 900000, "cost_single_shot": 40000, "sales_single": 10}"#,
        )
        .unwrap();
        let report = calculate_cafe_revenue(&input).unwrap();
        assert!(close(report.daily_revenue, 400_000.0));
        assert!(close(report.daily_cost, 0.0));
    }

    #[test]
    fn required_prices_must_be_positive() {
        let err = calculate_cafe_revenue(&CafeInput {
            cost_per_kg: Some(0.0),
            ..CafeInput::default()
        })
        .unwrap_err();
        assert_eq!(
            err.fields,
            vec!["cost_per_kg".to_string(), "cost_single_shot".to_string()]
        );
    }
}
