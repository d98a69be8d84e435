//! Blended price of a bean mix

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Most bean rows a mix may have
pub const MAX_BEANS: usize = 5;

/// Price increase applied for a one-month purchase
pub const MONTHLY_INCREASE: f64 = 1.06;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeanRow {
    #[serde(default)]
    pub name: String,
    /// Price per kilogram
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub weight_grams: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MixInput {
    #[serde(default)]
    pub beans: Vec<BeanRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixReport {
    pub total_percentage: f64,
    /// Price per kilogram from the entered weights
    pub price_by_weight: Option<f64>,
    /// Price per kilogram from the entered percentages (only when they sum to 100)
    pub price_by_percentage: Option<f64>,
    pub monthly_price_by_weight: Option<f64>,
    pub monthly_price_by_percentage: Option<f64>,
}

pub fn calculate_mix_price(input: &MixInput) -> Result<MixReport, ValidationError> {
    if input.beans.len() > MAX_BEANS {
        return Err(ValidationError::new(
            format!("A mix can have at most {} beans", MAX_BEANS),
            vec!["beans".to_string()],
        ));
    }

    let mut total_percentage = 0.0;
    let mut total_weight = 0.0;
    let mut cost_from_weight = 0.0;
    let mut price_from_percentage = 0.0;

    for bean in &input.beans {
        total_percentage += bean.percentage;

        if bean.weight_grams > 0.0 && bean.price > 0.0 {
            total_weight += bean.weight_grams;
            cost_from_weight += bean.weight_grams / 1000.0 * bean.price;
        }

        if bean.percentage > 0.0 && bean.price > 0.0 {
            price_from_percentage += bean.percentage / 100.0 * bean.price;
        }
    }

    let price_by_weight = (total_weight > 0.0).then(|| cost_from_weight / (total_weight / 1000.0));
    let price_by_percentage = (total_percentage.round() == 100.0).then_some(price_from_percentage);

    if price_by_weight.is_none() && price_by_percentage.is_none() {
        return Err(ValidationError::new(
            "Enter weights, or percentages adding up to 100, to price the mix",
            vec!["beans".to_string()],
        ));
    }

    Ok(MixReport {
        total_percentage,
        price_by_weight,
        price_by_percentage,
        monthly_price_by_weight: price_by_weight.map(|p| p * MONTHLY_INCREASE),
        monthly_price_by_percentage: price_by_percentage.map(|p| p * MONTHLY_INCREASE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bean(price: f64, percentage: f64, weight_grams: f64) -> BeanRow {
        BeanRow {
            name: String::new(),
            price,
            percentage,
            weight_grams,
        }
    }

    fn close(a: Option<f64>, b: f64) -> bool {
        a.map_or(false, |a| (a - b).abs() < 1e-6)
    }

    #[test]
    fn prices_by_percentage_and_weight() {
        let input = MixInput {
            beans: vec![bean(1_000_000.0, 70.0, 700.0), bean(600_000.0, 30.0, 300.0)],
        };
        let report = calculate_mix_price(&input).unwrap();
        assert!(close(report.price_by_percentage, 880_000.0));
        assert!(close(report.price_by_weight, 880_000.0));
        assert!(close(report.monthly_price_by_percentage, 932_800.0));
    }

    #[test]
    fn weight_only_when_percentages_do_not_sum_to_100() {
        let input = MixInput {
            beans: vec![bean(1_000_000.0, 50.0, 250.0), bean(500_000.0, 0.0, 750.0)],
        };
        let report = calculate_mix_price(&input).unwrap();
        assert_eq!(report.price_by_percentage, None);
        assert!(close(report.price_by_weight, 625_000.0));
    }

    #[test]
    fn percentage_rounds_to_100() {
        let input = MixInput {
            beans: vec![bean(100.0, 33.4, 0.0), bean(100.0, 33.3, 0.0), bean(100.0, 33.4, 0.0)],
        };
        let report = calculate_mix_price(&input).unwrap();
        assert!(close(report.price_by_percentage, 100.1));
        assert_eq!(report.price_by_weight, None);
    }

    #[test]
    fn nothing_to_price_is_rejected() {
        let err = calculate_mix_price(&MixInput {
            beans: vec![bean(0.0, 20.0, 0.0)],
        })
        .unwrap_err();
        assert_eq!(err.fields, vec!["beans".to_string()]);
    }

    #[test]
    fn too_many_beans_is_rejected() {
        let beans = (0..6).map(|_| bean(1.0, 10.0, 10.0)).collect();
        assert!(calculate_mix_price(&MixInput { beans }).is_err());
    }
}
