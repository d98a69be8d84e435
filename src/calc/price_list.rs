//! Retail price list built from purchase prices and profit margins

use serde::{Deserialize, Serialize};

use super::{ValidationError, CURRENCY};
use crate::utils::format_currency;

const DEFAULT_BRAND: &str = "Your Cafe";
const DEFAULT_SOCIAL_ID: &str = "@your_cafe";

pub const COFFEE_TYPES: &[&str] = &[
    "Vietnam", "Brazil", "Cherry", "Colombia", "Indonesia", "PB", "Uganda",
    "Ethiopia", "Kenya", "Yemen", "Guatemala", "Honduras", "Peru", "Mexico",
    "Panama", "Costa Rica", "Indonesia Arabica", "Java Arabica", "Bourbon",
    "Typica", "Indonesia Robusta", "Brazil Robusta", "India Robusta",
    "70/30 Arabica Mix", "50/50 Mix", "100 Arabica", "100 Robusta", "70/30 Robusta Mix",
];

pub const POWDER_TYPES: &[&str] = &[
    "Hot Chocolate", "White Chocolate", "Masala Chai", "Salep", "Cappuccino", "Coffee Mix",
];

pub const ROAST_TYPES: &[&str] = &["Medium", "Chocolate", "Dark"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Coffee,
    Powder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceItem {
    pub name: String,
    pub kind: ItemKind,
    /// Roast level, coffee only
    #[serde(default)]
    pub roast: Option<String>,
    pub purchase_price: f64,
    pub profit_percent: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceListInput {
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub social_id: Option<String>,
    #[serde(default)]
    pub items: Vec<PriceItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedItem {
    /// Name with the roast level in parentheses when present
    pub title: String,
    pub price: f64,
    pub price_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceList {
    pub brand_name: String,
    pub social_id: String,
    pub coffee: Vec<PricedItem>,
    pub powder: Vec<PricedItem>,
    /// Plain-text rendering of the whole list
    pub text: String,
    /// Suggested download name
    pub file_name: String,
}

/// Selling price after adding `profit_percent` to `purchase_price`
pub fn final_price(purchase_price: f64, profit_percent: f64) -> f64 {
    purchase_price * (1.0 + profit_percent / 100.0)
}

fn non_blank(value: &Option<String>, fallback: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

pub fn build_price_list(input: &PriceListInput) -> Result<PriceList, ValidationError> {
    if input.items.is_empty() {
        return Err(ValidationError::new(
            "Enter at least one item to build a price list",
            vec!["items".to_string()],
        ));
    }

    let mut invalid = Vec::new();
    for (i, item) in input.items.iter().enumerate() {
        if !(item.purchase_price > 0.0) {
            invalid.push(format!("items[{}].purchase_price", i));
        }
        if !(item.profit_percent >= 0.0) {
            invalid.push(format!("items[{}].profit_percent", i));
        }
    }
    if !invalid.is_empty() {
        return Err(ValidationError::invalid_fields(invalid));
    }

    let mut coffee = Vec::new();
    let mut powder = Vec::new();
    for item in &input.items {
        let price = final_price(item.purchase_price, item.profit_percent);
        let roast = item.roast.as_deref().map(str::trim).filter(|r| !r.is_empty());
        let title = match (item.kind, roast) {
            (ItemKind::Coffee, Some(roast)) => format!("{} ({})", item.name, roast),
            _ => item.name.clone(),
        };
        let priced = PricedItem {
            title,
            price,
            price_display: format!("{} {}", format_currency(price), CURRENCY),
        };
        match item.kind {
            ItemKind::Coffee => coffee.push(priced),
            ItemKind::Powder => powder.push(priced),
        }
    }

    let brand_name = non_blank(&input.brand_name, DEFAULT_BRAND);
    let social_id = non_blank(&input.social_id, DEFAULT_SOCIAL_ID);
    let text = render_text(&brand_name, &social_id, &coffee, &powder);
    let file_name = format!(
        "{}-price-list.txt",
        brand_name.split_whitespace().collect::<Vec<_>>().join("-")
    );

    Ok(PriceList {
        brand_name,
        social_id,
        coffee,
        powder,
        text,
        file_name,
    })
}

fn render_text(brand: &str, social: &str, coffee: &[PricedItem], powder: &[PricedItem]) -> String {
    let mut out = format!("{}\n", brand);
    for (heading, items) in [("Coffee Beans", coffee), ("Powdered Products", powder)] {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{}\n", heading));
        for item in items {
            out.push_str(&format!("  {} .... {}\n", item.title, item.price_display));
        }
    }
    out.push_str(&format!("\n{}\n", social));
    out
}

/// Known product and roast names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub coffee: Vec<String>,
    pub powder: Vec<String>,
    pub roasts: Vec<String>,
}

/// Case-insensitive prefix search over the catalog. An empty query matches everything.
pub fn search_catalog(query: &str) -> Catalog {
    let needle = query.trim().to_lowercase();
    let filter = |names: &[&str]| -> Vec<String> {
        names
            .iter()
            .filter(|name| name.to_lowercase().starts_with(&needle))
            .map(|name| name.to_string())
            .collect()
    };

    Catalog {
        coffee: filter(COFFEE_TYPES),
        powder: filter(POWDER_TYPES),
        roasts: ROAST_TYPES.iter().map(|r| r.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, kind: ItemKind, roast: Option<&str>, price: f64, profit: f64) -> PriceItem {
        PriceItem {
            name: name.to_string(),
            kind,
            roast: roast.map(str::to_string),
            purchase_price: price,
            profit_percent: profit,
        }
    }

    #[test]
    fn builds_sections_and_text() {
        let input = PriceListInput {
            brand_name: Some("Bean  Street".to_string()),
            social_id: None,
            items: vec![
                item("Brazil", ItemKind::Coffee, Some("Dark"), 1_000_000.0, 20.0),
                item("Salep", ItemKind::Powder, None, 250_000.0, 10.0),
            ],
        };
        let list = build_price_list(&input).unwrap();

        assert_eq!(list.coffee.len(), 1);
        assert_eq!(list.coffee[0].title, "Brazil (Dark)");
        assert_eq!(list.coffee[0].price_display, "1,200,000 Toman");
        assert_eq!(list.powder[0].price_display, "275,000 Toman");
        assert_eq!(list.social_id, "@your_cafe");
        assert_eq!(list.file_name, "Bean-Street-price-list.txt");
        assert!(list.text.contains("Coffee Beans\n  Brazil (Dark) .... 1,200,000 Toman"));
        assert!(list.text.contains("Powdered Products\n  Salep .... 275,000 Toman"));
    }

    #[test]
    fn blank_brand_falls_back() {
        let input = PriceListInput {
            brand_name: Some("   ".to_string()),
            items: vec![item("Cappuccino", ItemKind::Powder, None, 100.0, 0.0)],
            ..PriceListInput::default()
        };
        let list = build_price_list(&input).unwrap();
        assert_eq!(list.brand_name, "Your Cafe");
        assert!(!list.text.contains("Coffee Beans"));
    }

    #[test]
    fn rejects_empty_and_invalid_items() {
        assert!(build_price_list(&PriceListInput::default()).is_err());

        let input = PriceListInput {
            items: vec![
                item("Kenya", ItemKind::Coffee, Some("Medium"), 0.0, 10.0),
                item("Peru", ItemKind::Coffee, None, 10.0, -1.0),
            ],
            ..PriceListInput::default()
        };
        let err = build_price_list(&input).unwrap_err();
        assert_eq!(
            err.fields,
            vec![
                "items[0].purchase_price".to_string(),
                "items[1].profit_percent".to_string()
            ]
        );
    }

    #[test]
    fn catalog_search_matches_prefixes_case_insensitively() {
        let catalog = search_catalog("IN");
        assert_eq!(
            catalog.coffee,
            vec!["Indonesia", "Indonesia Arabica", "Indonesia Robusta", "India Robusta"]
        );
        assert!(catalog.powder.is_empty());
        assert_eq!(catalog.roasts.len(), 3);

        assert_eq!(search_catalog("").coffee.len(), COFFEE_TYPES.len());
        assert_eq!(search_catalog("c").powder, vec!["Cappuccino", "Coffee Mix"]);
    }

    #[test]
    fn catalog_search_ignores_inner_matches() {
        assert!(search_catalog("robusta").coffee.is_empty());
        assert!(search_catalog("chocolate").powder.is_empty());
        assert_eq!(search_catalog("70/30").coffee, vec!["70/30 Arabica Mix", "70/30 Robusta Mix"]);
    }
}
