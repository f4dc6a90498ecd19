//! mediagen-pricing: display price estimates per provider and model.
//!
//! The table mirrors the vendors' published rates. Models without an
//! entry produce `None`; the UI shows nothing rather than a zero.

mod table;

use mediagen_types::ProviderId;
use serde::{Deserialize, Serialize};

pub use table::price_table;

/// Currency a price is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    Cny,
    Usd,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Cny => "¥",
            Currency::Usd => "$",
        }
    }
}

/// A computed price: a single amount or a range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Amount(f64),
    Range { min: f64, max: f64 },
}

/// Parameters a price calculator may consult.
///
/// One bag covers all models; each calculator reads the handful of fields
/// it cares about and falls back to that model's defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceParams {
    pub num_images: Option<u32>,
    pub max_images: Option<u32>,
    pub duration: Option<u32>,
    pub resolution: Option<String>,
    pub image_size: Option<String>,
    pub aspect_ratio: Option<String>,
    pub mode: Option<String>,
    pub tier: Option<String>,
    pub fast_mode: Option<bool>,
    pub audio: Option<bool>,
    pub has_image: Option<bool>,
    pub text_length: Option<usize>,
    pub audio_spec: Option<String>,
    pub retake_duration: Option<u32>,
}

/// How a model's price is determined.
pub enum PricingKind {
    Fixed(f64),
    Calculated(fn(&PriceParams) -> PriceValue),
}

/// Price configuration for one `(provider, model)` pair.
pub struct PricingConfig {
    pub provider: ProviderId,
    pub model_id: &'static str,
    pub currency: Currency,
    pub kind: PricingKind,
}

/// Look up the pricing config for a model.
pub fn pricing_config(provider: ProviderId, model_id: &str) -> Option<PricingConfig> {
    price_table()
        .into_iter()
        .find(|config| config.provider == provider && config.model_id == model_id)
}

/// Compute the display price for a model, or `None` when the model has no
/// pricing entry.
pub fn calculate_price(
    provider: ProviderId,
    model_id: &str,
    params: &PriceParams,
) -> Option<PriceValue> {
    let config = pricing_config(provider, model_id)?;
    Some(match config.kind {
        PricingKind::Fixed(amount) => PriceValue::Amount(amount),
        PricingKind::Calculated(calculator) => calculator(params),
    })
}

/// Format an amount for display: four decimals under one unit, two
/// otherwise, with trailing zeros stripped.
pub fn format_amount(amount: f64) -> String {
    let formatted = if amount < 1.0 {
        format!("{amount:.4}")
    } else {
        format!("{amount:.2}")
    };
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format a price value, rendering ranges as `min~max`.
pub fn format_price(value: &PriceValue) -> String {
    match value {
        PriceValue::Amount(amount) => format_amount(*amount),
        PriceValue::Range { min, max } => {
            format!("{}~{}", format_amount(*min), format_amount(*max))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.039), "0.039");
        assert_eq!(format_amount(0.2758), "0.2758");
        assert_eq!(format_amount(2.5), "2.5");
        assert_eq!(format_amount(3.0), "3");
        assert_eq!(format_amount(12.345), "12.35");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn test_format_range() {
        let value = PriceValue::Range { min: 0.5, max: 2.0 };
        assert_eq!(format_price(&value), "0.5~2");
    }

    #[test]
    fn test_missing_entry_is_none() {
        assert!(calculate_price(ProviderId::Kie, "kie-z-image", &PriceParams::default()).is_none());
    }

    #[test]
    fn test_fixed_entry() {
        let value = calculate_price(ProviderId::Ppio, "vidu-q1", &PriceParams::default()).unwrap();
        assert_eq!(value, PriceValue::Amount(2.25));
    }
}
