use serde::{Deserialize, Deserializer, Serialize};

use storefront_core::ValueObject;

/// Price sub-record carried by every catalog product.
///
/// Both the list and the detail endpoint send this shape; list products add
/// `member_price` and `subscription_price`, which default to 0 elsewhere.
/// Prices the API omits (or sends as `null`) read as 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sale {
    pub currency: String,
    #[serde(deserialize_with = "lenient_price")]
    pub regular_price: f64,
    #[serde(deserialize_with = "lenient_price")]
    pub offer_price: f64,
    pub offer_label: Option<String>,
    pub offer_type: Option<String>,
    pub vat_text: String,
    #[serde(deserialize_with = "lenient_price")]
    pub member_price: f64,
    #[serde(deserialize_with = "lenient_price")]
    pub subscription_price: f64,
}

impl ValueObject for Sale {}

impl Sale {
    pub fn new(currency: impl Into<String>, regular_price: f64, offer_price: f64) -> Self {
        Self {
            currency: currency.into(),
            regular_price,
            offer_price,
            ..Self::default()
        }
    }

    /// Price used for cart arithmetic: the offer price as sent, or 0 when it
    /// is missing or not a finite number.
    pub fn unit_price(&self) -> f64 {
        if self.offer_price.is_finite() {
            self.offer_price
        } else {
            0.0
        }
    }

    /// Price shown on cards and detail pages: offer price, falling back to the
    /// regular price when no offer is set.
    pub fn display_price(&self) -> f64 {
        if self.offer_price != 0.0 {
            self.offer_price
        } else {
            self.regular_price
        }
    }

    pub fn has_discount(&self) -> bool {
        self.regular_price > self.offer_price
    }

    /// Whole-percent discount of the offer against the regular price.
    pub fn discount_percent(&self) -> u32 {
        if !self.has_discount() || self.regular_price <= 0.0 {
            return 0;
        }
        ((1.0 - self.offer_price / self.regular_price) * 100.0).round() as u32
    }

    /// `"AED 12.50"`.
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{} {:.2}", self.currency, amount)
    }

    pub fn formatted_display_price(&self) -> String {
        self.format_amount(self.display_price())
    }

    /// Struck-through regular price, only when an offer undercuts it.
    pub fn formatted_regular_price(&self) -> Option<String> {
        self.has_discount()
            .then(|| self.format_amount(self.regular_price))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawPrice>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawPrice::Number(n)) => n,
        Some(RawPrice::Text(s)) => s.trim().parse().unwrap_or(0.0),
        None => 0.0,
    })
}
