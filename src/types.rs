//! Core data types for the spot-price dataset

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One hourly spot price for a single price area.
///
/// Field names follow the upstream payload. Prices are republished as
/// strings: a JSON number is kept as its source text (serde_json is built
/// with `arbitrary_precision`), and `null` stays `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "HourDKM", default)]
    pub hour_dkm: Option<String>,

    #[serde(rename = "PriceArea")]
    pub price_area: String,

    #[serde(rename = "SpotPriceDKK", default, deserialize_with = "price_text")]
    pub spot_price_dkk: Option<String>,

    #[serde(rename = "SpotPriceEUR", default, deserialize_with = "price_text")]
    pub spot_price_eur: Option<String>,
}

/// Accept a string, a number or null for a price field.
fn price_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        other => Err(de::Error::invalid_type(
            unexpected(&other),
            &"a price as string, number or null",
        )),
    }
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
        _ => de::Unexpected::Other("value"),
    }
}

/// The records of one `Elspotprices` response, in upstream order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDataset {
    pub records: Vec<PriceRecord>,
}

impl PriceDataset {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    /// Dataset returned in place of a failed upstream fetch
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
