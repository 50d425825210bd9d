//! ECB daily reference-rate provider.
//!
//! The ECB publishes one XML document per business day with EUR cross rates
//! (`<Cube currency="USD" rate="1.0812"/>`). We only need the currency/rate
//! attribute pairs, so a line-level regex extraction keeps the dependency
//! footprint small.

use std::collections::HashMap;

use regex::Regex;
use reqwest::blocking::Client;

use crate::error::AppError;

const ECB_FX_URL: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml";

const HTTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(15);

/// EUR-pivot exchange-rate table.
///
/// `rate(ccy)` is the ECB convention: units of `ccy` per 1 EUR. EUR itself
/// is always present with rate 1.0.
#[derive(Debug, Clone)]
pub struct FxRates {
    rates: HashMap<String, f64>,
}

impl FxRates {
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        let mut rates: HashMap<String, f64> = pairs
            .iter()
            .map(|(ccy, rate)| (ccy.to_string(), *rate))
            .collect();
        rates.insert("EUR".to_string(), 1.0);
        Self { rates }
    }

    /// Units of `ccy` per 1 EUR.
    pub fn rate(&self, ccy: &str) -> Option<f64> {
        self.rates.get(ccy).copied()
    }

    /// Spot cross-rate via the EUR pivot: units of `to` per unit of `from`.
    pub fn cross(&self, from: &str, to: &str) -> Option<f64> {
        Some(self.rate(to)? / self.rate(from)?)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

pub struct EcbClient {
    client: Client,
    url: String,
}

impl EcbClient {
    /// Build a client, honoring an `ECB_FX_URL` override from the
    /// environment (useful for tests and mirrors).
    pub fn from_env() -> Self {
        let url = std::env::var("ECB_FX_URL").unwrap_or_else(|_| ECB_FX_URL.to_string());
        Self {
            client: Client::new(),
            url,
        }
    }

    /// Fetch today's reference rates.
    pub fn fetch_rates(&self) -> Result<FxRates, AppError> {
        let body = self
            .client
            .get(&self.url)
            .timeout(HTTP_TIMEOUT)
            .send()
            .map_err(|e| AppError::data(format!("ECB request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::data(format!("ECB request failed: {e}")))?
            .text()
            .map_err(|e| AppError::data(format!("Failed to read ECB response: {e}")))?;

        let rates = parse_cube_rates(&body)?;
        if rates.len() <= 1 {
            return Err(AppError::data("ECB response contained no rates."));
        }
        Ok(rates)
    }
}

/// Extract `currency`/`rate` attribute pairs from the ECB cube XML.
fn parse_cube_rates(xml: &str) -> Result<FxRates, AppError> {
    let re = Regex::new(r#"currency=['"]([A-Z]{3})['"]\s+rate=['"]([0-9][0-9.]*)['"]"#)
        .map_err(|e| AppError::data(format!("Bad ECB rate pattern: {e}")))?;

    let mut pairs = Vec::new();
    for cap in re.captures_iter(xml) {
        let ccy = &cap[1];
        let rate: f64 = cap[2]
            .parse()
            .map_err(|e| AppError::data(format!("Invalid ECB rate for {ccy}: {e}")))?;
        if rate.is_finite() && rate > 0.0 {
            pairs.push((ccy.to_string(), rate));
        }
    }

    let borrowed: Vec<(&str, f64)> = pairs.iter().map(|(c, r)| (c.as_str(), *r)).collect();
    Ok(FxRates::from_pairs(&borrowed))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_XML: &str = r#"
        <gesmes:Envelope>
          <Cube>
            <Cube time="2026-08-07">
              <Cube currency="USD" rate="1.0812"/>
              <Cube currency="CHF" rate="0.9417"/>
              <Cube currency="JPY" rate="163.25"/>
            </Cube>
          </Cube>
        </gesmes:Envelope>"#;

    #[test]
    fn parses_cube_attributes() {
        let rates = parse_cube_rates(SAMPLE_XML).unwrap();
        assert!((rates.rate("USD").unwrap() - 1.0812).abs() < 1e-12);
        assert!((rates.rate("EUR").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(rates.rate("SEK"), None);
    }

    #[test]
    fn cross_rate_uses_eur_pivot() {
        let rates = parse_cube_rates(SAMPLE_XML).unwrap();
        // USD -> CHF: CHF per USD = 0.9417 / 1.0812
        let usd_chf = rates.cross("USD", "CHF").unwrap();
        assert!((usd_chf - 0.9417 / 1.0812).abs() < 1e-12);
        // and the inverse direction is the reciprocal.
        let chf_usd = rates.cross("CHF", "USD").unwrap();
        assert!((usd_chf * chf_usd - 1.0).abs() < 1e-12);
    }
}
