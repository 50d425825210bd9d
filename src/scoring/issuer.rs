//! Issuer trust classification.
//!
//! A linear scan over the ordered trust tiers: the first rule with a
//! keyword substring match wins. Tiers are declared strongest-credit-first
//! so a broad default never shadows a specific match.
//!
//! Issuers matching no rule are worth flagging to whoever maintains the
//! rule table, so they are captured in a concurrent set (scoring fans out
//! across threads) that the pipeline drains into an alert file at the end.

use dashmap::DashSet;

use crate::domain::TrustRule;

/// Sentinel for blank issuer names: malformed input, not an unrated issuer.
const NO_TRUST: f64 = 0.0;

pub struct IssuerTrust<'a> {
    rules: &'a [TrustRule],
    default_trust: f64,
    unknown: DashSet<String>,
}

impl<'a> IssuerTrust<'a> {
    pub fn new(rules: &'a [TrustRule], default_trust: f64) -> Self {
        Self {
            rules,
            default_trust,
            unknown: DashSet::new(),
        }
    }

    /// Trust score for a raw issuer name.
    ///
    /// Blank names return the no-trust sentinel and are never recorded;
    /// non-blank names matching no rule are captured once and get the
    /// configured default.
    pub fn trust_score(&self, issuer: &str) -> f64 {
        if issuer.trim().is_empty() {
            return NO_TRUST;
        }

        let normalized = issuer.to_uppercase();
        for rule in self.rules {
            if rule.keywords.iter().any(|k| normalized.contains(k)) {
                return rule.trust;
            }
        }

        self.unknown.insert(issuer.to_string());
        self.default_trust
    }

    /// Issuers that matched no rule so far, sorted for stable output.
    pub fn unknown_issuers(&self) -> Vec<String> {
        let mut out: Vec<String> = self.unknown.iter().map(|e| e.key().clone()).collect();
        out.sort();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RefData;

    fn trust(data: &RefData) -> IssuerTrust<'_> {
        IssuerTrust::new(&data.trust_rules, data.default_trust)
    }

    #[test]
    fn keyword_substring_match_hits_the_right_tier() {
        let data = RefData::load(None).unwrap();
        let t = trust(&data);
        assert!((t.trust_score("ITALY VALORE") - 0.85).abs() < 1e-9);
        assert!((t.trust_score("BUNDESREPUBLIK DEUTSCHLAND") - 1.00).abs() < 1e-9);
        assert!(t.unknown_issuers().is_empty());
    }

    #[test]
    fn declaration_order_wins_over_later_tiers() {
        let data = RefData::load(None).unwrap();
        let t = trust(&data);
        // "REPUBBLICA GRECA" also contains no stronger tier's keyword, and
        // must land on the Greece tier rather than any broader default.
        assert!((t.trust_score("REPUBBLICA GRECA") - 0.72).abs() < 1e-9);
    }

    #[test]
    fn unknown_issuer_captured_exactly_once() {
        let data = RefData::load(None).unwrap();
        let t = trust(&data);

        for _ in 0..5 {
            assert!((t.trust_score("GOTHAM CITY TREASURY") - data.default_trust).abs() < 1e-9);
        }
        assert_eq!(t.unknown_issuers(), vec!["GOTHAM CITY TREASURY".to_string()]);
    }

    #[test]
    fn blank_issuer_is_no_trust_and_not_recorded() {
        let data = RefData::load(None).unwrap();
        let t = trust(&data);
        assert_eq!(t.trust_score(""), 0.0);
        assert_eq!(t.trust_score("   "), 0.0);
        assert!(t.unknown_issuers().is_empty());
    }
}
