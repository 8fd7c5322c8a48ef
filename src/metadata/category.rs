//! Filename → category classification.
//!
//! Rules are tried top to bottom, first match wins. Prefix rules are
//! case-sensitive and list the accepted spellings; substring rules look at
//! the lowercased filename.

use crate::catalog::Category;

enum Pattern {
    Prefix(&'static [&'static str]),
    Contains(&'static [&'static str]),
}

impl Pattern {
    fn matches(&self, filename: &str, lowered: &str) -> bool {
        match self {
            Pattern::Prefix(prefixes) => prefixes.iter().any(|p| filename.starts_with(p)),
            Pattern::Contains(needles) => needles.iter().any(|n| lowered.contains(n)),
        }
    }
}

const RULES: &[(&[Pattern], Category)] = &[
    (&[Pattern::Prefix(&["SOLANA-", "solana-"])], Category::Solana),
    (&[Pattern::Prefix(&["SLM-", "slm-"])], Category::Slm),
    (&[Pattern::Prefix(&["KYA-", "kya-", "X402-"])], Category::Kya),
    (
        &[
            Pattern::Prefix(&["VC-", "SERIES-", "FUNDING-"]),
            Pattern::Contains(&["funding", "investor"]),
        ],
        Category::Vc,
    ),
    (
        &[Pattern::Prefix(&["VERTICAL-"]), Pattern::Contains(&["vertical"])],
        Category::Vertical,
    ),
    (&[Pattern::Contains(&["cross-chain"])], Category::CrossChain),
    (&[Pattern::Prefix(&["CEO-DEFI"])], Category::Vertical),
    (&[Pattern::Prefix(&["CEO-RESEARCH"])], Category::Solana),
];

/// Category for a report filename; `slm` when nothing matches
pub fn classify(filename: &str) -> Category {
    let lowered = filename.to_lowercase();
    RULES
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| p.matches(filename, &lowered)))
        .map(|(_, category)| *category)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_rules() {
        assert_eq!(classify("SOLANA-x.html"), Category::Solana);
        assert_eq!(classify("solana-validators-2026-01-02.html"), Category::Solana);
        assert_eq!(classify("SLM-edge-inference.html"), Category::Slm);
        assert_eq!(classify("kya-report.html"), Category::Kya);
        assert_eq!(classify("X402-payments.html"), Category::Kya);
        assert_eq!(classify("SERIES-A-deck.html"), Category::Vc);
        assert_eq!(classify("VERTICAL-legal-agents.html"), Category::Vertical);
    }

    #[test]
    fn test_substring_rules_ignore_case() {
        assert_eq!(classify("VC-funding-round.html"), Category::Vc);
        assert_eq!(classify("market-INVESTOR-map.html"), Category::Vc);
        assert_eq!(classify("healthcare-Vertical-study.html"), Category::Vertical);
        assert_eq!(classify("Cross-Chain-bridges.html"), Category::CrossChain);
    }

    #[test]
    fn test_rule_order_first_match_wins() {
        // prefix beats a later substring rule
        assert_eq!(classify("SOLANA-funding-2026-01-01.html"), Category::Solana);
        // substring rule for vc sits above the CEO-DEFI prefix rule
        assert_eq!(classify("CEO-DEFI-funding.html"), Category::Vc);
        assert_eq!(classify("CEO-DEFI-agents.html"), Category::Vertical);
        assert_eq!(classify("CEO-RESEARCH-cross-chain.html"), Category::CrossChain);
        assert_eq!(classify("CEO-RESEARCH-vibe.html"), Category::Solana);
    }

    #[test]
    fn test_prefixes_are_case_sensitive() {
        // "Solana-" is not one of the accepted spellings
        assert_eq!(classify("Solana-notes.html"), Category::Slm);
        assert_eq!(classify("x402-notes.html"), Category::Slm);
    }

    #[test]
    fn test_default_category() {
        assert_eq!(classify("random-report.html"), Category::Slm);
        assert_eq!(classify(""), Category::Slm);
    }
}
