//! Keyword rules deciding whether an unflagged amount is a debit or a credit.

use crate::types::DebitCredit;

/// Description fragments that mark money coming in.
pub const CREDIT_KEYWORDS: &[&str] = &[
    "salary", "interest", "refund", "cashback", "reversal", "credit", "neft in", "upi in",
];

/// Description fragments that mark money going out.
pub const DEBIT_KEYWORDS: &[&str] = &[
    "withdrawal",
    "atm",
    "payment",
    "debit",
    "imps",
    "upi",
    "pos",
    "recharge",
    "emi",
    "transfer out",
    "purchase",
];

/// Rules are checked in order; the first rule with a matching keyword decides.
pub const ROUTING_RULES: &[(DebitCredit, &[&str])] = &[
    (DebitCredit::Credit, CREDIT_KEYWORDS),
    (DebitCredit::Debit, DEBIT_KEYWORDS),
];

/// Direction implied by the description, if any keyword matches.
///
/// Matching is a case-insensitive substring test, so `"upi in"` wins over
/// `"upi"` only because credit rules come first.
pub fn route_by_keywords(description: &str) -> Option<DebitCredit> {
    let desc = description.to_lowercase();
    ROUTING_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| desc.contains(k)))
        .map(|(direction, _)| *direction)
}

/// Keyword routing with the debit fallback used for a single active amount.
pub fn route_or_debit(description: &str) -> DebitCredit {
    route_by_keywords(description).unwrap_or(DebitCredit::Debit)
}
