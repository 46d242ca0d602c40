//! Relevance gate: decides whether a chat message is worth a completion call.
//!
//! Lowercase substring match against a fixed keyword list. No tokenization,
//! stemming or negation handling, so "live" also matches "deliver".

/// Lowercase keywords. Multi-word entries are matched as whole substrings.
const DOMAIN_KEYWORDS: &[&str] = &[
    // places
    "melbourne",
    "sydney",
    "brisbane",
    "adelaide",
    "perth",
    "monash",
    "victoria",
    "nsw",
    "queensland",
    "australian",
    "melbourne city",
    "region",
    "suburb",
    "neighbourhood",
    "growth area",
    // property
    "rent",
    "property",
    "real estate",
    "house",
    "apartment",
    "townhouse",
    "unit",
    "land",
    "estate",
    "home",
    "residential",
    "commercial property",
    "new build",
    "off-plan",
    "open house",
    "auction",
    "rental",
    "lease",
    "landlord",
    "realty",
    "real estate agent",
    "buyer\u{2019}s agent",
    "property management",
    "home inspection",
    "house hunting",
    "house and land package",
    "retirement village",
    "home renovation",
    "real estate listings",
    "real estate news",
    "real estate development",
    "urban development",
    "gentrification",
    "downsizing",
    "upgrading",
    "moving",
    "live",
    // market and finance
    "buy",
    "sale",
    "market",
    "affordable",
    "investment",
    "investment property",
    "mortgage",
    "home loan",
    "interest rate",
    "first home buyer",
    "property value",
    "capital growth",
    "rental yield",
    "housing market",
    "housing affordability",
    "buyers market",
    "sellers market",
    "property portfolio",
    "reit",
    "real estate investment trust",
    "house prices",
    "property prices",
    "property tax",
    "capital gains tax",
    "property market trend",
    "real estate trends",
];

/// True when `text` mentions any real-estate keyword, case-insensitively.
pub fn is_in_domain(text: &str) -> bool {
    let lowered = text.to_lowercase();
    DOMAIN_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}
