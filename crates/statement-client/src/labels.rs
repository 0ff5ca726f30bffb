//! Yahoo time-series keys and their statement labels.

/// Income statement keys requested from the time-series endpoint.
pub const INCOME_KEYS: &[&str] = &[
    "TotalRevenue",
    "OperatingRevenue",
    "EBITDA",
    "NormalizedEBITDA",
    "OperatingIncome",
    "NetIncome",
    "NetIncomeCommonStockholders",
];

/// Balance sheet keys requested from the time-series endpoint.
pub const BALANCE_KEYS: &[&str] = &[
    "CurrentAssets",
    "CurrentLiabilities",
    "TotalAssets",
    "TotalLiabilitiesNetMinorityInterest",
    "StockholdersEquity",
    "TotalEquityGrossMinorityInterest",
    "RetainedEarnings",
];

/// Split a CamelCase key into a spaced label, keeping acronyms together:
/// `TotalRevenue` -> `Total Revenue`, `NormalizedEBITDA` -> `Normalized EBITDA`.
pub fn key_to_label(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut label = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                label.push(' ');
            }
        }
        label.push(c);
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_to_label() {
        assert_eq!(key_to_label("TotalRevenue"), "Total Revenue");
        assert_eq!(key_to_label("EBITDA"), "EBITDA");
        assert_eq!(key_to_label("NormalizedEBITDA"), "Normalized EBITDA");
        assert_eq!(
            key_to_label("TotalLiabilitiesNetMinorityInterest"),
            "Total Liabilities Net Minority Interest"
        );
        assert_eq!(key_to_label("EBITDAMargin"), "EBITDA Margin");
    }

    #[test]
    fn test_keys_map_to_resolver_labels() {
        let labels: Vec<String> = INCOME_KEYS.iter().map(|k| key_to_label(k)).collect();
        assert!(labels.contains(&"Net Income Common Stockholders".to_string()));
        let labels: Vec<String> = BALANCE_KEYS.iter().map(|k| key_to_label(k)).collect();
        assert!(labels.contains(&"Total Equity Gross Minority Interest".to_string()));
    }
}
