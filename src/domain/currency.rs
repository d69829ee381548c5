//! Currency codes and inference from price text plus site domain

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the scraper can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Mxn,
    Ars,
}

impl Currency {
    /// ISO 4217 code
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Mxn => "MXN",
            Self::Ars => "ARS",
        }
    }

    /// Symbol used when rendering a price for humans
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd | Self::Mxn | Self::Ars => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Infer the currency of a cleaned price string.
///
/// Symbols in the price text win over explicit codes, and codes win over the
/// domain suffix. A bare `$` is disambiguated by the domain because Mexican
/// and Argentine stores use it for their own peso.
pub fn detect_currency(price_text: &str, domain: &str) -> Currency {
    let domain = domain.to_lowercase();

    if price_text.contains('$') {
        return if domain.contains(".mx") {
            Currency::Mxn
        } else if domain.contains(".com.ar") {
            Currency::Ars
        } else {
            Currency::Usd
        };
    }
    if price_text.contains('€') {
        return Currency::Eur;
    }
    if price_text.contains('£') {
        return Currency::Gbp;
    }

    let upper = price_text.to_uppercase();
    if upper.contains("MXN") {
        return Currency::Mxn;
    }
    if upper.contains("EUR") {
        return Currency::Eur;
    }
    if upper.contains("USD") {
        return Currency::Usd;
    }

    currency_for_domain(&domain)
}

fn currency_for_domain(domain: &str) -> Currency {
    if domain.contains(".mx") {
        Currency::Mxn
    } else if domain.contains(".com.ar") {
        Currency::Ars
    } else if [".es", ".fr", ".de"].iter().any(|tld| domain.contains(tld)) {
        Currency::Eur
    } else {
        Currency::Usd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("$19.99", "amazon.com.mx", Currency::Mxn)]
    #[case("$19.99", "mercadolibre.com.ar", Currency::Ars)]
    #[case("$19.99", "amazon.com", Currency::Usd)]
    #[case("€5", "amazon.com.mx", Currency::Eur)]
    #[case("€5", "example.org", Currency::Eur)]
    #[case("£12.00", "amazon.co.uk", Currency::Gbp)]
    #[case("99.99 EUR", "shop.com", Currency::Eur)]
    #[case("1,200 mxn", "shop.com", Currency::Mxn)]
    #[case("15 usd", "site.de", Currency::Usd)]
    #[case("19.99", "site.de", Currency::Eur)]
    #[case("19.99", "tienda.es", Currency::Eur)]
    #[case("19.99", "boutique.fr", Currency::Eur)]
    #[case("19.99", "mercadolibre.com.mx", Currency::Mxn)]
    #[case("19.99", "tienda.com.ar", Currency::Ars)]
    #[case("19.99", "example.com", Currency::Usd)]
    fn test_detect_currency(#[case] price: &str, #[case] domain: &str, #[case] expected: Currency) {
        assert_eq!(detect_currency(price, domain), expected);
    }

    #[test]
    fn test_dollar_beats_code_in_text() {
        // "$10 EUR" is odd input, but the symbol check comes first
        assert_eq!(detect_currency("$10 EUR", "shop.com"), Currency::Usd);
    }

    #[test]
    fn test_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::Mxn).unwrap(), "\"MXN\"");
        assert_eq!(Currency::Gbp.to_string(), "GBP");
        assert_eq!(Currency::Ars.symbol(), "$");
    }
}
