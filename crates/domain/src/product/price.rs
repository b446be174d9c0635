//! Price value object and its locale-aware formatting.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::macros::exception_codes;
use crate::value_object::ValueObject;

/// Reasons a price can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceError {
    /// Prices are never negative.
    #[error("Price cannot be negative")]
    CannotBeNegative,
}

exception_codes!(PriceError {
    CannotBeNegative => "PRICE_CANNOT_BE_NEGATIVE",
});

/// Reasons a locale or currency code can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceFormatError {
    /// The locale tag has no formatting rules.
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// The currency code has no symbol.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

impl crate::error::Exception for PriceFormatError {
    fn code(&self) -> &'static str {
        match self {
            PriceFormatError::UnsupportedLocale(_) => "PRICE_UNSUPPORTED_LOCALE",
            PriceFormatError::UnsupportedCurrency(_) => "PRICE_UNSUPPORTED_CURRENCY",
        }
    }
}

/// Whether to print the minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PriceFormat {
    /// Whole units, rounded half up: `$20`.
    Short,
    /// Two decimals: `$20.00`.
    #[default]
    Long,
}

/// Locales with known number formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "de-DE")]
    DeDe,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::FrFr => "fr-FR",
            Locale::DeDe => "de-DE",
        }
    }

    fn group_separator(&self) -> &'static str {
        match self {
            Locale::EnUs | Locale::EnGb => ",",
            Locale::FrFr => "\u{202f}",
            Locale::DeDe => ".",
        }
    }

    fn decimal_separator(&self) -> &'static str {
        match self {
            Locale::EnUs | Locale::EnGb => ".",
            Locale::FrFr | Locale::DeDe => ",",
        }
    }

    fn symbol_first(&self) -> bool {
        matches!(self, Locale::EnUs | Locale::EnGb)
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = PriceFormatError;

    /// Accepts BCP-47 tags in any case, with `-` or `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "en-us" | "en" => Ok(Locale::EnUs),
            "en-gb" => Ok(Locale::EnGb),
            "fr-fr" | "fr" => Ok(Locale::FrFr),
            "de-de" | "de" => Ok(Locale::DeDe),
            _ => Err(PriceFormatError::UnsupportedLocale(s.to_string())),
        }
    }
}

/// Currencies with a known symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// The symbol a reader in `locale` expects.
    pub fn symbol(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Currency::Eur, _) => "€",
            (Currency::Usd, Locale::EnGb) => "US$",
            (Currency::Usd, Locale::FrFr) => "$US",
            (Currency::Usd, _) => "$",
            (Currency::Gbp, Locale::FrFr) => "£GB",
            (Currency::Gbp, _) => "£",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = PriceFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            _ => Err(PriceFormatError::UnsupportedCurrency(s.to_string())),
        }
    }
}

/// A non-negative amount of money in minor units (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Price {
    cents: i64,
}

impl Price {
    pub fn create(cents: i64) -> Result<Self, PriceError> {
        if cents < 0 {
            return Err(PriceError::CannotBeNegative);
        }
        Ok(Self { cents })
    }

    pub const fn zero() -> Self {
        Self { cents: 0 }
    }

    pub fn as_cents(&self) -> i64 {
        self.cents
    }

    /// The amount in major units, e.g. `12.5` for 1250 cents.
    pub fn as_unit(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Sum of two prices, saturating at the largest representable amount.
    pub fn plus(&self, other: Price) -> Price {
        Price {
            cents: self.cents.saturating_add(other.cents),
        }
    }

    /// This price taken `quantity` times, saturating.
    pub fn times(&self, quantity: u32) -> Price {
        Price {
            cents: self.cents.saturating_mul(i64::from(quantity)),
        }
    }

    /// Renders the amount the way `locale` writes `currency`.
    pub fn format(&self, format: PriceFormat, locale: Locale, currency: Currency) -> String {
        let number = match format {
            PriceFormat::Long => format!(
                "{}{}{:02}",
                group_digits(self.cents / 100, locale.group_separator()),
                locale.decimal_separator(),
                self.cents % 100
            ),
            PriceFormat::Short => {
                let units = self.cents / 100 + i64::from(self.cents % 100 >= 50);
                group_digits(units, locale.group_separator())
            }
        };

        let symbol = currency.symbol(locale);
        if locale.symbol_first() {
            format!("{symbol}{number}")
        } else {
            format!("{number}\u{a0}{symbol}")
        }
    }
}

impl ValueObject for Price {
    type Props = i64;

    fn props(&self) -> &i64 {
        &self.cents
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format(PriceFormat::Long, Locale::EnUs, Currency::Usd))
    }
}

impl TryFrom<i64> for Price {
    type Error = PriceError;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        Self::create(cents)
    }
}

impl From<Price> for i64 {
    fn from(price: Price) -> Self {
        price.cents
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::zero(), |acc, price| acc.plus(price))
    }
}

/// Inserts `separator` between groups of three digits.
fn group_digits(value: i64, separator: &str) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}
