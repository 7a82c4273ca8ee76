//! CLDR plural category resolution.
//!
//! Maps a numeric value to the grammatical category a locale's plural rules
//! assign it, for both cardinal (`2 items`) and ordinal (`2nd place`)
//! contexts. Locales differ widely here: English has two cardinal
//! categories, Russian four, and Arabic all six, so resolution goes through
//! the CLDR rule data shipped with `icu_plurals` rather than any
//! hardcoded heuristic.
//!
//! When the locale tag cannot be parsed or its rule data is unavailable,
//! a last-resort English-like heuristic is used so a render still
//! completes: `1 -> one` for cardinal, and a last-digit mod 10/100 check
//! for ordinal.

use std::fmt;

use icu_locale_core::Locale;
use icu_plurals::{PluralCategory as IcuCategory, PluralRuleType, PluralRules};

/// One of the six CLDR plural categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl Category {
    /// The category name as it appears as an ICU case key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Zero => "zero",
            Category::One => "one",
            Category::Two => "two",
            Category::Few => "few",
            Category::Many => "many",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<IcuCategory> for Category {
    fn from(category: IcuCategory) -> Self {
        match category {
            IcuCategory::Zero => Category::Zero,
            IcuCategory::One => Category::One,
            IcuCategory::Two => Category::Two,
            IcuCategory::Few => Category::Few,
            IcuCategory::Many => Category::Many,
            IcuCategory::Other => Category::Other,
        }
    }
}

/// Resolve the plural category for `value` under `locale`'s rules.
///
/// `ordinal` selects between cardinal and ordinal rule sets. Non-integral
/// and non-finite values resolve through the fallback heuristic (ICU
/// operands here are integer-based; fractional driving values are rare in
/// message patterns and exact-match cases never hit this path).
pub fn category(value: f64, locale: &str, ordinal: bool) -> Category {
    if value.is_finite() && value.fract() == 0.0 {
        let rule_type = if ordinal {
            PluralRuleType::Ordinal
        } else {
            PluralRuleType::Cardinal
        };
        if let Ok(parsed) = locale.parse::<Locale>()
            && let Ok(rules) = PluralRules::try_new(parsed.into(), rule_type.into())
        {
            return rules.category_for(value as i64).into();
        }
    }
    fallback_category(value, ordinal)
}

/// English-like heuristic used when no locale data is available.
fn fallback_category(value: f64, ordinal: bool) -> Category {
    if !ordinal {
        return if value == 1.0 {
            Category::One
        } else {
            Category::Other
        };
    }

    if !value.is_finite() || value.fract() != 0.0 {
        return Category::Other;
    }
    let n = (value as i64).abs();
    let mod10 = n % 10;
    let mod100 = n % 100;
    if mod10 == 1 && mod100 != 11 {
        Category::One
    } else if mod10 == 2 && mod100 != 12 {
        Category::Two
    } else if mod10 == 3 && mod100 != 13 {
        Category::Few
    } else {
        Category::Other
    }
}
