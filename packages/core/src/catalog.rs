use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Product categories carried by the store. The vocabulary is part of the
/// storefront contract: category values appear in URLs, query filters and
/// the admin product form.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Devotional garments.
    Vastra,
    /// Crowns.
    Mukut,
    /// Flutes.
    Bansuri,
    Accessory,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Vastra,
        Category::Mukut,
        Category::Bansuri,
        Category::Accessory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vastra => "vastra",
            Category::Mukut => "mukut",
            Category::Bansuri => "bansuri",
            Category::Accessory => "accessory",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vastra" => Ok(Category::Vastra),
            "mukut" => Ok(Category::Mukut),
            "bansuri" => Ok(Category::Bansuri),
            "accessory" => Ok(Category::Accessory),
            other => Err(UnknownValue {
                field: "category",
                value: other.to_string(),
            }),
        }
    }
}

/// Sort orders accepted by the product listing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    #[default]
    Newest,
    Name,
}

impl FromStr for SortKey {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            "newest" => Ok(SortKey::Newest),
            "name" => Ok(SortKey::Name),
            other => Err(UnknownValue {
                field: "sort",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown {field} value: {value}")]
pub struct UnknownValue {
    pub field: &'static str,
    pub value: String,
}

/// URL slug derived from a product name. Lowercase, ASCII alphanumerics
/// only, runs of everything else collapse to a single hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_lowercase_hyphenated() {
        assert_eq!(slugify("Radha Vastra Set"), "radha-vastra-set");
        assert_eq!(slugify("  Peacock   Mukut!! "), "peacock-mukut");
        assert_eq!(slugify("Bansuri (13\")"), "bansuri-13");
    }

    #[test]
    fn slug_of_punctuation_only_is_empty() {
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn category_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("garland".parse::<Category>().is_err());
    }

    #[test]
    fn sort_key_parses_kebab_case() {
        assert_eq!("price-asc".parse::<SortKey>().unwrap(), SortKey::PriceAsc);
        assert_eq!("NEWEST".parse::<SortKey>().unwrap(), SortKey::Newest);
        assert!("oldest".parse::<SortKey>().is_err());
    }
}
