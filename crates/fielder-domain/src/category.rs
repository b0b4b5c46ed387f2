//! Product categories

use serde::{Deserialize, Serialize};

use crate::MetricKind;

/// Product family a claim set or prediction belongs to.
///
/// Each category owns its own profile table; produce is measured in Brix,
/// every animal category in omega-6:omega-3 ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Beef cattle
    Beef,
    /// Eggs
    Eggs,
    /// Chicken and turkey meat
    Poultry,
    /// Pork
    Pork,
    /// Milk and milk products
    Dairy,
    /// Fruit, vegetables and nuts
    Produce,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 6] = [
        Category::Beef,
        Category::Eggs,
        Category::Poultry,
        Category::Pork,
        Category::Dairy,
        Category::Produce,
    ];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Beef => "beef",
            Category::Eggs => "eggs",
            Category::Poultry => "poultry",
            Category::Pork => "pork",
            Category::Dairy => "dairy",
            Category::Produce => "produce",
        }
    }

    /// Parse a category from a string (case-insensitive, accepts common aliases)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beef" | "cattle" => Some(Category::Beef),
            "eggs" | "egg" => Some(Category::Eggs),
            "poultry" | "chicken" | "turkey" => Some(Category::Poultry),
            "pork" | "hog" | "pig" => Some(Category::Pork),
            "dairy" | "milk" => Some(Category::Dairy),
            "produce" | "fruit" | "vegetable" => Some(Category::Produce),
            _ => None,
        }
    }

    /// Whether the category is an animal product (measured by omega ratio)
    pub fn is_animal(&self) -> bool {
        !matches!(self, Category::Produce)
    }

    /// Metric predictions in this category are expressed in
    pub fn primary_metric(&self) -> MetricKind {
        if self.is_animal() {
            MetricKind::OmegaRatio
        } else {
            MetricKind::Brix
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Category::parse("Beef"), Some(Category::Beef));
        assert_eq!(Category::parse(" chicken "), Some(Category::Poultry));
        assert_eq!(Category::parse("milk"), Some(Category::Dairy));
        assert_eq!(Category::parse("seafood"), None);
    }

    #[test]
    fn test_only_produce_is_not_animal() {
        let animal: Vec<_> = Category::ALL.iter().filter(|c| c.is_animal()).collect();
        assert_eq!(animal.len(), 5);
        assert!(!Category::Produce.is_animal());
        assert_eq!(Category::Produce.primary_metric(), MetricKind::Brix);
        assert_eq!(Category::Pork.primary_metric(), MetricKind::OmegaRatio);
    }

    #[test]
    fn test_round_trip_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }
}
