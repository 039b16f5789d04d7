//! Enum types for Blogshelf records and queries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CATEGORY
// ============================================================================

/// Catalog category.
///
/// The catalog uses a fixed set of subjects, matched by exact name. Anything
/// else, including case or spelling variants, is kept verbatim in `Other` so
/// the server stays the judge of what it means.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Mathematics,
    Physics,
    Chemistry,
    Astronomy,
    Statistics,
    Other(String),
}

impl Category {
    /// The enumerated subjects, in the order the filter offers them.
    pub fn known() -> &'static [Category] {
        &[
            Category::Mathematics,
            Category::Physics,
            Category::Chemistry,
            Category::Astronomy,
            Category::Statistics,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Mathematics => "Mathematics",
            Category::Physics => "Physics",
            Category::Chemistry => "Chemistry",
            Category::Astronomy => "Astronomy",
            Category::Statistics => "Statistics",
            Category::Other(value) => value.as_str(),
        }
    }

}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Mathematics" => Category::Mathematics,
            "Physics" => Category::Physics,
            "Chemistry" => Category::Chemistry,
            "Astronomy" => Category::Astronomy,
            "Statistics" => Category::Statistics,
            _ => Category::Other(value),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from(value.to_string())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

// ============================================================================
// SORTING
// ============================================================================

/// Field the server sorts the listing by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "category")]
    Category,
    #[serde(rename = "short_description")]
    ShortDescription,
    #[serde(rename = "email")]
    AuthorEmail,
    #[serde(rename = "image")]
    Image,
}

impl SortField {
    /// Name used in the `sortBy` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::CreatedAt => "createdAt",
            SortField::Category => "category",
            SortField::ShortDescription => "short_description",
            SortField::AuthorEmail => "email",
            SortField::Image => "image",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "title" => Ok(SortField::Title),
            "createdat" | "created" => Ok(SortField::CreatedAt),
            "category" => Ok(SortField::Category),
            "shortdescription" | "description" => Ok(SortField::ShortDescription),
            "email" | "authoremail" | "author" => Ok(SortField::AuthorEmail),
            "image" => Ok(SortField::Image),
            _ => Err(format!("Invalid SortField: {}", s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Header indicator for this direction.
    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid SortOrder: {}", s)),
        }
    }
}

fn normalize_token(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrips_known_and_unknown() {
        let known: Category = serde_json::from_str("\"Physics\"").unwrap();
        assert_eq!(known, Category::Physics);

        let unknown: Category = serde_json::from_str("\"Botany\"").unwrap();
        assert_eq!(unknown, Category::Other("Botany".to_string()));
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"Botany\"");
    }

    #[test]
    fn test_category_variants_stay_verbatim() {
        for raw in ["math", "physics", " Statistics ", "MATHEMATICS"] {
            let category = Category::from(raw);
            assert_eq!(category, Category::Other(raw.to_string()));
            assert_eq!(category.as_str(), raw);
        }

        let decoded: Category = serde_json::from_str("\"math\"").unwrap();
        assert_eq!(decoded, Category::Other("math".to_string()));
        assert_eq!(serde_json::to_string(&decoded).unwrap(), "\"math\"");
    }

    #[test]
    fn test_sort_field_wire_names() {
        assert_eq!(SortField::CreatedAt.as_param(), "createdAt");
        assert_eq!(SortField::ShortDescription.as_param(), "short_description");
        assert_eq!(
            serde_json::to_string(&SortField::AuthorEmail).unwrap(),
            "\"email\""
        );
        assert_eq!("created_at".parse::<SortField>(), Ok(SortField::CreatedAt));
        assert_eq!("image".parse::<SortField>(), Ok(SortField::Image));
        assert!("views".parse::<SortField>().is_err());
    }

    #[test]
    fn test_sort_order_toggle() {
        assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.toggled().toggled(), SortOrder::Desc);
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Desc));
    }
}
