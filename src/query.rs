use std::fmt;

use crate::error::{FinderError, Result};

/// Ingredient list ready to be placed in a search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    ingredients: Vec<String>,
}

impl SearchQuery {
    /// Parse free-text input such as `" egg, milk , flour"`.
    ///
    /// All whitespace is removed from every token. Tokens are kept as typed,
    /// empty ones included, so `" , "` still searches for `,`. Only input that
    /// is blank after trimming is rejected with [`FinderError::EmptyQuery`].
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FinderError::EmptyQuery);
        }

        let ingredients: Vec<String> = trimmed
            .split(',')
            .map(|token| token.chars().filter(|c| !c.is_whitespace()).collect())
            .collect();

        Ok(Self { ingredients })
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Comma-joined form used for the `ingredients` request parameter
    pub fn to_csv(&self) -> String {
        self.ingredients.join(",")
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_csv())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_is_removed() {
        let query = SearchQuery::parse(" egg, milk , flour").unwrap();
        assert_eq!(query.to_csv(), "egg,milk,flour");
        assert_eq!(query.ingredients().len(), 3);
    }

    #[test]
    fn test_blank_input_is_rejected() {
        for input in ["", "   ", "\t\n", " \r\n "] {
            assert!(matches!(
                SearchQuery::parse(input),
                Err(FinderError::EmptyQuery)
            ));
        }
    }

    #[test]
    fn test_only_commas_is_still_a_search() {
        let query = SearchQuery::parse(" , ").unwrap();
        assert_eq!(query.to_csv(), ",");
    }

    #[test]
    fn test_inner_whitespace_collapses() {
        let query = SearchQuery::parse("olive oil,  sea\tsalt").unwrap();
        assert_eq!(query.to_string(), "oliveoil,seasalt");
    }

    #[test]
    fn test_empty_tokens_are_kept() {
        let query = SearchQuery::parse("egg,,milk,").unwrap();
        assert_eq!(query.to_csv(), "egg,,milk,");
        assert_eq!(query.ingredients().len(), 4);
    }
}
