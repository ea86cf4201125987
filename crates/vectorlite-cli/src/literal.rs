//! Parsing for the REPL's inline vector and metadata literals:
//! `[1.0,2.0,3.0]` and `key=value,key2=value2`.

use std::collections::HashMap;

use anyhow::{anyhow, Result};

/// Parses a bracketed, comma-separated vector literal such as `[1.0,2.0,3.0]`.
pub fn parse_vector(literal: &str) -> Result<Vec<f64>> {
    let trimmed = literal.trim().trim_start_matches('[').trim_end_matches(']');
    trimmed
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| anyhow!("invalid float value: {}", part.trim()))
        })
        .collect()
}

/// Parses a comma-separated `key=value` metadata literal.
pub fn parse_metadata(literal: &str) -> Result<HashMap<String, String>> {
    literal
        .split(',')
        .map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or_default().trim();
            let value = parts
                .next()
                .ok_or_else(|| anyhow!("invalid metadata format: {pair}"))?
                .trim();
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vector_literal() {
        assert_eq!(parse_vector("[1.0,2.0,3.0]").unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn parses_vector_literal_with_spaces() {
        assert_eq!(parse_vector("[1.0, 2.0, 3.0]").unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn rejects_non_numeric_vector_component() {
        assert!(parse_vector("[1.0,abc]").is_err());
    }

    #[test]
    fn parses_metadata_literal() {
        let metadata = parse_metadata("name=test,type=example").unwrap();
        assert_eq!(metadata.get("name"), Some(&"test".to_string()));
        assert_eq!(metadata.get("type"), Some(&"example".to_string()));
    }

    #[test]
    fn rejects_malformed_metadata_pair() {
        assert!(parse_metadata("name").is_err());
    }
}
