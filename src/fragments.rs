//! Parsing of diagnostic fragment (m/z) lists.
//!
//! Reference records store fragments as comma-separated integers and are
//! parsed strictly. User input is parsed leniently: anything that is not a
//! plain run of digits is dropped.

/// Error for a fragment field that is not a comma-separated integer list
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid fragment token '{token}' in '{field}'")]
pub struct FragmentParseError {
    /// The offending token
    pub token: String,
    /// The complete field text
    pub field: String,
}

/// Parse a reference fragment field such as `"91, 105, 77"`.
///
/// An empty field yields an empty list. Any token that is not an unsigned
/// integer fails the whole field.
pub fn parse_fragment_field(field: &str) -> Result<Vec<u32>, FragmentParseError> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    trimmed
        .split(',')
        .map(|token| {
            let token = token.trim();
            parse_mz(token).ok_or_else(|| FragmentParseError {
                token: token.to_string(),
                field: field.to_string(),
            })
        })
        .collect()
}

/// Parse user-entered fragments, discarding tokens that are not integers.
pub fn parse_fragment_input(input: &str) -> Vec<u32> {
    input
        .split(',')
        .filter_map(|token| parse_mz(token.trim()))
        .collect()
}

fn parse_mz(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parsing() {
        assert_eq!(parse_fragment_field("91,105, 77").unwrap(), vec![91, 105, 77]);
        assert_eq!(parse_fragment_field("  ").unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_field_rejects_other_separators() {
        let err = parse_fragment_field("91;105").unwrap_err();
        assert_eq!(err.token, "91;105");
        assert!(parse_fragment_field("91,,105").is_err());
        assert!(parse_fragment_field("91,-5").is_err());
    }

    #[test]
    fn test_input_discards_garbage() {
        assert_eq!(parse_fragment_input("91, abc, 105,,7.5, 44"), vec![91, 105, 44]);
        assert!(parse_fragment_input("").is_empty());
        assert!(parse_fragment_input("99999999999").is_empty());
    }
}
