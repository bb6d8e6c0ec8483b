//! CSI parameter accumulation
//!
//! Parameters are positional and optional. An empty field between two `;`
//! separators is kept as an absent entry so later positions keep their index.

use serde::{Deserialize, Serialize};

/// A single decoded parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Param {
    /// Unsigned decimal integer
    Int(u32),
    /// Text between a pair of `"` quotes
    Text(String),
}

impl Param {
    /// Get the integer value, if this is an integer parameter
    pub fn as_int(&self) -> Option<u32> {
        match self {
            Param::Int(value) => Some(*value),
            Param::Text(_) => None,
        }
    }

    /// Get the text value, if this is a quoted string parameter
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Param::Int(_) => None,
            Param::Text(text) => Some(text),
        }
    }
}

/// Ordered list of optional parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    values: Vec<Option<Param>>,
}

impl Params {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self { values: Vec::with_capacity(16) }
    }

    /// Build a parameter list from already decoded values
    pub fn from_values(values: Vec<Option<Param>>) -> Self {
        Self { values }
    }

    /// Append a parameter; `None` records an empty field
    pub fn push(&mut self, param: Option<Param>) {
        self.values.push(param);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the parameter at `index`. Returns `None` both for an absent field
    /// and for a position past the end of the list.
    pub fn get(&self, index: usize) -> Option<&Param> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Iterate over all positions, absent fields included
    pub fn iter(&self) -> impl Iterator<Item = Option<&Param>> + '_ {
        self.values.iter().map(Option::as_ref)
    }

    /// Resolve an integer parameter that has a default.
    ///
    /// Absent and missing positions yield `default`. A text value yields
    /// `None`: the caller treats the command as unrecognized.
    pub fn int_or(&self, index: usize, default: u32) -> Option<u32> {
        match self.get(index) {
            None => Some(default),
            Some(param) => param.as_int(),
        }
    }

    /// Resolve an integer parameter that has no default
    pub fn required_int(&self, index: usize) -> Option<u32> {
        self.get(index).and_then(Param::as_int)
    }

    /// Whether every present parameter is an integer
    pub fn all_ints(&self) -> bool {
        self.values
            .iter()
            .flatten()
            .all(|param| matches!(param, Param::Int(_)))
    }
}

/// Parse unsigned decimal digits, saturating instead of overflowing
pub(crate) fn parse_decimal(digits: &[u8]) -> u32 {
    digits.iter().fold(0u32, |acc, &byte| {
        acc.saturating_mul(10)
            .saturating_add(u32::from(byte.wrapping_sub(b'0')))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_default_applies_to_absent_and_missing() {
        let params = Params::from_values(vec![None, Some(Param::Int(7))]);
        assert_eq!(params.int_or(0, 1), Some(1));
        assert_eq!(params.int_or(1, 1), Some(7));
        assert_eq!(params.int_or(5, 3), Some(3));
    }

    #[test]
    fn test_params_text_is_not_an_int() {
        let params = Params::from_values(vec![Some(Param::Text("hi".to_string()))]);
        assert_eq!(params.int_or(0, 1), None);
        assert_eq!(params.required_int(0), None);
        assert!(!params.all_ints());
    }

    #[test]
    fn test_params_required_int() {
        let params = Params::from_values(vec![Some(Param::Int(12)), None]);
        assert_eq!(params.required_int(0), Some(12));
        assert_eq!(params.required_int(1), None);
        assert_eq!(params.required_int(2), None);
    }

    #[test]
    fn test_params_keep_absent_placeholders() {
        let mut params = Params::new();
        params.push(None);
        params.push(Some(Param::Int(5)));
        params.push(None);
        assert_eq!(params.len(), 3);
        let values: Vec<_> = params.iter().map(|p| p.and_then(Param::as_int)).collect();
        assert_eq!(values, vec![None, Some(5), None]);
        assert!(params.all_ints());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(b"0"), 0);
        assert_eq!(parse_decimal(b"42"), 42);
        assert_eq!(parse_decimal(b"007"), 7);
    }

    #[test]
    fn test_parse_decimal_saturates() {
        assert_eq!(parse_decimal(b"99999999999999999999"), u32::MAX);
    }

    #[test]
    fn test_params_serialize_as_list() {
        let params = Params::from_values(vec![Some(Param::Int(1)), None]);
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"[{"Int":1},null]"#);
        let restored: Params = serde_json::from_str(&json).unwrap();
        assert_eq!(params, restored);
    }
}
