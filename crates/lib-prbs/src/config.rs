//! PRBS configuration records.
//!
//! Parameters arrive loosely typed (JSON or TOML text, or values built in
//! code) and are checked here before any register is constructed.
//!
//! ```toml
//! t_max = 12
//! t_min = 3
//! init_state = "ones"
//! ```

use crate::error::{PrbsError, PrbsResult};
use crate::prbs::{PrbsGenerator, PrbsParams, PrbsSignal};
use lib_types::InitState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parameter value as it appears in a configuration record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl ParamValue {
    /// Integer value, or `TypeMismatch` naming `param`.
    pub fn as_integer(&self, param: &'static str) -> PrbsResult<i64> {
        match self {
            ParamValue::Integer(v) => Ok(*v),
            other => Err(PrbsError::TypeMismatch {
                param,
                found: other.to_string(),
            }),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Integer(_) => "integer",
            ParamValue::Float(_) => "float",
            ParamValue::Bool(_) => "bool",
            ParamValue::Text(_) => "string",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Integer(v) => write!(f, "{} {}", self.type_name(), v),
            ParamValue::Float(v) => write!(f, "{} {}", self.type_name(), v),
            ParamValue::Bool(v) => write!(f, "{} {}", self.type_name(), v),
            ParamValue::Text(v) => write!(f, "{} {:?}", self.type_name(), v),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Integer(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

/// PRBS parameters as read from configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrbsConfig {
    /// Maximum number of consecutive identical samples.
    pub t_max: ParamValue,

    /// Minimum number of consecutive identical samples.
    pub t_min: ParamValue,

    /// Seeding mode name, `"random"` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_state: Option<String>,
}

impl PrbsConfig {
    pub fn new(t_max: impl Into<ParamValue>, t_min: impl Into<ParamValue>) -> Self {
        Self {
            t_max: t_max.into(),
            t_min: t_min.into(),
            init_state: None,
        }
    }

    /// Set the seeding mode by name.
    pub fn init_state(mut self, name: impl Into<String>) -> Self {
        self.init_state = Some(name.into());
        self
    }

    /// Parse a JSON configuration record.
    pub fn from_json_str(content: &str) -> PrbsResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a TOML configuration record.
    pub fn from_toml_str(content: &str) -> PrbsResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check types, bounds and the seeding mode.
    pub fn validate(&self) -> PrbsResult<PrbsParams> {
        let t_max = self.t_max.as_integer("t_max")?;
        let t_min = self.t_min.as_integer("t_min")?;

        let init_state = match &self.init_state {
            Some(name) => name.parse::<InitState>()?,
            None => InitState::default(),
        };

        PrbsParams::new(t_max, t_min, init_state)
    }

    /// Validate and generate the signal.
    pub fn generate(&self) -> PrbsResult<PrbsSignal> {
        PrbsGenerator::new(self.validate()?)?.generate()
    }
}

impl From<PrbsParams> for PrbsConfig {
    fn from(params: PrbsParams) -> Self {
        Self {
            t_max: ParamValue::Integer(params.t_max() as i64),
            t_min: ParamValue::Integer(params.t_min() as i64),
            init_state: Some(params.init_state().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_toml_config() {
        let config = PrbsConfig::from_toml_str(
            r#"
            t_max = 12
            t_min = 3
            init_state = "ones"
            "#,
        )
        .unwrap();

        let params = config.validate().unwrap();
        assert_eq!(params.t_max(), 12);
        assert_eq!(params.t_min(), 3);
        assert_eq!(params.init_state(), InitState::Ones);

        let signal = config.generate().unwrap();
        assert_eq!(signal.width(), 4);
        assert_eq!(signal.len(), 15 * 3);
    }

    #[test]
    fn test_json_default_init_state() {
        let config = PrbsConfig::from_json_str(r#"{"t_max": 4, "t_min": 1}"#).unwrap();
        assert_eq!(config.init_state, None);
        assert_eq!(config.validate().unwrap().init_state(), InitState::Random);
    }

    #[test]
    fn test_float_is_type_mismatch() {
        let config = PrbsConfig::from_json_str(r#"{"t_max": 4.5, "t_min": 1}"#).unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(matches!(err, PrbsError::TypeMismatch { param: "t_max", .. }));
        assert!(err.to_string().contains("float 4.5"));

        let err = PrbsConfig::new(4i64, 1.0).validate().unwrap_err();
        assert!(matches!(err, PrbsError::TypeMismatch { param: "t_min", .. }));
    }

    #[test]
    fn test_string_is_type_mismatch() {
        let config = PrbsConfig::from_toml_str("t_max = \"8\"\nt_min = 2\n").unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_unknown_init_state() {
        let err = PrbsConfig::new(4i64, 1i64).init_state("zeros").validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOption);
    }

    #[test]
    fn test_range_checked_after_types() {
        let err = PrbsConfig::new(4i64, 4i64).validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);

        let err = PrbsConfig::new(64i64, 2i64).init_state("ones").generate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_malformed_text() {
        let err = PrbsConfig::from_json_str("{\"t_max\": }").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);

        let err = PrbsConfig::from_toml_str("t_min = 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_params_round_trip_through_json() {
        let params = PrbsParams::new(9, 3, InitState::Ones).unwrap();
        let json = serde_json::to_string(&PrbsConfig::from(params)).unwrap();
        assert_eq!(json, r#"{"t_max":9,"t_min":3,"init_state":"ones"}"#);
    }
}
