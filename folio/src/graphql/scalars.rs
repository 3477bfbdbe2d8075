// SPDX-License-Identifier: AGPL-3.0-or-later

//! Custom scalars registered to every schema.
use std::fmt::Display;

use dynamic_graphql::{Error, Result, Scalar, ScalarValue, Value};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:\d{2})?)?$").unwrap()
});

/// Arbitrary JSON value.
#[derive(Scalar, Clone, Debug, PartialEq)]
#[graphql(name = "JSON")]
pub struct JsonScalar(Value);

impl ScalarValue for JsonScalar {
    fn from_value(value: Value) -> Result<Self>
    where
        Self: Sized,
    {
        Ok(JsonScalar(value))
    }

    fn to_value(&self) -> Value {
        self.0.clone()
    }
}

/// Date and time in ISO 8601 format, for example `2023-04-01T10:00:00.000Z`.
#[derive(Scalar, Clone, Debug, Eq, PartialEq)]
#[graphql(name = "DateTime", validator(validate_date_time))]
pub struct DateTimeScalar(String);

impl ScalarValue for DateTimeScalar {
    fn from_value(value: Value) -> Result<Self>
    where
        Self: Sized,
    {
        match &value {
            Value::String(str_value) if DATE_TIME_REGEX.is_match(str_value) => {
                Ok(DateTimeScalar(str_value.to_owned()))
            }
            _ => Err(Error::new(format!(
                "Expected an ISO 8601 date string, got: {value}"
            ))),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }
}

impl Display for DateTimeScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation method used internally in `async-graphql` to check scalar values passed into the
/// public api.
fn validate_date_time(value: &Value) -> bool {
    DateTimeScalar::from_value(value.to_owned()).is_ok()
}

#[cfg(test)]
mod tests {
    use dynamic_graphql::{ScalarValue, Value};
    use rstest::rstest;

    use super::{DateTimeScalar, JsonScalar};

    #[rstest]
    #[case("2023-04-01")]
    #[case("2023-04-01T10:00")]
    #[case("2023-04-01T10:00:00.000Z")]
    #[case("2023-04-01T10:00:00+02:00")]
    fn valid_dates(#[case] date: &str) {
        assert!(DateTimeScalar::from_value(Value::String(date.into())).is_ok());
    }

    #[rstest]
    #[case(Value::String("yesterday".into()))]
    #[case(Value::String("01.04.2023".into()))]
    #[case(Value::Boolean(true))]
    fn invalid_dates(#[case] value: Value) {
        assert!(DateTimeScalar::from_value(value).is_err());
    }

    #[test]
    fn json_passes_values_through() {
        let value = Value::List(vec![Value::from(1), Value::from("two")]);
        let scalar = JsonScalar::from_value(value.clone()).unwrap();
        assert_eq!(scalar.to_value(), value);
    }
}
