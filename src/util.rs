//! Generic utilities.

use chrono::NaiveDateTime;
use serde_json::Value;

/// The Unix epoch as a naive datetime.
pub const EPOCH: NaiveDateTime = NaiveDateTime::UNIX_EPOCH;

/// Timestamp format matching the schema's `log_datefmt` family.
pub const ISO_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Best-effort numeric coercion.
///
/// Environment values arrive as strings; this is the caller-side coercion
/// the environment reader deliberately does not perform. Integer-looking
/// strings become integers, float-looking strings are truncated to
/// integers, floats are truncated, everything else passes through.
pub fn as_number(value: Value) -> Value {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(int) = trimmed.parse::<i64>() {
                Value::from(int)
            } else if let Ok(float) = trimmed.parse::<f64>() {
                Value::from(float.trunc() as i64)
            } else {
                Value::String(s)
            }
        }
        Value::Number(n) => match n.as_f64() {
            Some(float) if n.as_i64().is_none() && n.as_u64().is_none() => {
                Value::from(float.trunc() as i64)
            }
            _ => Value::Number(n),
        },
        other => other,
    }
}

/// Whole seconds between `dt` and the Unix epoch.
pub fn timestamp_from_datetime(dt: NaiveDateTime) -> i64 {
    (dt - EPOCH).num_seconds()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn integer_strings_become_integers() {
        assert_eq!(as_number(json!("42")), json!(42));
        assert_eq!(as_number(json!(" -7 ")), json!(-7));
    }

    #[test]
    fn float_strings_truncate() {
        assert_eq!(as_number(json!("3.9")), json!(3));
    }

    #[test]
    fn floats_truncate() {
        assert_eq!(as_number(json!(2.7)), json!(2));
    }

    #[test]
    fn non_numeric_values_pass_through() {
        assert_eq!(as_number(json!("proxy")), json!("proxy"));
        assert_eq!(as_number(json!(true)), json!(true));
        assert_eq!(as_number(Value::Null), Value::Null);
        assert_eq!(as_number(json!(10)), json!(10));
    }

    #[test]
    fn epoch_timestamp_is_zero() {
        assert_eq!(timestamp_from_datetime(EPOCH), 0);
    }

    #[test]
    fn timestamps_count_whole_days() {
        let dt = NaiveDate::from_ymd_opt(1970, 1, 2)
            .and_then(|d| d.and_hms_opt(0, 0, 1))
            .unwrap();
        assert_eq!(timestamp_from_datetime(dt), 86_401);
    }
}
