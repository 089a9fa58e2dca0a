//! Environment reader.
//!
//! Builds a partial option map from a list of environment variable names.
//! Values stay as strings; any type coercion is the caller's concern (see
//! [`crate::util::as_number`]).

use std::env;

use serde_json::{Map, Value};

/// Read `keys` from the process environment.
///
/// With `drop_null` set, absent or empty variables are omitted from the
/// result. Otherwise every requested key is present: absent variables get
/// `default` (or null when no default was given), and empty-string values
/// are kept as empty strings.
///
/// Pure snapshot read; no side effects.
pub fn read_env<'a, I>(keys: I, default: Option<&str>, drop_null: bool) -> Map<String, Value>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut found = Map::new();

    for key in keys {
        let value = env::var(key).ok();
        if drop_null && value.as_deref().map_or(true, str::is_empty) {
            continue;
        }
        let value = match value {
            Some(v) => Value::String(v),
            None => default.map(|d| Value::String(d.to_string())).unwrap_or(Value::Null),
        };
        found.insert(key.to_string(), value);
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global; every test here uses its own names.

    #[test]
    fn present_values_are_returned_as_strings() {
        env::set_var("OPTLAYER_TEST_PRESENT", "hello");
        let out = read_env(["OPTLAYER_TEST_PRESENT"], None, true);
        assert_eq!(out.get("OPTLAYER_TEST_PRESENT"), Some(&Value::from("hello")));
        env::remove_var("OPTLAYER_TEST_PRESENT");
    }

    #[test]
    fn absent_values_are_dropped_by_default() {
        let out = read_env(["OPTLAYER_TEST_ABSENT"], None, true);
        assert!(out.is_empty());
    }

    #[test]
    fn empty_values_are_dropped_when_drop_null() {
        env::set_var("OPTLAYER_TEST_EMPTY", "");
        let out = read_env(["OPTLAYER_TEST_EMPTY"], None, true);
        assert!(out.is_empty());
        env::remove_var("OPTLAYER_TEST_EMPTY");
    }

    #[test]
    fn without_drop_null_absent_keys_take_the_default() {
        let out = read_env(["OPTLAYER_TEST_DEFAULTED"], Some("fallback"), false);
        assert_eq!(
            out.get("OPTLAYER_TEST_DEFAULTED"),
            Some(&Value::from("fallback"))
        );
    }

    #[test]
    fn without_drop_null_and_no_default_absent_keys_are_null() {
        let out = read_env(["OPTLAYER_TEST_NULLED"], None, false);
        assert_eq!(out.get("OPTLAYER_TEST_NULLED"), Some(&Value::Null));
    }

    #[test]
    fn without_drop_null_empty_values_are_kept() {
        env::set_var("OPTLAYER_TEST_KEPT_EMPTY", "");
        let out = read_env(["OPTLAYER_TEST_KEPT_EMPTY"], Some("fallback"), false);
        assert_eq!(out.get("OPTLAYER_TEST_KEPT_EMPTY"), Some(&Value::from("")));
        env::remove_var("OPTLAYER_TEST_KEPT_EMPTY");
    }
}
