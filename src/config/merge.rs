//! Override-set merging.
//!
//! Merging combines *override* sets, never effective values: a key both
//! sides left at its schema default stays a default in the result. Override
//! values are opaque, so the union is shallow — a colliding value is
//! replaced whole, not deep-merged.

use serde_json::{Map, Value};

use super::Configuration;

/// Union of two override maps; `overlay` wins on key collision.
pub fn merge_overrides(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Union of override layers in order; the first layer is the base, the last
/// has the highest precedence.
pub fn merge_override_layers<I>(layers: I) -> Map<String, Value>
where
    I: IntoIterator<Item = Map<String, Value>>,
{
    layers
        .into_iter()
        .fold(Map::new(), |merged, layer| merge_overrides(&merged, &layer))
}

impl Configuration {
    /// Merge with another configuration, producing a new instance.
    ///
    /// The result is built from the union of both configurations'
    /// constructor-supplied override sets, with `other`'s values taking
    /// precedence on collision. Schema defaults are on neither side, so
    /// merging two instances that both left an option at its default yields
    /// the default.
    pub fn merge(&self, other: &Configuration) -> Configuration {
        Configuration::assemble(merge_overrides(&self.overrides, &other.overrides))
    }

    /// Merge with several configurations, left to right: each subsequent
    /// configuration overrides the result so far, so the rightmost wins on
    /// collision. Pass a reversed iterator for the opposite precedence.
    pub fn merge_all<'a, I>(&self, others: I) -> Configuration
    where
        I: IntoIterator<Item = &'a Configuration>,
    {
        others
            .into_iter()
            .fold(self.clone(), |merged, other| merged.merge(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with(key: &str, value: Value) -> Configuration {
        let mut keyword = Map::new();
        keyword.insert(key.to_string(), value);
        Configuration::from_dict(keyword).unwrap()
    }

    #[test]
    fn other_wins_on_collision() {
        let a = with("proxies", json!("B"));
        let b = with("proxies", json!("C"));
        assert_eq!(a.merge(&b).get_str("proxies"), Some("C"));
    }

    #[test]
    fn disjoint_overrides_are_combined() {
        let a = with("proxies", json!("B"));
        let b = with("retries", json!(4));
        let merged = a.merge(&b);
        assert_eq!(merged.get_str("proxies"), Some("B"));
        assert_eq!(merged.get_u64("retries"), Some(4));
        assert_eq!(merged.overrides().len(), 2);
    }

    #[test]
    fn merging_defaults_stays_defaults() {
        let a = Configuration::new();
        let b = Configuration::new();
        assert_eq!(a.merge(&b).as_dict(), Configuration::new().as_dict());
    }

    #[test]
    fn defaults_do_not_mask_overrides() {
        // `b` never touched proxies, so its default must not clobber `a`'s
        // explicit choice even though `b` has precedence.
        let a = with("proxies", json!("B"));
        let b = with("retries", json!(1));
        assert_eq!(a.merge(&b).get_str("proxies"), Some("B"));
    }

    #[test]
    fn merge_produces_a_new_instance() {
        let a = with("proxies", json!("B"));
        let b = with("proxies", json!("C"));
        let _ = a.merge(&b);
        assert_eq!(a.get_str("proxies"), Some("B"));
        assert_eq!(b.get_str("proxies"), Some("C"));
    }

    #[test]
    fn merge_all_rightmost_wins() {
        let a = with("proxies", json!("A"));
        let b = with("proxies", json!("B"));
        let c = with("proxies", json!("C"));

        let merged = a.merge_all([&b, &c]);
        assert_eq!(merged.get_str("proxies"), Some("C"));

        // Reversed iteration flips the precedence.
        let merged = a.merge_all([&b, &c].into_iter().rev());
        assert_eq!(merged.get_str("proxies"), Some("B"));
    }

    #[test]
    fn merge_all_matches_pairwise_merges() {
        let a = with("proxies", json!("A"));
        let b = with("retries", json!(2));
        let c = with("proxies", json!("C"));
        assert_eq!(a.merge_all([&b, &c]), a.merge(&b).merge(&c));
    }

    #[test]
    fn override_layers_fold_in_order() {
        let mut low = Map::new();
        low.insert("proxies".to_string(), json!("low"));
        low.insert("retries".to_string(), json!(1));
        let mut high = Map::new();
        high.insert("proxies".to_string(), json!("high"));

        let merged = merge_override_layers([low, high]);
        assert_eq!(merged.get("proxies"), Some(&json!("high")));
        assert_eq!(merged.get("retries"), Some(&json!(1)));
    }
}
