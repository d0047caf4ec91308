//! Typed comparators for items and buckets.
//!
//! Callers choose a comparator explicitly instead of passing "either a
//! function or a field name":
//!
//! | Variant           | Ordering                                          |
//! |-------------------|---------------------------------------------------|
//! | `Default`         | By identity (item key / bucket key), ascending    |
//! | `ByField(path)`   | By the value at `path`; incomparable pairs tie    |
//! | `Custom(fn)`      | Caller-supplied function                          |
//!
//! Sorting is stable, so ties keep insertion order.

use std::{borrow::Borrow, borrow::Cow, cmp::Ordering, fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shared comparison function.
pub type CompareFn<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Shared equality predicate.
pub type EqualsFn<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Something a [`Comparator`] can order.
pub trait Sortable {
    /// Identity used by the default ordering.
    fn sort_key(&self) -> &str;

    /// Value of a named field, if present.
    fn sort_field(&self, field: &str) -> Option<Cow<'_, Value>>;
}

/// Direction applied on top of a comparator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "ASC")]
    Asc,
    #[serde(alias = "DESC")]
    Desc,
}

impl SortOrder {
    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// How to order two values of `T`.
pub enum Comparator<T> {
    Default,
    ByField(String),
    Custom(CompareFn<T>),
}

impl<T> Default for Comparator<T> {
    fn default() -> Self {
        Self::Default
    }
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Default => Self::Default,
            Self::ByField(field) => Self::ByField(field.clone()),
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::ByField(field) => f.debug_tuple("ByField").field(field).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<T: Sortable> Comparator<T> {
    pub fn by_field(field: impl Into<String>) -> Self {
        Self::ByField(field.into())
    }

    pub fn custom(f: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        match self {
            Self::Default => a.sort_key().cmp(b.sort_key()),
            Self::ByField(field) => match (a.sort_field(field), b.sort_field(field)) {
                (Some(a), Some(b)) => compare_values(&a, &b).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            },
            Self::Custom(f) => f(a, b),
        }
    }

    /// Stable in-place sort of anything that borrows as `T`.
    ///
    /// Field and custom comparators are not guaranteed to be total orders,
    /// so they go through a merge sort that tolerates inconsistent answers.
    pub fn sort<S: Borrow<T>>(&self, values: &mut [S], order: SortOrder) {
        let cmp = |a: &S, b: &S| order.apply(self.compare(a.borrow(), b.borrow()));
        match self {
            Self::Default => values.sort_by(cmp),
            Self::ByField(_) | Self::Custom(_) => merge_sort_by(values, cmp),
        }
    }
}

/// Stable bottom-up merge sort, `O(n log n)` comparisons.
///
/// Runs over a permutation of indices and moves the values once at the end,
/// so any comparator, total or not, yields some permutation of the input.
fn merge_sort_by<S>(values: &mut [S], cmp: impl Fn(&S, &S) -> Ordering) {
    let len = values.len();
    let mut order: Vec<usize> = (0..len).collect();
    let mut merged = order.clone();

    let mut width = 1;
    while width < len {
        for start in (0..len).step_by(2 * width) {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut left, mut right) = (start, mid);
            for slot in &mut merged[start..end] {
                // left wins ties
                let take_left = right >= end
                    || (left < mid
                        && cmp(&values[order[right]], &values[order[left]]) != Ordering::Less);
                if take_left {
                    *slot = order[left];
                    left += 1;
                } else {
                    *slot = order[right];
                    right += 1;
                }
            }
        }
        std::mem::swap(&mut order, &mut merged);
        width *= 2;
    }

    // `target[i]` is the final position of the value now at `i`
    let mut target = vec![0; len];
    for (position, &source) in order.iter().enumerate() {
        target[source] = position;
    }
    for i in 0..len {
        while target[i] != i {
            let j = target[i];
            values.swap(i, j);
            target.swap(i, j);
        }
    }
}

/// Order two JSON scalars of the same kind.
///
/// Numbers compare numerically, strings lexicographically, booleans with
/// `false < true`. Anything else is incomparable.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Row(&'static str, Value);

    impl Sortable for Row {
        fn sort_key(&self) -> &str {
            self.0
        }

        fn sort_field(&self, field: &str) -> Option<Cow<'_, Value>> {
            self.1.get(field).map(Cow::Borrowed)
        }
    }

    fn keys(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.0).collect()
    }

    #[test]
    fn test_compare_values() {
        assert_eq!(compare_values(&json!(2), &json!(10)), Some(Ordering::Less));
        assert_eq!(compare_values(&json!(1.5), &json!(1)), Some(Ordering::Greater));
        assert_eq!(compare_values(&json!("b"), &json!("a")), Some(Ordering::Greater));
        assert_eq!(compare_values(&json!(false), &json!(true)), Some(Ordering::Less));
        assert_eq!(compare_values(&json!("1"), &json!(1)), None);
        assert_eq!(compare_values(&json!(null), &json!(null)), None);
    }

    #[test]
    fn test_default_sorts_by_key() {
        let mut rows = vec![Row("b", json!({})), Row("c", json!({})), Row("a", json!({}))];
        Comparator::<Row>::Default.sort(&mut rows, SortOrder::Asc);
        assert_eq!(keys(&rows), ["a", "b", "c"]);

        Comparator::<Row>::Default.sort(&mut rows, SortOrder::Desc);
        assert_eq!(keys(&rows), ["c", "b", "a"]);
    }

    #[test]
    fn test_by_field_missing_values_tie() {
        let mut rows = vec![
            Row("x", json!({ "rank": 3 })),
            Row("z", json!({ "rank": 1 })),
            Row("y", json!({})),
        ];
        Comparator::<Row>::by_field("rank").sort(&mut rows, SortOrder::Asc);
        assert_eq!(keys(&rows), ["z", "x", "y"]);

        let mut rows = vec![
            Row("a", json!({ "rank": 2 })),
            Row("b", json!({ "rank": 1 })),
            Row("c", json!({ "rank": 3 })),
        ];
        Comparator::<Row>::by_field("rank").sort(&mut rows, SortOrder::Desc);
        assert_eq!(keys(&rows), ["c", "a", "b"]);
    }

    #[test]
    fn test_by_field_stable_on_large_input() {
        let mut rows: Vec<Row> = (0..500)
            .map(|i| Row("row", json!({ "rank": (i * 7) % 5, "pos": i })))
            .collect();
        Comparator::<Row>::by_field("rank").sort(&mut rows, SortOrder::Asc);

        let pairs: Vec<(u64, u64)> = rows
            .iter()
            .map(|r| (r.1["rank"].as_u64().unwrap(), r.1["pos"].as_u64().unwrap()))
            .collect();
        assert!(pairs.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(pairs.len(), 500);
    }

    #[test]
    fn test_inconsistent_comparator_keeps_every_value() {
        let mut rows: Vec<Row> = (0..200).map(|i| Row("row", json!({ "pos": i }))).collect();
        // claims every pair is ordered both ways
        let liar = Comparator::custom(|_: &Row, _: &Row| Ordering::Less);
        liar.sort(&mut rows, SortOrder::Asc);

        let mut seen: Vec<u64> = rows.iter().map(|r| r.1["pos"].as_u64().unwrap()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..200).collect::<Vec<u64>>());
    }

    #[test]
    fn test_custom_comparator() {
        let mut rows = vec![Row("a", json!({})), Row("c", json!({})), Row("b", json!({}))];
        let reverse = Comparator::custom(|a: &Row, b: &Row| b.0.cmp(a.0));
        reverse.sort(&mut rows, SortOrder::Asc);
        assert_eq!(keys(&rows), ["c", "b", "a"]);
    }

    #[test]
    fn test_sort_order_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            order: SortOrder,
        }
        let w: Wrapper = toml::from_str(r#"order = "desc""#).unwrap();
        assert_eq!(w.order, SortOrder::Desc);
        let w: Wrapper = toml::from_str(r#"order = "ASC""#).unwrap();
        assert_eq!(w.order, SortOrder::Asc);
    }
}
