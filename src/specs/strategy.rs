// src/specs/strategy.rs
//! Ordered fallback strategies.
//!
//! A field is read by a list of named strategies tried in order; the first one
//! that produces a non-empty value wins. Each strategy is a plain `fn` so it can
//! be tested on its own.

use tracing::trace;

/// Values that can be "missed" (empty string, empty list).
pub trait Hit {
    fn is_hit(&self) -> bool;
}

impl Hit for String {
    fn is_hit(&self) -> bool { !self.is_empty() }
}

impl<T> Hit for Vec<T> {
    fn is_hit(&self) -> bool { !self.is_empty() }
}

pub struct Strategy<I: ?Sized, O> {
    pub name: &'static str,
    pub run: fn(&I) -> O,
}

/// Run `strategies` in order, returning the first hit or `O::default()`.
pub fn first_hit<I, O>(field: &str, input: &I, strategies: &[Strategy<I, O>]) -> O
where
    I: ?Sized,
    O: Hit + Default,
{
    for strategy in strategies {
        let value = (strategy.run)(input);
        if value.is_hit() {
            trace!(field, strategy = strategy.name, "strategy hit");
            return value;
        }
    }
    trace!(field, "no strategy matched");
    O::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_: &str) -> String { s!() }
    fn upper(s: &str) -> String { s.to_uppercase() }
    fn lower(s: &str) -> String { s.to_lowercase() }

    #[test]
    fn first_non_empty_wins() {
        let list: &[Strategy<str, String>] = &[
            Strategy { name: "never", run: never },
            Strategy { name: "upper", run: upper },
            Strategy { name: "lower", run: lower },
        ];
        assert_eq!(first_hit("test", "Abc", list), "ABC");
    }

    #[test]
    fn all_missing_is_default() {
        let list: &[Strategy<str, String>] = &[Strategy { name: "never", run: never }];
        assert_eq!(first_hit("test", "Abc", list), "");
        let empty: &[Strategy<str, Vec<String>>] = &[];
        assert!(first_hit("test", "Abc", empty).is_empty());
    }
}
