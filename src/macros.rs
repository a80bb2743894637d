// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression — works for literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // String-type concatenation shorthand!
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// Declare a lazily compiled, process-wide regex.
///
/// ```ignore
/// pattern!(YEAR, r"\b(?:19|20)\d{2}\b");
/// YEAR.is_match("2017 Equinox");
/// ```
/// Patterns are literals checked by the tests, so compilation cannot fail at runtime.
#[macro_export]
macro_rules! pattern {
    ($(#[$meta:meta])* $vis:vis $name:ident, $re:expr) => {
        $(#[$meta])*
        $vis static $name: ::std::sync::LazyLock<::regex::Regex> =
            ::std::sync::LazyLock::new(|| ::regex::Regex::new($re).unwrap());
    };
}
