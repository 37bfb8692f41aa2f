use std::collections::HashMap;
use std::fmt;

use super::predicate::Predicate;

/// Signatures of the conventional primitive predicates. The value under test
/// is always the last parameter.
const STANDARD: &[(&str, &[&str])] = &[
    ("type?", &["type", "input"]),
    ("nil?", &["input"]),
    ("key?", &["name", "input"]),
    ("attr?", &["name", "input"]),
    ("empty?", &["input"]),
    ("filled?", &["input"]),
    ("bool?", &["input"]),
    ("true?", &["value"]),
    ("false?", &["value"]),
    ("int?", &["input"]),
    ("float?", &["input"]),
    ("decimal?", &["input"]),
    ("number?", &["input"]),
    ("str?", &["input"]),
    ("date?", &["input"]),
    ("time?", &["input"]),
    ("hash?", &["input"]),
    ("array?", &["input"]),
    ("odd?", &["input"]),
    ("even?", &["input"]),
    ("lt?", &["num", "input"]),
    ("gt?", &["num", "input"]),
    ("lteq?", &["num", "input"]),
    ("gteq?", &["num", "input"]),
    ("size?", &["size", "input"]),
    ("min_size?", &["num", "input"]),
    ("max_size?", &["num", "input"]),
    ("bytesize?", &["size", "input"]),
    ("included_in?", &["list", "input"]),
    ("excluded_from?", &["list", "input"]),
    ("includes?", &["value", "input"]),
    ("excludes?", &["value", "input"]),
    ("eql?", &["left", "right"]),
    ("not_eql?", &["left", "right"]),
    ("is?", &["left", "right"]),
    ("format?", &["regex", "input"]),
    ("uuid_v4?", &["input"]),
    ("uri?", &["schemes", "input"]),
];

/// Immutable-once-built registry mapping predicate names to signatures.
///
/// # Example
///
/// ```
/// use logica::Predicates;
///
/// let predicates = Predicates::new()
///     .register("gt?", ["num", "input"])
///     .register("str?", ["input"]);
/// assert!(predicates.lookup("gt?").is_some());
/// assert!(predicates.lookup("nope").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Predicates {
    entries: HashMap<String, Predicate>,
}

impl Predicates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the conventional predicate signatures
    /// (`gt?`, `str?`, `included_in?`, ...).
    #[must_use]
    pub fn standard() -> Self {
        STANDARD
            .iter()
            .fold(Self::new(), |reg, (name, params)| {
                reg.register(name, params.iter().copied())
            })
    }

    /// Register a predicate by name and parameter list. A later registration
    /// under the same name replaces the earlier one.
    #[must_use]
    pub fn register<I, S>(self, name: &str, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(Predicate::new(name, params))
    }

    /// Register an already-constructed (possibly curried) predicate. Its
    /// bound args become part of the entry and are not re-emitted by
    /// [`Predicate::to_ast`].
    #[must_use]
    pub fn insert(mut self, predicate: Predicate) -> Self {
        self.entries
            .insert(predicate.name().to_owned(), predicate.registered());
        self
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Predicate> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<Predicate> for Predicates {
    fn from_iter<T: IntoIterator<Item = Predicate>>(iter: T) -> Self {
        iter.into_iter().fold(Self::new(), Self::insert)
    }
}

impl fmt::Display for Predicates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicates({} registered)", self.entries.len())
    }
}
