//! Exclusion filters for iteration and serialization

use super::resource::ResourceView;
use regex::Regex;
use std::fmt;

/// Predicate over a resource view
pub type ResourcePredicate = Box<dyn Fn(&ResourceView<'_>) -> bool + Send + Sync>;

/// One exclusion rule
pub enum Exclude {
    /// Bootstrap vocabulary terms
    BuiltIn,
    /// Resources whose IRI matches the pattern
    Pattern(Regex),
    /// Resources the predicate accepts
    Predicate(ResourcePredicate),
}

impl Exclude {
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Exclude::Pattern)
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&ResourceView<'_>) -> bool + Send + Sync + 'static,
    {
        Exclude::Predicate(Box::new(f))
    }

    pub fn excludes(&self, view: &ResourceView<'_>) -> bool {
        match self {
            Exclude::BuiltIn => view.model().is_builtin(view.id()),
            Exclude::Pattern(re) => view.iri().is_some_and(|iri| re.is_match(iri)),
            Exclude::Predicate(f) => f(view),
        }
    }
}

impl fmt::Debug for Exclude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclude::BuiltIn => write!(f, "BuiltIn"),
            Exclude::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Exclude::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

/// A set of exclusion rules; a resource is skipped if any rule matches.
///
/// The default excludes built-in terms.
#[derive(Debug)]
pub struct Exclusions(Vec<Exclude>);

impl Exclusions {
    pub fn new(rules: Vec<Exclude>) -> Self {
        Self(rules)
    }

    /// Exclude nothing
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, rule: Exclude) -> Self {
        self.0.push(rule);
        self
    }

    pub fn rules(&self) -> &[Exclude] {
        &self.0
    }

    pub fn excludes(&self, view: &ResourceView<'_>) -> bool {
        self.0.iter().any(|rule| rule.excludes(view))
    }
}

impl Default for Exclusions {
    fn default() -> Self {
        Self(vec![Exclude::BuiltIn])
    }
}

impl From<Vec<Exclude>> for Exclusions {
    fn from(rules: Vec<Exclude>) -> Self {
        Self(rules)
    }
}

/// Options for [`Model::save`](crate::model::Model::save)
#[derive(Debug, Default)]
pub struct SaveOptions {
    pub exclude: Exclusions,
}

impl SaveOptions {
    pub fn new(exclude: Exclusions) -> Self {
        Self { exclude }
    }
}
