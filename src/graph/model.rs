use indexmap::{IndexMap, IndexSet};

/// A node that can appear in subject position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Iri(String),
    /// Blank node label, without the `_:` prefix.
    Blank(String),
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Object {
    Term(Term),
    Literal(String),
    Typed { value: String, datatype: String },
}

impl Object {
    pub fn literal(value: impl Into<String>) -> Self {
        Object::Literal(value.into())
    }

    pub fn iri(iri: impl Into<String>) -> Self {
        Object::Term(Term::Iri(iri.into()))
    }
}

impl From<Term> for Object {
    fn from(term: Term) -> Self {
        Object::Term(term)
    }
}

/// Statements grouped by subject. Subjects and their statements keep insertion
/// order; a repeated statement is stored once.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    subjects: IndexMap<Term, IndexSet<(String, Object)>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, subject: &Term, predicate: &str, object: impl Into<Object>) {
        self.subjects
            .entry(subject.clone())
            .or_default()
            .insert((predicate.to_string(), object.into()));
    }

    pub fn subjects(&self) -> impl Iterator<Item = (&Term, &IndexSet<(String, Object)>)> {
        self.subjects.iter()
    }

    /// Number of triples.
    pub fn len(&self) -> usize {
        self.subjects.values().map(IndexSet::len).sum()
    }
}

/// Lookups used by tests to inspect emitted graphs.
#[cfg(test)]
impl Graph {
    pub fn contains_subject(&self, subject: &Term) -> bool {
        self.subjects.contains_key(subject)
    }

    /// Objects of `subject` for `predicate`, in insertion order.
    pub fn objects(&self, subject: &Term, predicate: &str) -> Vec<&Object> {
        self.subjects
            .get(subject)
            .into_iter()
            .flatten()
            .filter(|(p, _)| p == predicate)
            .map(|(_, o)| o)
            .collect()
    }

    /// Subjects carrying `predicate object`.
    pub fn subjects_with(&self, predicate: &str, object: &Object) -> Vec<&Term> {
        self.subjects
            .iter()
            .filter(|(_, stmts)| stmts.iter().any(|(p, o)| p == predicate && o == object))
            .map(|(s, _)| s)
            .collect()
    }
}
