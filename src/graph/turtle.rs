use std::fmt::Write;

use indexmap::IndexMap;

use super::model::{Graph, Object, Term};
use super::namespaces::RDF_TYPE;

/// Serialize `graph` as Turtle. `prefixes` are declared in the given order and used to
/// shorten IRIs wherever the remaining local part is a valid prefixed-name local.
pub fn to_turtle(graph: &Graph, prefixes: &[(&str, &str)]) -> String {
    let writer = Writer::new(prefixes);
    let mut out = String::new();

    for (prefix, ns) in prefixes {
        let _ = writeln!(out, "@prefix {}: <{}> .", prefix, escape_iri(ns));
    }

    for (subject, statements) in graph.subjects() {
        out.push('\n');
        out.push_str(&writer.term(subject));

        let mut by_predicate: IndexMap<&str, Vec<&Object>> = IndexMap::new();
        for (predicate, object) in statements {
            by_predicate.entry(predicate.as_str()).or_default().push(object);
        }

        let count = by_predicate.len();
        for (i, (predicate, objects)) in by_predicate.into_iter().enumerate() {
            let predicate = if predicate == RDF_TYPE {
                "a".to_string()
            } else {
                writer.iri(predicate)
            };
            let objects: Vec<String> = objects.into_iter().map(|o| writer.object(o)).collect();
            let sep = if i == 0 { " " } else { "    " };
            let end = if i + 1 == count { " ." } else { " ;" };
            let _ = writeln!(out, "{}{} {}{}", sep, predicate, objects.join(",\n        "), end);
        }
    }
    out
}

struct Writer<'a> {
    /// Longest namespace first, so the most specific prefix wins.
    by_length: Vec<(&'a str, &'a str)>,
}

impl<'a> Writer<'a> {
    fn new(prefixes: &[(&'a str, &'a str)]) -> Self {
        let mut by_length = prefixes.to_vec();
        by_length.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        Self { by_length }
    }

    fn iri(&self, iri: &str) -> String {
        self.by_length
            .iter()
            .find_map(|(prefix, ns)| {
                iri.strip_prefix(ns)
                    .filter(|local| is_pn_local(local))
                    .map(|local| format!("{}:{}", prefix, local))
            })
            .unwrap_or_else(|| format!("<{}>", escape_iri(iri)))
    }

    fn term(&self, term: &Term) -> String {
        match term {
            Term::Iri(iri) => self.iri(iri),
            Term::Blank(label) => format!("_:{}", label),
        }
    }

    fn object(&self, object: &Object) -> String {
        match object {
            Object::Term(term) => self.term(term),
            Object::Literal(value) => quote(value),
            Object::Typed { value, datatype } => format!("{}^^{}", quote(value), self.iri(datatype)),
        }
    }
}

/// Conservative PN_LOCAL check: ASCII letters, digits, `_`, `-` and inner `.`.
fn is_pn_local(local: &str) -> bool {
    let Some(first) = local.chars().next() else {
        return false;
    };
    (first.is_ascii_alphanumeric() || first == '_')
        && !local.ends_with('.')
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Percent-encode the characters IRIREF does not allow.
fn escape_iri(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len());
    for c in iri.chars() {
        if c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\') {
            let mut buf = [0u8; 4];
            for b in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(out, "%{:02X}", b);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
