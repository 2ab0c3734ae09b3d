//! The databank: a mutable set of triples for one logical entity

use super::query::{PatternTerm, Query};
use super::{NamedNodeRef, SubjectRef, Term, TermRef, Triple, TripleRef};
use oxrdf::Graph;

/// Mutable triple set over an `oxrdf::Graph`. Membership is by exact
/// (subject, predicate, object) match; iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Databank {
    graph: Graph,
}

fn as_subject(term: &Term) -> Option<SubjectRef<'_>> {
    match term {
        Term::NamedNode(node) => Some(node.as_ref().into()),
        Term::BlankNode(node) => Some(node.as_ref().into()),
        Term::Literal(_) => None,
    }
}

fn as_predicate(term: &Term) -> Option<NamedNodeRef<'_>> {
    match term {
        Term::NamedNode(node) => Some(node.as_ref()),
        _ => None,
    }
}

impl Databank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triple, returning false if it was already present
    pub fn add(&mut self, triple: Triple) -> bool {
        self.graph.insert(&triple)
    }

    /// Remove a triple, returning false if it was not present
    pub fn remove(&mut self, triple: &Triple) -> bool {
        self.graph.remove(triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.graph.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TripleRef<'_>> {
        self.graph.iter()
    }

    /// Add every triple of `triples` to the databank
    pub fn load(&mut self, triples: impl IntoIterator<Item = Triple>) {
        self.graph.extend(triples);
    }

    /// Start a pattern query over this databank
    pub fn query(&self) -> Query<'_> {
        Query::new(self)
    }

    /// Triples matching the given positions, `None` matching anything.
    ///
    /// Lookups go through the graph's subject, predicate or object index,
    /// in that order of preference. A literal subject or a non-IRI
    /// predicate matches nothing.
    pub fn triples_matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Vec<TripleRef<'_>> {
        let subject = match subject {
            Some(term) => match as_subject(term) {
                Some(subject) => Some(subject),
                None => return Vec::new(),
            },
            None => None,
        };
        let predicate = match predicate {
            Some(term) => match as_predicate(term) {
                Some(predicate) => Some(predicate),
                None => return Vec::new(),
            },
            None => None,
        };
        let object: Option<TermRef<'_>> = object.map(Term::as_ref);

        let keep = |triple: &TripleRef<'_>| {
            predicate.map_or(true, |p| triple.predicate == p)
                && object.map_or(true, |o| triple.object == o)
        };
        match (subject, predicate, object) {
            (Some(s), _, _) => self.graph.triples_for_subject(s).filter(|t| keep(t)).collect(),
            (None, Some(p), _) => self.graph.triples_for_predicate(p).filter(|t| keep(t)).collect(),
            (None, None, Some(o)) => self.graph.triples_for_object(o).filter(|t| keep(t)).collect(),
            (None, None, None) => self.graph.iter().collect(),
        }
    }

    /// Remove every triple matching subject and predicate, any object.
    /// Returns how many were removed.
    pub fn remove_matching(&mut self, subject: PatternTerm, predicate: PatternTerm) -> usize {
        // ?x ?x only matches triples whose subject is also their predicate
        let same_var = matches!(
            (&subject, &predicate),
            (PatternTerm::Var(s), PatternTerm::Var(p)) if s == p
        );
        let doomed: Vec<Triple> = self
            .triples_matching(subject.as_term(), predicate.as_term(), None)
            .into_iter()
            .filter(|t| !same_var || TermRef::from(t.subject) == TermRef::from(t.predicate))
            .map(TripleRef::into_owned)
            .collect();
        for triple in &doomed {
            self.graph.remove(triple);
        }
        doomed.len()
    }

    /// N-Triples dump, one statement per line, lines sorted
    pub fn to_ntriples(&self) -> String {
        let mut lines: Vec<String> = self.graph.iter().map(|t| format!("{} .\n", t)).collect();
        lines.sort();
        lines.concat()
    }
}

impl FromIterator<Triple> for Databank {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            graph: iter.into_iter().collect(),
        }
    }
}
