//! Where/optional pattern queries over a databank
//!
//! A query is a sequence of required and optional triple patterns. Each
//! pattern is resolved against the current solution and looked up through
//! the databank's indexed `triples_matching`; required patterns join on
//! shared variables, and an optional pattern extends a solution when it
//! matches and leaves the solution untouched when it doesn't.

use super::{BlankNode, Databank, Literal, NamedNode, NamedNodeRef, Term, TermRef, TripleRef};
use std::collections::BTreeMap;

/// Variable name to bound term
pub type Bindings = BTreeMap<String, Term>;

/// A position in a triple pattern: a concrete term or a named variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternTerm {
    Var(String),
    Term(Term),
}

/// Variable pattern term, written without the leading `?`
pub fn var(name: &str) -> PatternTerm {
    PatternTerm::Var(name.to_string())
}

impl From<Term> for PatternTerm {
    fn from(term: Term) -> Self {
        PatternTerm::Term(term)
    }
}

impl From<&Term> for PatternTerm {
    fn from(term: &Term) -> Self {
        PatternTerm::Term(term.clone())
    }
}

impl From<NamedNode> for PatternTerm {
    fn from(node: NamedNode) -> Self {
        PatternTerm::Term(node.into())
    }
}

impl From<&NamedNode> for PatternTerm {
    fn from(node: &NamedNode) -> Self {
        PatternTerm::Term(node.clone().into())
    }
}

impl From<NamedNodeRef<'_>> for PatternTerm {
    fn from(node: NamedNodeRef<'_>) -> Self {
        PatternTerm::Term(node.into_owned().into())
    }
}

impl From<BlankNode> for PatternTerm {
    fn from(node: BlankNode) -> Self {
        PatternTerm::Term(node.into())
    }
}

impl From<Literal> for PatternTerm {
    fn from(literal: Literal) -> Self {
        PatternTerm::Term(literal.into())
    }
}

impl PatternTerm {
    /// The concrete term, if this position is not a variable
    pub fn as_term(&self) -> Option<&Term> {
        match self {
            PatternTerm::Term(term) => Some(term),
            PatternTerm::Var(_) => None,
        }
    }

    /// The term this position stands for under `bindings`, if known
    fn resolve<'a>(&'a self, bindings: &'a Bindings) -> Option<&'a Term> {
        match self {
            PatternTerm::Term(term) => Some(term),
            PatternTerm::Var(name) => bindings.get(name),
        }
    }

    /// Match `term` against this position, binding a free variable into `bindings`
    fn unify(&self, term: TermRef<'_>, bindings: &mut Bindings) -> bool {
        match self {
            PatternTerm::Term(expected) => expected.as_ref() == term,
            PatternTerm::Var(name) => match bindings.get(name) {
                Some(bound) => bound.as_ref() == term,
                None => {
                    bindings.insert(name.clone(), term.into_owned());
                    true
                }
            },
        }
    }
}

#[derive(Debug, Clone)]
struct TriplePattern {
    subject: PatternTerm,
    predicate: PatternTerm,
    object: PatternTerm,
}

impl TriplePattern {
    /// Every extension of `bindings` under which this pattern matches a triple
    fn solutions(&self, databank: &Databank, bindings: &Bindings) -> Vec<Bindings> {
        databank
            .triples_matching(
                self.subject.resolve(bindings),
                self.predicate.resolve(bindings),
                self.object.resolve(bindings),
            )
            .into_iter()
            .filter_map(|triple| self.extend(triple, bindings))
            .collect()
    }

    fn extend(&self, triple: TripleRef<'_>, bindings: &Bindings) -> Option<Bindings> {
        let mut next = bindings.clone();
        let matched = self.subject.unify(triple.subject.into(), &mut next)
            && self.predicate.unify(triple.predicate.into(), &mut next)
            && self.object.unify(triple.object, &mut next);
        matched.then_some(next)
    }
}

#[derive(Debug, Clone)]
enum Clause {
    Required(TriplePattern),
    Optional(TriplePattern),
}

/// Query builder bound to one databank
#[derive(Debug, Clone)]
pub struct Query<'a> {
    databank: &'a Databank,
    clauses: Vec<Clause>,
}

impl<'a> Query<'a> {
    pub fn new(databank: &'a Databank) -> Self {
        Self {
            databank,
            clauses: Vec::new(),
        }
    }

    /// Add a required pattern
    pub fn matching(
        mut self,
        subject: impl Into<PatternTerm>,
        predicate: impl Into<PatternTerm>,
        object: impl Into<PatternTerm>,
    ) -> Self {
        self.clauses.push(Clause::Required(TriplePattern {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }));
        self
    }

    /// Add an optional pattern
    pub fn optional(
        mut self,
        subject: impl Into<PatternTerm>,
        predicate: impl Into<PatternTerm>,
        object: impl Into<PatternTerm>,
    ) -> Self {
        self.clauses.push(Clause::Optional(TriplePattern {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }));
        self
    }

    /// Evaluate the clauses in order and return every solution.
    ///
    /// Solutions are sorted by the N-Triples form of their bindings, so the
    /// first solution does not depend on storage order.
    pub fn select(&self) -> Vec<Bindings> {
        let mut solutions = vec![Bindings::new()];

        for clause in &self.clauses {
            let mut next = Vec::new();
            for solution in &solutions {
                match clause {
                    Clause::Required(pattern) => {
                        next.extend(pattern.solutions(self.databank, solution));
                    }
                    Clause::Optional(pattern) => {
                        let extended = pattern.solutions(self.databank, solution);
                        if extended.is_empty() {
                            next.push(solution.clone());
                        } else {
                            next.extend(extended);
                        }
                    }
                }
            }
            solutions = next;
            if solutions.is_empty() {
                break;
            }
        }

        solutions.sort_by_cached_key(|solution| {
            solution
                .iter()
                .map(|(name, term)| (name.clone(), term.to_string()))
                .collect::<Vec<_>>()
        });
        solutions
    }
}
