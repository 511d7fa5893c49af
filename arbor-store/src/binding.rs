//! Binding - one solution row of a select query

use crate::pattern::Variable;
use arbor_model::Term;
use std::collections::HashMap;

/// A solution: a partial map from variables to terms.
///
/// Variables absent from the map are unbound (e.g. from an optional
/// sub-pattern that did not match).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Binding {
    values: HashMap<Variable, Term>,
}

impl Binding {
    /// Create an empty binding
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a variable
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.values.get(var)
    }

    /// Bind a variable to a term
    pub fn set(&mut self, var: Variable, term: Term) {
        self.values.insert(var, term);
    }

    /// Check whether a variable is bound
    pub fn is_bound(&self, var: &Variable) -> bool {
        self.values.contains_key(var)
    }

    /// Number of bound variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether no variable is bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over (variable, term) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.values.iter()
    }

    /// Restrict this binding to the given variables
    pub fn project(&self, vars: &[Variable]) -> Binding {
        let values = vars
            .iter()
            .filter_map(|v| self.values.get(v).map(|t| (v.clone(), t.clone())))
            .collect();
        Binding { values }
    }
}

impl FromIterator<(Variable, Term)> for Binding {
    fn from_iter<T: IntoIterator<Item = (Variable, Term)>>(iter: T) -> Self {
        Binding {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_model::Iri;

    #[test]
    fn test_bind_and_project() {
        let s = Variable::new("s");
        let o = Variable::new("o");
        let mut b = Binding::new();
        b.set(s.clone(), Term::Iri(Iri::new("http://example.com/s")));
        b.set(o.clone(), Term::Iri(Iri::new("http://example.com/o")));

        let projected = b.project(&[s.clone()]);
        assert_eq!(projected.len(), 1);
        assert!(projected.is_bound(&s));
        assert!(!projected.is_bound(&o));
    }

    #[test]
    fn test_project_skips_unbound() {
        let b = Binding::new();
        let projected = b.project(&[Variable::new("missing")]);
        assert!(projected.is_empty());
    }
}
