//! Checker set
//!
//! A [`Checker`] is a pure rule bound to one registry code. It always yields
//! exactly one [`Change`] per evaluated pair: the rule's own code when the
//! rule fires, the `no_change` sentinel otherwise.
//!
//! Rules written against a concrete member kind go through [`typed`], which
//! projects both sides with [`pair`](crate::model::pair) so a pair of
//! mismatched kinds never reaches the rule body.

pub mod class;
pub mod common;
pub mod constant;
pub mod enums;
pub mod factories;
pub mod function;
pub mod interface;
pub mod type_alias;

use crate::compare::Change;
use crate::errors::ApiCompatError;
use crate::model::{pair, Member, Signature};
use crate::registry::ChangeCode;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Rule body: the change message when the rule fires.
pub type Rule = Box<dyn Fn(&Signature, Option<&Signature>) -> Option<String> + Send + Sync>;

pub struct Checker {
    code: ChangeCode,
    rule: Rule,
}

impl Checker {
    pub fn new<F>(code: ChangeCode, rule: F) -> Self
    where
        F: Fn(&Signature, Option<&Signature>) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            code,
            rule: Box::new(rule),
        }
    }

    pub fn code(&self) -> ChangeCode {
        self.code
    }

    pub fn check<'a>(&self, before: &'a Signature, after: Option<&'a Signature>) -> Change<'a> {
        match (self.rule)(before, after) {
            Some(message) => Change::new(self.code, before, after, Some(message)),
            None => Change::no_change(before, after),
        }
    }
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker").field("code", &self.code).finish()
    }
}

/// Wrap a rule over a concrete member kind. Pairs where either side is absent
/// or of another kind yield no message.
pub fn typed<M, F>(code: ChangeCode, rule: F) -> Checker
where
    M: Member + 'static,
    F: Fn(&M, &M) -> Option<String> + Send + Sync + 'static,
{
    Checker::new(code, move |before, after| {
        let (before, after) = pair::<M>(before, after)?;
        rule(before, after)
    })
}

/// Ordered collection of checkers.
#[derive(Debug, Default)]
pub struct CheckerSet {
    checkers: Vec<Checker>,
}

impl CheckerSet {
    pub fn new(checkers: Vec<Checker>) -> Self {
        Self { checkers }
    }

    /// Every built-in checker in registration order: common, class,
    /// constant, enum, function, interface, type alias.
    pub fn standard() -> Self {
        let mut checkers = Vec::new();
        checkers.extend(common::checkers());
        checkers.extend(class::checkers());
        checkers.extend(constant::checkers());
        checkers.extend(enums::checkers());
        checkers.extend(function::checkers());
        checkers.extend(interface::checkers());
        checkers.extend(type_alias::checkers());
        Self { checkers }
    }

    /// Shared, lazily built [`CheckerSet::standard`].
    pub fn builtin() -> &'static CheckerSet {
        static BUILTIN: OnceLock<CheckerSet> = OnceLock::new();
        BUILTIN.get_or_init(CheckerSet::standard)
    }

    pub fn push(&mut self, checker: Checker) {
        self.checkers.push(checker);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checker> {
        self.checkers.iter()
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Check code-set parity with the registry: every non-sentinel code is
    /// registered exactly once and the sentinel is never registered.
    pub fn validate(&self) -> Result<(), ApiCompatError> {
        let mut counts: HashMap<ChangeCode, usize> = HashMap::new();
        for checker in &self.checkers {
            *counts.entry(checker.code).or_default() += 1;
        }

        let missing: Vec<String> = ChangeCode::ALL
            .iter()
            .filter(|code| !code.is_sentinel() && !counts.contains_key(*code))
            .map(|code| code.as_str().to_string())
            .collect();

        let mut duplicated: Vec<String> = counts
            .iter()
            .filter(|(code, count)| code.is_sentinel() || **count > 1)
            .map(|(code, _)| code.as_str().to_string())
            .collect();
        duplicated.sort();

        if missing.is_empty() && duplicated.is_empty() {
            Ok(())
        } else {
            Err(ApiCompatError::RegistryMismatch {
                missing,
                duplicated,
            })
        }
    }
}
