//! Stack of dimensional restrictions.
//!
//! Each period or org unit function pushes one [`Scope`] frame while its
//! sub-expression is walked, and pops it afterwards. A frame inherits nothing
//! from the frame below it: the stack is a record of every restriction in
//! force, innermost last.
//!
//! ```text
//! sum(#{A}.period(-2, 0).ouLevel(3))
//!     ouLevel(3) frame [org unit levels 3]
//!       period(-2, 0) frame [periods -2..0]
//!         #{A}
//! ```

use std::collections::{BTreeMap, BTreeSet};
use core::fmt;

use crate::range::Range;

/// One dimensional restriction frame.
///
/// At most one restriction per dimension kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scope {
    pub periods: Option<Range>,
    pub years: Option<Range>,
    pub org_unit_levels: Option<Range>,
    pub org_unit_peers: Option<Range>,
    pub org_unit_groups: Option<BTreeSet<String>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_periods(mut self, periods: Range) -> Self {
        self.periods = Some(periods);
        self
    }

    pub fn with_years(mut self, years: Range) -> Self {
        self.years = Some(years);
        self
    }

    pub fn with_org_unit_levels(mut self, levels: Range) -> Self {
        self.org_unit_levels = Some(levels);
        self
    }

    pub fn with_org_unit_peers(mut self, peers: Range) -> Self {
        self.org_unit_peers = Some(peers);
        self
    }

    pub fn with_org_unit_groups(mut self, groups: impl IntoIterator<Item = String>) -> Self {
        self.org_unit_groups = Some(groups.into_iter().collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Scope::default()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(periods) = &self.periods {
            parts.push(format!("periods {}", periods));
        }
        if let Some(years) = &self.years {
            parts.push(format!("years {}", years));
        }
        if let Some(levels) = &self.org_unit_levels {
            parts.push(format!("org unit levels {}", levels));
        }
        if let Some(peers) = &self.org_unit_peers {
            parts.push(format!("org unit peers {}", peers));
        }
        if let Some(groups) = &self.org_unit_groups {
            let groups: Vec<&str> = groups.iter().map(String::as_str).collect();
            parts.push(format!("org unit groups {}", groups.join(",")));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Ordered stack of [`Scope`] frames, innermost last.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    /// Create a new empty scope stack.
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    /// Push a frame onto the stack.
    pub fn push(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    /// Pop the topmost frame from the stack.
    ///
    /// Returns an error if the stack is empty.
    pub fn pop(&mut self) -> Result<Scope, PopError> {
        self.scopes.pop().ok_or(PopError::EmptyStack)
    }

    /// The innermost frame, if any.
    pub fn current(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }
}

/// Renders every frame, outermost first. Empty when there are no frames.
impl fmt::Display for ScopeStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, scope) in self.scopes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", scope)?;
        }
        Ok(())
    }
}

/// Error when trying to pop a scope.
#[derive(Debug, Clone)]
pub enum PopError {
    /// The stack is empty.
    EmptyStack,
}

impl fmt::Display for PopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopError::EmptyStack => write!(f, "Cannot pop from empty scope stack"),
        }
    }
}

/// For each data item, the innermost frames it was referenced under.
///
/// An item referenced outside any dimensional function is recorded under
/// the empty frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemScopes(BTreeMap<String, BTreeSet<Scope>>);

impl ItemScopes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: &str, scope: Scope) {
        self.0.entry(item.to_string()).or_default().insert(scope);
    }

    pub fn get(&self, item: &str) -> Option<&BTreeSet<Scope>> {
        self.0.get(item)
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<Scope>)> {
        self.0.iter().map(|(item, scopes)| (item.as_str(), scopes))
    }
}
