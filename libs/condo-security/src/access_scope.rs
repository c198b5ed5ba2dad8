//! Row-level access scopes.
//!
//! An [`AccessScope`] is an OR of [`ScopeConstraint`]s; each constraint is an
//! AND of [`ScopeFilter`]s over named properties ([`pep_properties`]). Stores
//! either compile a scope into their query language or evaluate it per row
//! with [`AccessScope::matches`]; both must agree on the rules below.
//!
//! - unconstrained matches every row
//! - no constraints (deny-all) matches no row
//! - an empty constraint matches no row
//! - a property the store cannot resolve, or that is NULL, fails the filter

use std::fmt;

use uuid::Uuid;

/// Value a scoped property is compared against.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeValue {
    Uuid(Uuid),
    String(String),
}

impl ScopeValue {
    #[must_use]
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Uuid(u) => Some(*u),
            Self::String(_) => None,
        }
    }
}

impl fmt::Display for ScopeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid(u) => u.fmt(f),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<Uuid> for ScopeValue {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<String> for ScopeValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for ScopeValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

/// Property names understood by every store.
pub mod pep_properties {
    /// Primary key of the row.
    pub const RESOURCE_ID: &str = "id";
    /// Principal that created the row (incident reporter, reservation requester).
    pub const OWNER_ID: &str = "owner_id";
    /// Unit the row is attached to.
    pub const UNIT_ID: &str = "unit_id";
    /// Provider working on an incident.
    pub const ASSIGNED_PROVIDER_ID: &str = "assigned_provider_id";
    /// Status wire name.
    pub const STATUS: &str = "status";
}

/// `property IN (values)`. A single value reads as equality; no values never
/// matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeFilter {
    property: String,
    values: Vec<ScopeValue>,
}

impl ScopeFilter {
    #[must_use]
    pub fn eq(property: impl Into<String>, value: impl Into<ScopeValue>) -> Self {
        Self {
            property: property.into(),
            values: vec![value.into()],
        }
    }

    #[must_use]
    pub fn any_of(
        property: impl Into<String>,
        values: impl IntoIterator<Item = ScopeValue>,
    ) -> Self {
        Self {
            property: property.into(),
            values: values.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    #[must_use]
    pub fn values(&self) -> &[ScopeValue] {
        &self.values
    }

    /// The single accepted value, when this filter is an equality.
    #[must_use]
    pub fn as_eq(&self) -> Option<&ScopeValue> {
        match self.values.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    #[must_use]
    pub fn matches<F>(&self, resolve: &F) -> bool
    where
        F: Fn(&str) -> Option<ScopeValue>,
    {
        resolve(&self.property).is_some_and(|actual| self.values.contains(&actual))
    }
}

/// One access path: all filters must hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeConstraint {
    filters: Vec<ScopeFilter>,
}

impl ScopeConstraint {
    #[must_use]
    pub fn new(filters: Vec<ScopeFilter>) -> Self {
        Self { filters }
    }

    #[must_use]
    pub fn filters(&self) -> &[ScopeFilter] {
        &self.filters
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Rows a principal may read or write.
///
/// ```
/// use condo_security::{AccessScope, pep_properties};
/// use uuid::Uuid;
///
/// assert!(AccessScope::default().is_deny_all());
///
/// let me = Uuid::new_v4();
/// let mine = AccessScope::for_owner(me);
/// assert!(mine.contains_uuid(pep_properties::OWNER_ID, me));
/// assert!(AccessScope::for_units(Vec::new()).is_deny_all());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AccessScope {
    constraints: Vec<ScopeConstraint>,
    unconstrained: bool,
}

impl AccessScope {
    #[must_use]
    pub fn allow_all() -> Self {
        Self {
            constraints: Vec::new(),
            unconstrained: true,
        }
    }

    #[must_use]
    pub fn deny_all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_constraints(constraints: Vec<ScopeConstraint>) -> Self {
        Self {
            constraints,
            unconstrained: false,
        }
    }

    #[must_use]
    pub fn single(constraint: ScopeConstraint) -> Self {
        Self::from_constraints(vec![constraint])
    }

    fn one_filter(filter: ScopeFilter) -> Self {
        Self::single(ScopeConstraint::new(vec![filter]))
    }

    #[must_use]
    pub fn for_owner(principal_id: Uuid) -> Self {
        Self::one_filter(ScopeFilter::eq(pep_properties::OWNER_ID, principal_id))
    }

    /// An empty unit list yields deny-all.
    #[must_use]
    pub fn for_units(unit_ids: Vec<Uuid>) -> Self {
        if unit_ids.is_empty() {
            return Self::deny_all();
        }
        Self::one_filter(ScopeFilter::any_of(
            pep_properties::UNIT_ID,
            unit_ids.into_iter().map(ScopeValue::Uuid),
        ))
    }

    #[must_use]
    pub fn for_assigned_provider(provider_id: Uuid) -> Self {
        Self::one_filter(ScopeFilter::eq(
            pep_properties::ASSIGNED_PROVIDER_ID,
            provider_id,
        ))
    }

    #[must_use]
    pub fn constraints(&self) -> &[ScopeConstraint] {
        &self.constraints
    }

    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.unconstrained
    }

    #[must_use]
    pub fn is_deny_all(&self) -> bool {
        !self.unconstrained && self.constraints.is_empty()
    }

    fn filters_on<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a ScopeFilter> {
        self.constraints
            .iter()
            .flat_map(ScopeConstraint::filters)
            .filter(move |f| f.property() == property)
    }

    #[must_use]
    pub fn all_uuid_values_for(&self, property: &str) -> Vec<Uuid> {
        self.filters_on(property)
            .flat_map(ScopeFilter::values)
            .filter_map(ScopeValue::as_uuid)
            .collect()
    }

    #[must_use]
    pub fn contains_uuid(&self, property: &str, id: Uuid) -> bool {
        let id = ScopeValue::Uuid(id);
        self.filters_on(property).any(|f| f.values().contains(&id))
    }

    /// Evaluate against one row whose properties are looked up through `resolve`.
    #[must_use]
    pub fn matches<F>(&self, resolve: F) -> bool
    where
        F: Fn(&str) -> Option<ScopeValue>,
    {
        self.unconstrained
            || self
                .constraints
                .iter()
                .any(|c| !c.is_empty() && c.filters().iter().all(|f| f.matches(&resolve)))
    }
}
