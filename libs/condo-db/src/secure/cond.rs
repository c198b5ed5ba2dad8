use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, Value};

use super::{AccessScope, ScopableEntity, ScopeConstraint, ScopeFilter, ScopeValue};

fn sea_value(v: &ScopeValue) -> Value {
    match v {
        ScopeValue::Uuid(u) => Value::from(*u),
        ScopeValue::String(s) => Value::from(s.as_str()),
    }
}

/// Compile an [`AccessScope`] into a `SeaORM` [`Condition`] for entity `E`.
///
/// Constraints are OR-ed and filters inside a constraint are AND-ed. A
/// constraint that cannot match anything on `E` (unresolvable property, no
/// filters, an empty value list) is dropped; if none survive the condition
/// is `WHERE false`.
#[must_use]
pub fn build_scope_condition<E>(scope: &AccessScope) -> Condition
where
    E: ScopableEntity + EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    if scope.is_unconstrained() {
        return Condition::all();
    }

    let paths: Vec<Condition> = scope
        .constraints()
        .iter()
        .filter_map(constraint_condition::<E>)
        .collect();
    if paths.is_empty() {
        return Condition::all().add(Expr::value(false));
    }
    paths.into_iter().fold(Condition::any(), Condition::add)
}

fn constraint_condition<E>(constraint: &ScopeConstraint) -> Option<Condition>
where
    E: ScopableEntity + EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    if constraint.is_empty() {
        return None;
    }
    constraint
        .filters()
        .iter()
        .try_fold(Condition::all(), |cond, filter| {
            filter_condition::<E>(filter).map(|c| cond.add(c))
        })
}

fn filter_condition<E>(filter: &ScopeFilter) -> Option<Condition>
where
    E: ScopableEntity + EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    let col = E::resolve_property(filter.property())?;
    let expr = match (filter.as_eq(), filter.values()) {
        (Some(value), _) => col.eq(sea_value(value)),
        (None, []) => return None,
        (None, values) => col.is_in(values.iter().map(sea_value)),
    };
    Some(Condition::all().add(expr))
}
