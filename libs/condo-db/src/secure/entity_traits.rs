use sea_orm::EntityTrait;

/// Entities whose rows can be filtered by an [`AccessScope`](super::AccessScope).
///
/// The implementation maps authorization property names
/// ([`pep_properties`](super::pep_properties)) to columns. Returning `None`
/// for a property makes every constraint that mentions it match nothing.
///
/// ```rust,ignore
/// impl ScopableEntity for Entity {
///     fn resource_col() -> Option<Column> {
///         Some(Column::Id)
///     }
///     fn resolve_property(property: &str) -> Option<Column> {
///         match property {
///             pep_properties::RESOURCE_ID => Some(Column::Id),
///             pep_properties::OWNER_ID => Some(Column::OwnerId),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait ScopableEntity: EntityTrait {
    /// Column holding the primary resource identifier.
    fn resource_col() -> Option<Self::Column>;

    /// Resolve an authorization property name to a database column.
    fn resolve_property(property: &str) -> Option<Self::Column>;
}
