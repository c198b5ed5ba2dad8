//! Role-gated application sections.

use condo_resources_sdk::Section;
use condo_security::{Role, SecurityContext};

#[must_use]
pub fn section_roles(section: Section) -> &'static [Role] {
    match section {
        Section::Dashboard | Section::Incidents => &[Role::Admin, Role::Resident, Role::Provider],
        Section::Payments | Section::Reservations | Section::Providers | Section::Votes => {
            &[Role::Admin, Role::Resident]
        }
        Section::Admin => &[Role::Admin],
    }
}

/// Anonymous contexts can access nothing.
#[must_use]
pub fn can_access(ctx: &SecurityContext, section: Section) -> bool {
    ctx.role()
        .is_some_and(|role| section_roles(section).contains(&role))
}

#[must_use]
pub fn visible_sections(ctx: &SecurityContext) -> Vec<Section> {
    Section::ALL
        .into_iter()
        .filter(|s| can_access(ctx, *s))
        .collect()
}
