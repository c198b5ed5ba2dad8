//! Row <-> SDK model conversions.

use condo_resources_sdk::{Resource, ResourceDetails, ResourceKind, Status, Unit};
use sea_orm::{DbErr, Set};

use super::entity::{resource, unit};

fn json_err(e: &serde_json::Error) -> DbErr {
    DbErr::Json(e.to_string())
}

impl TryFrom<resource::Model> for Resource {
    type Error = DbErr;

    fn try_from(m: resource::Model) -> Result<Self, Self::Error> {
        let kind: ResourceKind = m
            .kind
            .parse()
            .map_err(|e: condo_resources_sdk::ParseKindError| DbErr::Type(e.to_string()))?;
        let status: Status = m
            .status
            .parse()
            .map_err(|e: condo_resources_sdk::ParseStatusError| DbErr::Type(e.to_string()))?;
        let details: ResourceDetails =
            serde_json::from_value(m.details).map_err(|e| json_err(&e))?;
        if details.kind() != kind {
            return Err(DbErr::Type(format!(
                "row {} is a {kind} but carries {} details",
                m.id,
                details.kind()
            )));
        }

        Ok(Self {
            id: m.id,
            kind,
            owner: details.owner(),
            status,
            created_at: m.created_at,
            updated_at: m.updated_at,
            details,
        })
    }
}

pub fn to_active(r: &Resource) -> Result<resource::ActiveModel, DbErr> {
    Ok(resource::ActiveModel {
        id: Set(r.id),
        kind: Set(r.kind.as_str().to_owned()),
        status: Set(r.status.as_str().to_owned()),
        unit_id: Set(r.unit_id()),
        owner_id: Set(r.owner_id()),
        assigned_provider_id: Set(r.assigned_provider_id()),
        details: Set(details_json(&r.details)?),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    })
}

pub fn details_json(details: &ResourceDetails) -> Result<serde_json::Value, DbErr> {
    serde_json::to_value(details).map_err(|e| json_err(&e))
}

impl From<unit::Model> for Unit {
    fn from(m: unit::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            resident_id: m.resident_id,
            monthly_fee_cents: m.monthly_fee_cents,
        }
    }
}

#[must_use]
pub fn unit_active(u: &Unit) -> unit::ActiveModel {
    unit::ActiveModel {
        id: Set(u.id),
        name: Set(u.name.clone()),
        resident_id: Set(u.resident_id),
        monthly_fee_cents: Set(u.monthly_fee_cents),
    }
}
