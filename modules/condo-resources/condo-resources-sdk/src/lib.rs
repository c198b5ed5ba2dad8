//! Condo Resources SDK
//!
//! Public contract of the `condo_resources` module:
//!
//! - [`CondoResourcesClientV1`] - client trait used by presentation code
//! - [`Resource`], [`NewResource`], [`TransitionRequest`] and related models
//! - [`CondoResourcesError`] - error taxonomy
//!
//! ```ignore
//! use condo_resources_sdk::{CondoResourcesClientV1, ResourceKind, Status, TransitionRequest};
//!
//! let payments = client.list(ResourceKind::Payment).await?;
//! client
//!     .transition(ResourceKind::Payment, payments[0].id, TransitionRequest::to(Status::Pagado))
//!     .await?;
//! ```

pub mod api;
pub mod errors;
pub mod models;

pub use api::CondoResourcesClientV1;
pub use errors::CondoResourcesError;
pub use models::{
    DashboardStats, IncidentDetails, Latest, NewIncident, NewPayment, NewReservation, NewResource,
    OwnerRef, ParseKindError, ParseStatusError, PaymentDetails, Priority, ReservationDetails,
    Resource, ResourceDetails, ResourceKind, Section, Status, StatusTone, TransitionRequest, Unit,
};
