use secrecy::SecretString;
use uuid::Uuid;

use crate::role::Role;

/// Identity and role of the principal an operation runs as.
///
/// A context without a role is anonymous and is rejected by every controller
/// operation, the same as no context at all.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SecurityContext {
    /// Profile id of the signed-in user; nil when anonymous.
    subject_id: Uuid,
    role: Option<Role>,
    /// Access token issued by the hosted auth service. `Debug` redacts it and
    /// it is never serialized.
    #[serde(skip)]
    bearer_token: Option<SecretString>,
}

impl SecurityContext {
    #[must_use]
    pub fn builder() -> SecurityContextBuilder {
        SecurityContextBuilder::default()
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn principal(subject_id: Uuid, role: Role) -> Self {
        Self::builder().subject_id(subject_id).role(role).build()
    }

    #[must_use]
    pub fn subject_id(&self) -> Uuid {
        self.subject_id
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.role.is_none()
    }

    #[must_use]
    pub fn bearer_token(&self) -> Option<&SecretString> {
        self.bearer_token.as_ref()
    }
}

#[derive(Default)]
pub struct SecurityContextBuilder {
    subject_id: Option<Uuid>,
    role: Option<Role>,
    bearer_token: Option<SecretString>,
}

impl SecurityContextBuilder {
    #[must_use]
    pub fn subject_id(mut self, subject_id: Uuid) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<SecretString>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn build(self) -> SecurityContext {
        SecurityContext {
            subject_id: self.subject_id.unwrap_or_default(),
            role: self.role,
            bearer_token: self.bearer_token,
        }
    }
}
