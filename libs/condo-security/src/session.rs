use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::context::SecurityContext;

/// Supplies the currently authenticated principal, if any.
///
/// Implementations must be cheap to call: controllers query the source on
/// every operation.
pub trait PrincipalSource: Send + Sync {
    /// The current principal, or `None` when nobody is signed in.
    fn current(&self) -> Option<SecurityContext>;
}

/// Swappable session holder.
///
/// Sign-in stores a context, sign-out clears it. Readers never block writers.
#[derive(Default)]
pub struct SessionPrincipal {
    inner: ArcSwapOption<SecurityContext>,
}

impl SessionPrincipal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a signed-in principal.
    #[must_use]
    pub fn signed_in(ctx: SecurityContext) -> Self {
        Self {
            inner: ArcSwapOption::from_pointee(ctx),
        }
    }

    pub fn sign_in(&self, ctx: SecurityContext) {
        self.inner.store(Some(Arc::new(ctx)));
    }

    pub fn sign_out(&self) {
        self.inner.store(None);
    }
}

impl PrincipalSource for SessionPrincipal {
    fn current(&self) -> Option<SecurityContext> {
        self.inner.load_full().map(|ctx| SecurityContext::clone(&ctx))
    }
}

impl<T: PrincipalSource + ?Sized> PrincipalSource for Arc<T> {
    fn current(&self) -> Option<SecurityContext> {
        (**self).current()
    }
}
