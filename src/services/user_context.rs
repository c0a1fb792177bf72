use actix_web::{Error as ActixError, FromRequest, HttpRequest, dev::Payload, web::Data};
use futures_util::future::LocalBoxFuture;

use crate::database::models::User;
use crate::database::repositories::UserRepository;
use crate::error::AppError;
use crate::services::auth::Claims;
use crate::services::capabilities::{Capability, CapabilitySet};

/// The authenticated actor of a request: the user as currently stored plus
/// what their role allows them to do.
///
/// Extracted from the bearer token on every protected route. The user is
/// reloaded from the directory, so role changes apply immediately and a
/// deleted user's token stops working.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user: User,
    pub capabilities: CapabilitySet,
}

impl UserContext {
    pub fn new(user: User) -> Self {
        let capabilities = user.role.capabilities();
        Self { user, capabilities }
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn requires(&self, capability: Capability) -> Result<(), AppError> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(format!(
                "{} role cannot perform this action",
                self.user.role
            )))
        }
    }

    /// Allows acting on `target_user_id` when it is the caller, or when the
    /// caller holds `capability`.
    pub fn requires_self_or(
        &self,
        target_user_id: &str,
        capability: Capability,
    ) -> Result<(), AppError> {
        if self.user_id() == target_user_id {
            return Ok(());
        }

        self.requires(capability)
    }
}

impl FromRequest for UserContext {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let claims = Claims::from_request(req, payload).into_inner();
        let user_repository = req.app_data::<Data<UserRepository>>().cloned();

        Box::pin(async move {
            let claims = claims?;
            let Some(user_repository) = user_repository else {
                log::error!("UserRepository missing from app data");
                return Err(AppError::internal_server_error().into());
            };

            match user_repository.find_by_id(claims.user_id()).await {
                Some(user) => Ok(UserContext::new(user)),
                None => {
                    log::debug!("Token subject {} no longer exists", claims.user_id());
                    Err(AppError::Unauthorized.into())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::seed;

    fn context(id: &str) -> UserContext {
        UserContext::new(seed::baseline().users[id].clone())
    }

    #[test]
    fn employees_may_only_look_at_themselves() {
        let employee = context("emp1");

        assert!(
            employee
                .requires_self_or("emp1", Capability::ViewDirectory)
                .is_ok()
        );
        assert!(matches!(
            employee.requires_self_or("mgr1", Capability::ViewDirectory),
            Err(AppError::PermissionDenied(_))
        ));
    }

    #[test]
    fn admins_hold_administrative_capabilities() {
        let admin = context("adm1");

        assert!(admin.requires(Capability::ManageUsers).is_ok());
        assert!(admin.requires(Capability::ApplyLeave).is_err());
    }
}
