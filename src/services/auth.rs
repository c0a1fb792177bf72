use actix_web::{Error as ActixError, FromRequest, HttpRequest, dev::Payload, web::Data};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};

use crate::config::Config;
use crate::database::models::{Role, User};
use crate::database::repositories::UserRepository;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub role: Role,  // role when the token was issued
    pub exp: usize,  // expiration time
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Pull the bearer token out of the `Authorization` header.
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(token_data.claims)
}

impl FromRequest for Claims {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(token) = bearer_token(req) else {
            return ready(Err(AppError::Unauthorized.into()));
        };

        let Some(config) = req.app_data::<Data<Config>>() else {
            log::error!("Config missing from app data");
            return ready(Err(AppError::internal_server_error().into()));
        };

        match verify_token(token, &config.jwt_secret) {
            Ok(claims) => ready(Ok(claims)),
            Err(err) => {
                log::debug!("Rejected bearer token: {}", err);
                ready(Err(AppError::Unauthorized.into()))
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Issues tokens for the "log in as" picker. There are no passwords: any
/// listed user can be chosen.
#[derive(Clone)]
pub struct AuthService {
    user_repository: UserRepository,
    config: Config,
}

impl AuthService {
    pub fn new(config: Config, user_repository: UserRepository) -> Self {
        Self {
            user_repository,
            config,
        }
    }

    pub async fn login(&self, input: LoginInput) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repository
            .find_by_id(&input.user_id)
            .await
            .ok_or(AppError::Unauthorized)?;

        let token = self.generate_token(&user)?;
        log::info!("User {} logged in as {}", user.id, user.role);

        Ok(AuthResponse { token, user })
    }

    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::days(self.config.jwt_expiration_days))
            .ok_or_else(|| AppError::internal_server_error_message("Invalid token expiry"))?
            .timestamp() as usize;

        let claims = Claims {
            sub: user.id.clone(),
            role: user.role,
            exp: expiration,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{Database, seed};

    fn service() -> AuthService {
        let database = Database::new(seed::baseline());
        AuthService::new(Config::test_config(), UserRepository::new(database))
    }

    #[actix_web::test]
    async fn login_issues_a_token_for_a_known_user() {
        let service = service();
        let response = service
            .login(LoginInput {
                user_id: "mgr1".to_string(),
            })
            .await
            .unwrap();

        let claims = verify_token(&response.token, &Config::test_config().jwt_secret).unwrap();
        assert_eq!(claims.user_id(), "mgr1");
        assert_eq!(claims.role, Role::Manager);
    }

    #[actix_web::test]
    async fn unknown_users_cannot_log_in() {
        let result = service()
            .login(LoginInput {
                user_id: "ghost".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let mut other_config = Config::test_config();
        other_config.jwt_secret = "another-secret".to_string();
        let database = Database::new(seed::baseline());
        let other = AuthService::new(other_config, UserRepository::new(database));

        let user = seed::baseline().users["emp1"].clone();
        let token = other.generate_token(&user).unwrap();

        assert!(verify_token(&token, &Config::test_config().jwt_secret).is_err());
    }
}
