//! Authentication handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::User;
use blog_core::ports::{AuthError, BaseRepository, PasswordService, TokenService, UserRepository};
use blog_core::{DomainError, RepoError};
use blog_shared::FieldErrors;
use blog_shared::dto::{
    AuthResponse, LoginRequest, MeResponse, MessageResponse, RegisterUserRequest, UserDto,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const EMAIL_TAKEN: &str = "The email has already been taken.";
const MAX_FIELD_LENGTH: usize = 255;
const MIN_PASSWORD_LENGTH: usize = 8;

fn validate_registration(req: &RegisterUserRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    let mut fail = |field: &str, message: String| {
        errors.entry(field.to_string()).or_default().push(message);
    };

    let name = req.name.trim();
    if name.is_empty() {
        fail("name", "The name field is required.".to_string());
    } else if name.chars().count() > MAX_FIELD_LENGTH {
        fail(
            "name",
            format!("The name field must not be greater than {MAX_FIELD_LENGTH} characters."),
        );
    }

    let email = req.email.trim();
    if email.is_empty() {
        fail("email", "The email field is required.".to_string());
    } else if !email.contains('@') {
        fail("email", "The email field must be a valid email address.".to_string());
    } else if email.chars().count() > MAX_FIELD_LENGTH {
        fail(
            "email",
            format!("The email field must not be greater than {MAX_FIELD_LENGTH} characters."),
        );
    }

    if req.password.chars().count() < MIN_PASSWORD_LENGTH {
        fail(
            "password",
            format!("The password field must be at least {MIN_PASSWORD_LENGTH} characters."),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

fn issue(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = state.tokens.generate_token(user.id, &user.email)?;
    Ok(AuthResponse {
        token,
        user: UserDto::from(user),
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_registration(&req)?;

    let email = req.email.trim().to_string();
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(DomainError::Duplicate(EMAIL_TAKEN.to_string()).into());
    }

    let password_hash = state.passwords.hash(&req.password)?;
    let user = User::new(req.name.trim().to_string(), email, password_hash);

    let saved = match state.users.save(user).await {
        Ok(user) => user,
        // Lost a race with a concurrent registration for the same email.
        Err(RepoError::Constraint(_)) => {
            return Err(DomainError::Duplicate(EMAIL_TAKEN.to_string()).into());
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(user_id = saved.id, "User registered");

    Ok(HttpResponse::Created().json(issue(&state, &saved)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let Some(user) = state.users.find_by_email(req.email.trim()).await? else {
        return Err(AuthError::InvalidCredentials.into());
    };

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::debug!(user_id = user.id, "Login rejected");
        return Err(AuthError::InvalidCredentials.into());
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(HttpResponse::Ok().json(issue(&state, &user)?))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    // The token may outlive the account.
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthenticated.".to_string()))?;

    Ok(HttpResponse::Ok().json(MeResponse {
        user: UserDto::from(&user),
    }))
}

/// POST /api/auth/logout - Protected route
pub async fn logout(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    state
        .revoked_tokens
        .revoke(&identity.jti, identity.expires_at)
        .await?;
    tracing::info!(user_id = identity.user_id, "User logged out");

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Logged out successfully.".to_string(),
    }))
}
