use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::orchestrator::user_registration::UserRegistrationError;
use crate::auth::application::use_cases::create_user::{CreateUserError, CreateUserInput};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Request body for account registration
#[derive(Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "alice")]
    pub username: String,

    #[schema(example = "alice@example.com")]
    pub email: String,

    #[schema(example = "Alice")]
    pub first_name: String,

    #[schema(example = "Liddell")]
    pub last_name: String,

    #[schema(example = "wonderland42")]
    pub password1: String,

    /// Must repeat `password1`
    #[schema(example = "wonderland42")]
    pub password2: String,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "Account created. Please check your email inbox to activate it.")]
    message: String,

    user: RegisteredUser,
}

#[derive(Serialize, ToSchema)]
pub struct RegisteredUser {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    id: String,

    #[schema(example = "alice")]
    username: String,

    #[schema(example = "alice@example.com")]
    email: String,

    first_name: String,
    last_name: String,
}

fn map_create_user_error(err: CreateUserError, req: &RegisterRequest) -> HttpResponse {
    let (code, message) = match &err {
        CreateUserError::InvalidUsername(msg) => ("INVALID_USERNAME", msg.clone()),
        CreateUserError::InvalidEmail(msg) => ("INVALID_EMAIL", msg.clone()),
        CreateUserError::InvalidName(msg) => ("INVALID_NAME", msg.clone()),
        CreateUserError::PasswordMismatch => ("PASSWORD_MISMATCH", err.to_string()),
        CreateUserError::InvalidPassword(msg) => ("INVALID_PASSWORD", msg.clone()),
        CreateUserError::UserAlreadyExists => {
            warn!(username = %req.username, email = %req.email, "User already exists");
            return ApiResponse::conflict("USER_ALREADY_EXISTS", &err.to_string());
        }
        CreateUserError::HashingFailed(_) | CreateUserError::RepositoryError(_) => {
            error!(
                username = %req.username,
                email = %req.email,
                error = %err,
                "Unhandled user creation error"
            );
            return ApiResponse::internal_error();
        }
    };

    warn!(
        username = %req.username,
        email = %req.email,
        error = %err,
        "Invalid registration input"
    );
    ApiResponse::bad_request(code, &message)
}

/// Register a new account
///
/// Creates an inactive account and emails an activation link. The account
/// cannot log in until it is activated.
#[utoipa::path(
    post,
    path = "/api/accounts/register",
    tag = "accounts",
    request_body = RegisterRequest,
    responses(
        (
            status = 201,
            description = "Account created, activation email sent",
            body = inline(SuccessResponse<RegisterResponse>),
            example = json!({
                "success": true,
                "data": {
                    "message": "Account created. Please check your email inbox to activate it.",
                    "user": {
                        "id": "123e4567-e89b-12d3-a456-426614174000",
                        "username": "alice",
                        "email": "alice@example.com",
                        "first_name": "Alice",
                        "last_name": "Liddell"
                    }
                }
            })
        ),
        (
            status = 400,
            description = "Validation error",
            body = ErrorResponse,
            examples(
                ("Invalid email" = (value = json!({
                    "success": false,
                    "error": { "code": "INVALID_EMAIL", "message": "Invalid email format" }
                }))),
                ("Password mismatch" = (value = json!({
                    "success": false,
                    "error": {
                        "code": "PASSWORD_MISMATCH",
                        "message": "The two password fields didn't match"
                    }
                })))
            )
        ),
        (
            status = 409,
            description = "Username or email already taken",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "USER_ALREADY_EXISTS",
                    "message": "A user with that username or email already exists"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/accounts/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!(
        username = %req.username,
        email = %req.email,
        "User registration attempt"
    );

    let input = CreateUserInput {
        username: req.username.clone(),
        email: req.email.clone(),
        first_name: req.first_name.clone(),
        last_name: req.last_name.clone(),
        password1: req.password1.clone(),
        password2: req.password2.clone(),
    };

    match data.accounts.register.register_user(input).await {
        Ok(user) => ApiResponse::created(RegisterResponse {
            message: user.message,
            user: RegisteredUser {
                id: user.user_id.to_string(),
                username: user.username,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
            },
        }),

        Err(UserRegistrationError::CreateUserFailed(e)) => map_create_user_error(e, &req),

        Err(e) => {
            error!(
                username = %req.username,
                email = %req.email,
                error = %e,
                "User registration failed"
            );
            ApiResponse::internal_error()
        }
    }
}
