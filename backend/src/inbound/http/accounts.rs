//! Account API handlers.
//!
//! ```text
//! POST /api/v1/accounts {"username":"alice","email":"a@x.com","password":"secret1"}
//! POST /api/v1/login {"username":"alice","password":"secret1"}
//! POST /api/v1/logout
//! GET /api/v1/accounts/me
//! PUT /api/v1/accounts/me {"username":"alice","email":"new@x.com"}
//! DELETE /api/v1/accounts/me
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    AccountValidationError, Error, LoginCredentials, LoginValidationError, NewAccount,
    ProfileUpdate, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/v1/accounts`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Requested login name.
    pub username: String,
    /// Contact address for the account.
    pub email: String,
    /// Plaintext secret, supplied once and never persisted in this form.
    pub password: String,
}

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext secret.
    pub password: String,
}

/// Profile update body for `PUT /api/v1/accounts/me`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    /// Replacement login name.
    pub username: String,
    /// Replacement contact address.
    pub email: String,
}

fn map_account_validation_error(err: AccountValidationError) -> Error {
    let (field, code) = match &err {
        AccountValidationError::EmptyUsername => ("username", "empty_username"),
        AccountValidationError::UsernameTooShort { .. } => ("username", "username_too_short"),
        AccountValidationError::UsernameTooLong { .. } => ("username", "username_too_long"),
        AccountValidationError::UsernameInvalidCharacters => {
            ("username", "username_invalid_characters")
        }
        AccountValidationError::EmptyEmail => ("email", "empty_email"),
        AccountValidationError::EmailTooLong { .. } => ("email", "email_too_long"),
        AccountValidationError::EmailInvalid => ("email", "email_invalid"),
        AccountValidationError::EmptyPassword => ("password", "empty_password"),
        AccountValidationError::PasswordTooLong { .. } => ("password", "password_too_long"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Register a new account and log it in.
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username or email already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/accounts")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let account = NewAccount::try_from_parts(&request.username, &request.email, &request.password)
        .map_err(map_account_validation_error)?;
    let user = state.identity.register(account).await?;
    session.persist_user(user.id())?;
    tracing::info!(user = %user.id(), "account registered");
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate a user and establish a session.
///
/// Unknown usernames and wrong passwords produce an identical response so
/// account existence does not leak.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let request = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&request.username, &request.password)
        .map_err(map_login_validation_error)?;

    match state.identity.authenticate(&credentials).await? {
        Some(user) => {
            session.persist_user(user.id())?;
            Ok(web::Json(user))
        }
        None => Err(Error::unauthorized("invalid credentials")),
    }
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 200, description = "Session ended")),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::Ok().finish()
}

/// Return the authenticated user's account.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/me",
    responses(
        (status = 200, description = "Current account", body = User),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Account no longer exists", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "currentAccount"
)]
#[get("/accounts/me")]
pub async fn current_account(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    state
        .identity
        .find_user(user_id)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("account no longer exists"))
}

/// Overwrite the authenticated user's username and email.
#[utoipa::path(
    put,
    path = "/api/v1/accounts/me",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated account", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Account no longer exists", body = Error),
        (status = 409, description = "Username or email already taken", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "updateProfile"
)]
#[put("/accounts/me")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let request = payload.into_inner();
    let update = ProfileUpdate::try_from_parts(&request.username, &request.email)
        .map_err(map_account_validation_error)?;
    let user = state.identity.update_profile(user_id, update).await?;
    Ok(web::Json(user))
}

/// Delete the authenticated user's account and favorites, ending the session.
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/me",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Account no longer exists", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "deleteAccount"
)]
#[delete("/accounts/me")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.identity.delete_account(user_id).await?;
    session.clear();
    tracing::info!(user = %user_id, "account deleted");
    Ok(HttpResponse::NoContent().finish())
}
