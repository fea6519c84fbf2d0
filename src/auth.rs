//! User registration, login, and access-token handling.
//!
//! Clients authenticate with a JWT carried in the `Authorization: Bearer`
//! header. Handlers opt into authentication by taking a [Claims] argument,
//! which axum fills in by validating the presented token.

use axum::{
    Json,
    RequestPartsExt,
    extract::{FromRef, FromRequestParts, State},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::{Duration, OffsetDateTime};

use crate::{
    AppState, Error,
    password::{HASH_COST, PasswordHash},
    user::{UserID, create_user, get_user_by_email, get_user_by_id},
};

/// How long an access token stays valid after being issued.
const TOKEN_DURATION: Duration = Duration::hours(24);

/// The claims carried in an access token.
///
/// Taking this type as a handler argument makes the handler require a valid
/// bearer token; requests without one are rejected before the handler runs.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the authenticated user, as a string per JWT convention.
    sub: String,
    /// The expiry time as a Unix timestamp.
    exp: usize,
    /// The issue time as a Unix timestamp.
    iat: usize,
}

impl Claims {
    /// The ID of the authenticated user.
    ///
    /// # Panics
    /// Panics if the subject claim is not an integer. [decode_jwt] rejects
    /// such tokens, so claims obtained through extraction are always valid.
    pub fn user_id(&self) -> UserID {
        UserID::new(self.sub.parse().expect("subject claim must be an integer"))
    }
}

impl<S> FromRequestParts<S> for Claims
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AuthError::MissingToken)?;

        let state = AppState::from_ref(state);

        decode_jwt(bearer.token(), state.decoding_key())
    }
}

/// The ways authentication can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// The presented email or password was wrong.
    WrongCredentials,
    /// The request carried no bearer token.
    MissingToken,
    /// The presented token was malformed, forged, or expired.
    InvalidToken,
    /// A new token could not be created.
    TokenCreation,
    /// Something unrelated to the client's input went wrong.
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AuthError::WrongCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing bearer token"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            AuthError::TokenCreation => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Token creation error")
            }
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({"error": error_message}))).into_response()
    }
}

/// The credentials a client registers or logs in with.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// The user's email address.
    pub email: String,
    /// The user's plain-text password.
    pub password: String,
}

/// Handle a request to create a new user account.
///
/// # Errors
/// Returns an [Error::DuplicateEmail] if the email is already registered, or
/// an [Error::HashingError] if the password could not be hashed.
pub async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Response, Error> {
    let password_hash = PasswordHash::new(&credentials.password, HASH_COST)?;

    let connection = state.db_connection.lock().unwrap();
    let user = create_user(&credentials.email, password_hash, &connection)?;

    tracing::info!("registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "User created", "user_id": user.id})),
    )
        .into_response())
}

/// Handle a request to exchange credentials for an access token.
///
/// Unknown emails and wrong passwords produce the same error, so a caller
/// cannot probe which emails are registered.
pub async fn log_in(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Response, AuthError> {
    let connection = state.db_connection.lock().unwrap();

    let user = get_user_by_email(&credentials.email, &connection)
        .map_err(|_| AuthError::WrongCredentials)?;

    let password_is_valid = user
        .password_hash
        .verify(&credentials.password)
        .map_err(|_| AuthError::InternalError)?;

    if !password_is_valid {
        return Err(AuthError::WrongCredentials);
    }

    let token = encode_jwt(user.id, state.encoding_key())?;

    Ok(Json(json!({"token": token, "user_id": user.id})).into_response())
}

/// Handle a request for the authenticated user's account details.
pub async fn get_me(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Response, AuthError> {
    let connection = state.db_connection.lock().unwrap();

    let user =
        get_user_by_id(claims.user_id(), &connection).map_err(|_| AuthError::InvalidToken)?;

    Ok(Json(json!({"email": user.email, "user_id": user.id})).into_response())
}

/// Create a signed access token for `user_id`.
///
/// # Errors
/// Returns an [AuthError::TokenCreation] if the token could not be signed.
pub fn encode_jwt(user_id: UserID, encoding_key: &EncodingKey) -> Result<String, AuthError> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: user_id.as_i64().to_string(),
        exp: (now + TOKEN_DURATION).unix_timestamp() as usize,
        iat: now.unix_timestamp() as usize,
    };

    encode(&Header::default(), &claims, encoding_key).map_err(|_| AuthError::TokenCreation)
}

/// Validate `token` and return its claims.
///
/// # Errors
/// Returns an [AuthError::InvalidToken] if the token is malformed, carries a
/// bad signature, has expired, or does not name an integer user ID.
pub fn decode_jwt(token: &str, decoding_key: &DecodingKey) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(token, decoding_key, &Validation::default())
        .map_err(|_| AuthError::InvalidToken)?;

    if token_data.claims.sub.parse::<i64>().is_err() {
        return Err(AuthError::InvalidToken);
    }

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{DecodingKey, EncodingKey};

    use crate::user::UserID;

    use super::{AuthError, decode_jwt, encode_jwt};

    fn keys(secret: &str) -> (EncodingKey, DecodingKey) {
        (
            EncodingKey::from_secret(secret.as_bytes()),
            DecodingKey::from_secret(secret.as_bytes()),
        )
    }

    #[test]
    fn encode_then_decode_round_trips_the_user_id() {
        let (encoding_key, decoding_key) = keys("test secret");
        let user_id = UserID::new(42);

        let token = encode_jwt(user_id, &encoding_key).unwrap();
        let claims = decode_jwt(&token, &decoding_key).unwrap();

        assert_eq!(claims.user_id(), user_id);
    }

    #[test]
    fn decode_with_the_wrong_key_fails() {
        let (encoding_key, _) = keys("test secret");
        let (_, wrong_decoding_key) = keys("other secret");

        let token = encode_jwt(UserID::new(42), &encoding_key).unwrap();
        let got = decode_jwt(&token, &wrong_decoding_key);

        assert_eq!(got.unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn decode_rejects_garbage() {
        let (_, decoding_key) = keys("test secret");

        let got = decode_jwt("not.a.token", &decoding_key);

        assert_eq!(got.unwrap_err(), AuthError::InvalidToken);
    }
}
