//! The state of the application which is shared between request handlers.

use std::sync::{Arc, Mutex};

use jsonwebtoken::{DecodingKey, EncodingKey};
use rusqlite::Connection;

use crate::{Error, db::initialize};

/// The state of the application.
///
/// The database connection lives behind a mutex because SQLite connections
/// are not [Sync]; handlers lock it for the duration of their queries.
#[derive(Clone)]
pub struct AppState {
    /// The connection to the application database.
    pub db_connection: Arc<Mutex<Connection>>,
    jwt_keys: JwtKeys,
    /// The API key for the AI completion provider, if one was configured.
    pub ai_api_key: Option<String>,
}

#[derive(Clone)]
struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl AppState {
    /// Create the application state, initializing the database schema.
    ///
    /// Access tokens signed with `jwt_secret` stay valid across restarts as
    /// long as the same secret is supplied.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the database could not be initialized.
    pub fn new(
        db_connection: Connection,
        jwt_secret: &str,
        ai_api_key: Option<String>,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            jwt_keys: JwtKeys {
                encoding: Arc::new(EncodingKey::from_secret(jwt_secret.as_bytes())),
                decoding: Arc::new(DecodingKey::from_secret(jwt_secret.as_bytes())),
            },
            ai_api_key,
        })
    }

    /// The key for signing new access tokens.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.jwt_keys.encoding
    }

    /// The key for validating presented access tokens.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.jwt_keys.decoding
    }
}
