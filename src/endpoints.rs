//! Defines the endpoints for the server.
//!
//! The endpoint paths are centralized here so that route definitions and
//! tests always agree.

/// Create a new user account.
pub const REGISTER: &str = "/api/auth/register";

/// Exchange credentials for an access token.
pub const LOG_IN: &str = "/api/auth/login";

/// Get the account details of the authenticated user.
pub const ME: &str = "/api/auth/me";

/// Bulk-upload transaction records.
pub const UPLOAD_TRANSACTIONS: &str = "/api/transactions/upload";

/// Get a filtered, sorted, paginated view of the user's transactions.
pub const TRANSACTIONS: &str = "/api/transactions";

/// Download the user's filtered transactions as CSV.
pub const EXPORT_TRANSACTIONS: &str = "/api/transactions/export";

/// Get the aggregated analytics for the user's transactions.
pub const ANALYTICS: &str = "/api/analytics";

/// Ask the AI assistant about a transaction sample.
pub const AI_ANALYZE: &str = "/api/ai/analyze";

/// A sanity check route.
pub const COFFEE: &str = "/api/coffee";

#[cfg(test)]
mod tests {
    use axum::http::Uri;

    use super::*;

    #[test]
    fn endpoints_are_valid_uris() {
        let endpoints = [
            REGISTER,
            LOG_IN,
            ME,
            UPLOAD_TRANSACTIONS,
            TRANSACTIONS,
            EXPORT_TRANSACTIONS,
            ANALYTICS,
            AI_ANALYZE,
            COFFEE,
        ];

        for endpoint in endpoints {
            endpoint
                .parse::<Uri>()
                .unwrap_or_else(|_| panic!("{endpoint} is not a valid URI"));
        }
    }
}
