//! Diesel table definitions for the SQLite schema.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// Patient and doctor accounts.
    accounts (id) {
        id -> Integer,
        /// Unique login identifier, stored trimmed.
        email -> Text,
        display_name -> Text,
        /// Argon2id PHC string.
        password_hash -> Text,
        is_doctor -> Bool,
    }
}
