//! Axum extractors for authentication.
//!
//! ## Extractors
//!
//! - [`LoginUser`] - the identity attached by the authentication filter
//!
//! ### Usage Example
//!
//! ```ignore
//! use loopers_auth::extractors::LoginUser;
//!
//! async fn me(LoginUser(identity): LoginUser) -> String {
//!     tracing::info!(login_id = %identity.login_id, "Processing request");
//!     identity.name.to_string()
//! }
//! ```

mod login_user;

pub use login_user::LoginUser;
