//! Validated credential value objects.
//!
//! Each type validates on construction and is immutable afterwards, so holding
//! a value is proof that it passed its format rules.

mod birth_date;
mod display_name;
mod email;
mod login_id;
mod secret;

pub use birth_date::BirthDate;
pub use display_name::DisplayName;
pub use email::Email;
pub use login_id::LoginId;
pub use secret::{EncodedCredential, PASSWORD_SPECIAL_CHARS, RawSecret};
