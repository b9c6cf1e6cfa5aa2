//! Sign-in and sign-up: validation, outcome classification, and the
//! role-based redirect decision.

pub mod credentials;
pub mod flow;
pub mod identity;
pub mod outcome;
pub mod redirect;

pub use self::credentials::{SignInCredentials, SignUpCredentials};
pub use self::identity::{Identity, IdentityStore, PgIdentityStore, Role};
pub use self::outcome::{AuthOutcome, RedirectSignal};
