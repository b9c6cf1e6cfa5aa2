//! # Eniro (Authentication & Onboarding)
//!
//! `eniro` is the authentication surface for a services marketplace: email
//! and password sign-in/sign-up wrapped around an external authentication
//! provider, with a role-based post-login redirect.
//!
//! ## Outcome model
//!
//! Every attempt produces exactly one [`auth::AuthOutcome`] value:
//! `Success`, `ValidationFailure`, `ProviderFailure`, or `Redirect`.
//! Failures are data, never panics; the `Redirect` variant is a control
//! transfer, not an error, and propagates untouched through every layer.
//!
//! ## External capabilities
//!
//! - **Auth Provider Gateway** ([`gateway::AuthGateway`]): verifies
//!   credentials and issues the session cookies. Injected as a trait
//!   object so tests can substitute a stub.
//! - **Identity store** ([`auth::IdentityStore`]): resolves the
//!   provider-issued id to the full identity record, including the role
//!   that drives the post-login destination.

pub mod auth;
pub mod cli;
pub mod eniro;
pub mod gateway;
