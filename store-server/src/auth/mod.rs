//! Authentication and authorization
//!
//! Identity resolution is external to this backend: callers present a
//! bearer token issued elsewhere, [`jwt`] only verifies it and extracts
//! `{user_id, role}`. Every authorization decision funnels through the
//! single policy in [`policy`].

pub mod jwt;
pub mod policy;

pub use jwt::{UserClaims, UserIdentity, auth_middleware, create_token};
pub use policy::{authorize_transition, ensure_admin, ensure_owner_or_admin};
