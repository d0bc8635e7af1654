//! Tooling for the experimental LDAP “OID Directory” schema effort.
//!
//! This crate contains two independent utilities for working with the
//! `draft-coretta-oiddir` I-D series:
//!
//! * the [`RegistrationBase`] type with its pair of pure transforms
//!   converting between the dot notation of an object identifier and a
//!   distinguished name below a fixed registration base, and
//! * the [`schema`] module which extracts the schema definitions embedded
//!   in a draft revision and re-renders them for one of three directory
//!   server dialects.
//!
//! The subject matter of the I-D series is entirely experimental. None of
//! this should be used within production or mission-critical environments.
//!
//! [`RegistrationBase`]: dn/struct.RegistrationBase.html
//! [`schema`]: schema/index.html

pub use self::dn::RegistrationBase;
pub use self::schema::{Dialect, Extraction, Options, Report};

pub mod dn;
pub mod schema;
