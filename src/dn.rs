//! Converting between dot notation and registration DNs.
//!
//! Within the OID Directory, every registered object identifier is an entry
//! below a fixed subtree of the DIT called the registration base. The entry
//! for an identifier is found by reversing its arcs and stacking them up as
//! `n=<arc>` relative distinguished names atop the base. The identifier
//! `1.3.6.1.4.1.56521` below the base `ou=Registrations,o=rA` thus lives at
//!
//! ```text
//! n=56521,n=1,n=4,n=1,n=6,n=3,n=1,ou=Registrations,o=rA
//! ```
//!
//! The [`RegistrationBase`] type holds the configured base and provides the
//! two transforms. Both are plain string rewrites over the separator
//! convention. Neither validates arcs; a caller that needs strictly
//! numeric arcs has to check for itself.
//!
//! See Section 3.1.3 of `draft-coretta-oiddir-radit` for details.
//!
//! [`RegistrationBase`]: struct.RegistrationBase.html

use std::fmt;
use smallvec::SmallVec;


//------------ RegistrationBase ----------------------------------------------

/// The distinguished name below which registration entries reside.
///
/// A value of this type is created once from the configured base DN and
/// is immutable thereafter. Matching against the base is not sensitive to
/// case, so any case-folding scheme appropriate for the local DIT may be
/// used when constructing the value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistrationBase {
    /// The base DN exactly as configured.
    dn: String,

    /// The case-folded form used for suffix matching.
    folded: String,
}

impl RegistrationBase {
    /// Creates a new registration base from the given DN.
    pub fn new(dn: impl Into<String>) -> Self {
        let dn = dn.into();
        let folded = dn.to_lowercase();
        RegistrationBase { dn, folded }
    }

    /// Returns the configured base DN.
    pub fn as_str(&self) -> &str {
        &self.dn
    }

    /// Returns the distinguished name for an identifier in dot notation.
    ///
    /// The arcs of `dot` are reversed, wrapped as `n=<arc>` components and
    /// terminated by the registration base. An empty input short-circuits
    /// to an empty output with no base appended.
    ///
    /// This is a presentation transform, not a validator: any non-empty
    /// string is taken as a dot-separated sequence of arcs, whether or not
    /// the arcs are numeric.
    pub fn oid_to_dn(&self, dot: &str) -> String {
        if dot.is_empty() {
            return String::new()
        }
        let arcs: SmallVec<[&str; 16]> = dot.split('.').collect();
        let mut res = String::with_capacity(
            dot.len() + 3 * arcs.len() + self.dn.len()
        );
        for arc in arcs.iter().rev() {
            res.push_str("n=");
            res.push_str(arc);
            res.push(',');
        }
        res.push_str(&self.dn);
        res
    }

    /// Returns the dot notation for a registration distinguished name.
    ///
    /// Returns `None` unless `dn`, case-folded, ends with a comma followed
    /// by the case-folded registration base and has at least one component
    /// in front of that suffix. Otherwise the leading components are split
    /// off, anything that isn’t a two-part `key=value` pair is silently
    /// dropped, and the retained values are re-joined in reverse order.
    ///
    /// The lenient treatment of malformed components is deliberate: callers
    /// needing strict validation must layer it on top. Because matching is
    /// case-insensitive, the returned arcs derive from the folded input.
    pub fn dn_to_oid(&self, dn: &str) -> Option<String> {
        let dn = dn.to_lowercase();
        let rest = dn
            .strip_suffix(&self.folded)
            .and_then(|rest| rest.strip_suffix(','))?;
        if rest.is_empty() {
            return None
        }
        let values: SmallVec<[&str; 16]> = rest.split(',').filter_map(
            |component| {
                let mut parts = component.split('=');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(_), Some(value), None) => Some(value),
                    _ => None,
                }
            }
        ).collect();
        Some(
            values.iter().rev().cloned()
                .collect::<Vec<_>>()
                .join(".")
        )
    }
}


//--- AsRef

impl AsRef<str> for RegistrationBase {
    fn as_ref(&self) -> &str {
        &self.dn
    }
}


//--- Display

impl fmt::Display for RegistrationBase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.dn)
    }
}


//============ Tests =========================================================
