//! Principal module - accounts, credentials, and session state.

mod aggregate;
mod credential;
mod errors;
mod values;

pub use aggregate::{NewPrincipal, Principal, PrincipalSummary};
pub use credential::{CredentialHash, RefreshFingerprint};
pub use errors::IdentityError;
pub use values::{Email, FullName, Username};

#[cfg(test)]
pub(crate) use aggregate::test_support;
