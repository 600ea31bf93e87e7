//! Integration tests for lnxauth-identity
//!
//! Uses wiremock to simulate the Identity Toolkit API and verifies
//! end-to-end behavior of the IdentityClient and CloudIdentityProvider.

mod common;

mod test_sign_in;
