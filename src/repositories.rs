pub mod admin;
pub mod api;
pub mod auth;
pub mod cricket;
pub mod earnings;
pub mod payment_methods;
pub mod referral;
pub mod session;
pub mod wallet;

/// Percent-encodes a user-supplied value for use as a single path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
