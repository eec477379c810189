mod client;
mod config;
mod credentials;
mod error;
mod query;

pub(crate) const TEST_KEY: &str = "0123456789abcdef0123456789abcdef";
pub(crate) const TEST_TOKEN: &str =
    "fedcba9876543210fedcba9876543210fedcba9876543210fedcba9876543210";
