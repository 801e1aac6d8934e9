//! Session Config

use clap::Args;
use jiff::SignedDuration;

/// Login session settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Hours a login session stays valid
    #[arg(long, env = "SESSION_TTL_HOURS", default_value_t = 12)]
    pub session_ttl_hours: u16,
}

impl SessionConfig {
    /// Session lifetime.
    #[must_use]
    pub fn ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.session_ttl_hours))
    }
}
