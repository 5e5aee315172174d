//! Transport timeouts.

use std::time::Duration;

/// Timeouts of the default [`HyperClient`](crate::HyperClient) transport.
///
/// Connection pooling is left at hyper's defaults. Per-call deadlines live
/// in [`CallOptions`](crate::CallOptions); these bound every request the
/// transport sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Upper bound on a whole round trip, body included.
    pub timeout: Duration,
    /// Upper bound on opening the TCP connection.
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Round-trip bound when none is configured.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    /// Connect bound when none is configured.
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Start from the defaults.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder(ClientConfig);

impl ClientConfigBuilder {
    /// Round-trip bound.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.0.timeout = timeout;
        self
    }

    /// Connect bound.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.0.connect_timeout = timeout;
        self
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        self.0
    }
}

impl From<ClientConfig> for ClientConfigBuilder {
    fn from(config: ClientConfig) -> Self {
        Self(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(ClientConfig::builder().build(), config);
    }

    #[test]
    fn builder_overrides_only_what_is_set() {
        let config = ClientConfig::builder()
            .connect_timeout(Duration::from_secs(2))
            .build();

        assert_eq!(config.timeout, ClientConfig::DEFAULT_TIMEOUT);
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn builder_resumes_from_config() {
        let base = ClientConfig::builder().timeout(Duration::from_secs(5)).build();
        let config = ClientConfigBuilder::from(base)
            .connect_timeout(Duration::from_secs(1))
            .build();

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
    }
}
