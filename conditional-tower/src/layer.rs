//! The [`Conditional`] layer and its builder.

use conditional_http::ConditionalConfig;
use tower::Layer;

use crate::service::ConditionalService;

/// Layer wrapping services with [`ConditionalService`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Conditional {
    config: ConditionalConfig,
}

impl Conditional {
    /// A layer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a layer.
    pub fn builder() -> ConditionalBuilder {
        ConditionalBuilder::default()
    }

    /// The configuration applied by this layer.
    pub fn config(&self) -> &ConditionalConfig {
        &self.config
    }
}

impl From<ConditionalConfig> for Conditional {
    fn from(config: ConditionalConfig) -> Self {
        Conditional { config }
    }
}

impl<S> Layer<S> for Conditional {
    type Service = ConditionalService<S>;

    fn layer(&self, upstream: S) -> Self::Service {
        ConditionalService::new(upstream, self.config)
    }
}

/// Builder for [`Conditional`].
#[derive(Debug, Default)]
pub struct ConditionalBuilder {
    config: ConditionalConfig,
}

impl ConditionalBuilder {
    /// Replaces the whole configuration.
    pub fn config(self, config: ConditionalConfig) -> Self {
        ConditionalBuilder { config }
    }

    /// Turns evaluation on or off.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// Restricts evaluation to `2xx` responses.
    pub fn only_successful(mut self, only_successful: bool) -> Self {
        self.config.only_successful = only_successful;
        self
    }

    /// Finishes the layer.
    pub fn build(self) -> Conditional {
        Conditional {
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let layer = Conditional::builder().only_successful(false).build();
        assert!(layer.config().enabled);
        assert!(!layer.config().only_successful);

        let layer = Conditional::builder()
            .only_successful(false)
            .config(ConditionalConfig::default())
            .build();
        assert_eq!(layer.config(), &ConditionalConfig::default());
    }
}
