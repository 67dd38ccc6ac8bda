//! Container configuration is based on [ContainerConfig], which can be passed to
//! [Container::with_config](crate::container::Container::with_config).
//!
//! By default, the config is created with opinionated default values, which can be overwritten
//! by environment variables prefixed with `SIMPLE_DI_` or `simple_di.json` file, when loaded with
//! [ContainerConfig::from_environment]. Configuration never changes how instances are resolved.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const CONFIG_ENV_PREFIX: &str = "SIMPLE_DI";

/// Name of the default config file.
pub const CONFIG_FILE: &str = "simple_di.json";

/// Container configuration.
#[non_exhaustive]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ContainerConfig {
    /// Should registrations and resolutions be reported as `tracing` debug events.
    pub trace_registrations: bool,
}

impl From<OptionalContainerConfig> for ContainerConfig {
    fn from(value: OptionalContainerConfig) -> Self {
        let default = Self::default();
        Self {
            trace_registrations: value
                .trace_registrations
                .unwrap_or(default.trace_registrations),
        }
    }
}

impl ContainerConfig {
    /// Creates the config from defaults, overwritten by the optional [CONFIG_FILE] in the working
    /// directory and `SIMPLE_DI_` environment variables.
    pub fn from_environment() -> Result<Self, ConfigError> {
        Self::from_sources(
            File::with_name(CONFIG_FILE).required(false),
            Environment::with_prefix(CONFIG_ENV_PREFIX),
        )
    }

    /// Enables or disables tracing of registrations and resolutions.
    pub fn with_trace_registrations(mut self, trace_registrations: bool) -> Self {
        self.trace_registrations = trace_registrations;
        self
    }

    fn from_sources(
        file: File<config::FileSourceFile, config::FileFormat>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()
            .and_then(|config| config.try_deserialize::<OptionalContainerConfig>())
            .map(|config| config.into())
    }
}

#[derive(Deserialize)]
struct OptionalContainerConfig {
    trace_registrations: Option<bool>,
}
