use std::env::var;
use std::str::FromStr;

use tracing::{level_filters::LevelFilter, warn};
use tracing_subscriber::{
    Layer, filter::EnvFilter, layer::SubscriberExt, registry::Registry, util::SubscriberInitExt,
};

/// Output format selected through `RUST_LOG_FORMAT`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact lines without timestamps
    #[default]
    Compact,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl LogFormat {
    fn from_env() -> Self {
        let Ok(raw) = var("RUST_LOG_FORMAT") else {
            return Self::default();
        };

        raw.parse().unwrap_or_else(|error| {
            warn!("Invalid RUST_LOG_FORMAT, falling back to compact: {error}");
            Self::default()
        })
    }

    fn layer(self, filter: EnvFilter) -> Box<dyn Layer<Registry> + Send + Sync> {
        match self {
            Self::Json => tracing_subscriber::fmt::layer().json().with_filter(filter).boxed(),
            Self::Pretty => tracing_subscriber::fmt::layer().pretty().with_filter(filter).boxed(),
            Self::Compact => tracing_subscriber::fmt::layer()
                .compact()
                .without_time()
                .with_filter(filter)
                .boxed(),
        }
    }
}

/// Install the global subscriber at `info`, overridable through `RUST_LOG`
pub fn init() {
    init_with_level(LevelFilter::INFO);
}

/// Install the global subscriber with `level` as the default directive
pub fn init_with_level(level: LevelFilter) {
    subscriber(level).init();
}

/// Like [`init_with_level`], but tolerates an already installed subscriber
pub fn try_init(level: LevelFilter) -> bool {
    subscriber(level).try_init().is_ok()
}

fn subscriber(level: LevelFilter) -> impl SubscriberInitExt {
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    tracing_subscriber::registry().with(LogFormat::from_env().layer(env_filter))
}
