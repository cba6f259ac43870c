pub mod clock;
pub mod config;
pub mod locale;
pub mod metrics;
pub mod notify;
pub mod plugin;
pub mod searcher;
pub mod settings;
pub mod testing;

pub use clock::{Clock, SystemClock};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use locale::Locale;
pub use notify::{Notice, NoticeBoard, NoticeLevel, Notifier, TracingNotifier};
pub use plugin::{PluginManifest, PLUGIN_VERSION};
pub use searcher::{
    GatewayOptions, HttpClientConfig, MediaType, ProwlarrClient, ReleaseRecord, ReleaseSource,
    SearchConfig, SearchError, SearchGateway,
};
pub use settings::{
    ConfigDescriptor, MemorySettingsStore, PluginSettings, SettingsError, SettingsStore,
    TomlSettingsStore,
};
