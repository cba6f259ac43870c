//! Release search against Prowlarr.
//!
//! [`SearchGateway`] is the entry point: it checks the result cache, calls a
//! [`ReleaseSource`] on a miss and normalizes what comes back into
//! [`ReleaseRecord`]s. [`ProwlarrClient`] is the production source.

mod cache;
mod gateway;
mod normalize;
mod prowlarr;
mod types;

pub use cache::{cache_key, SearchCache};
pub use gateway::{GatewayOptions, SearchGateway};
pub use normalize::{format_size, normalize_release, normalize_releases, NormalizeOptions};
pub use prowlarr::{ClientBuildError, HttpClientConfig, ProwlarrClient};
pub use types::*;
