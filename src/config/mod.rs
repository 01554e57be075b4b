mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{
    CacheConfig, Config, DisplayConfig, Limits, MirrorConfig, DEFAULT_CACHE_SIZE,
    DEFAULT_MIRROR_URL, DEFAULT_SHOW_COUNT,
};
