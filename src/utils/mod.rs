pub mod config;
pub mod config_loader;

pub use config::{ForeignProfitPolicy, RouterConfigRoot, RouterConfigSection};
pub use config_loader::{ConfigLoader, ConfigLoaderSync, LoadConfigError, load_from_file, load_from_file_sync, load_from_str};
