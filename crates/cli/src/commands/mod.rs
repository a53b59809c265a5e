mod bundle;
mod inspect;
mod merge_config;
mod resolve;

pub use bundle::bundle_command;
pub use inspect::inspect_command;
pub use merge_config::merge_config_command;
pub use resolve::resolve_command;
