pub mod human_format;
pub mod media_type;
pub mod network;
pub mod paths;

pub use human_format::{format_memory, format_uptime};
pub use paths::{file_name_string, normalize_path, resolve_path};
