pub mod error_mapper;

pub use error_mapper::{map_catalog_load_error, map_config_error, map_session_error};
