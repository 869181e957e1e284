//! Concrete adapter implementations for ports.

pub mod console_presenter;
pub mod csv_log_adapter;
pub mod file_config_adapter;
pub mod json_presenter;
pub mod json_profile_adapter;
pub mod openai_adapter;
pub mod system_clock_adapter;
