//! The settings page and the endpoints for managing all of the user's data at once.

mod clear_endpoint;
mod export_endpoint;
mod import_endpoint;
mod page;

pub use clear_endpoint::clear_data_endpoint;
pub use export_endpoint::export_endpoint;
pub use import_endpoint::import_endpoint;
pub use page::get_settings_page;
