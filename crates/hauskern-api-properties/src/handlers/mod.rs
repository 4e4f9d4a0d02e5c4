//! HTTP handlers for the property API.

pub mod contacts;
pub mod create;
pub mod delete;
pub mod extract;
pub mod get;
pub mod list;
pub mod update;

pub use contacts::{list_accountants_handler, list_managers_handler};
pub use create::create_property_handler;
pub use delete::delete_property_handler;
pub use extract::extract_property_handler;
pub use get::get_property_handler;
pub use list::list_properties_handler;
pub use update::update_property_handler;
