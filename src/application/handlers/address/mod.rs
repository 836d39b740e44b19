//! Address command and query handlers.

mod delete_address;
mod list_addresses;
mod set_default_address;

pub use delete_address::{DeleteAddressCommand, DeleteAddressHandler, ADDRESS_NOT_FOUND};
pub use list_addresses::ListAddressesHandler;
pub use set_default_address::{SetDefaultAddressCommand, SetDefaultAddressHandler};
