//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! handler returns an outcome value; collaborator errors are folded into
//! failure outcomes at the handler boundary.

pub mod account;
pub mod address;
pub mod product;
pub mod vendor;

#[cfg(test)]
pub(crate) mod test_support;

pub use account::{
    ChangePasswordCommand, ChangePasswordHandler, CurrentUserView, GetCurrentUserHandler,
    RequestPasswordResetCommand, RequestPasswordResetHandler, ResetPasswordCommand,
    ResetPasswordHandler,
};
pub use address::{
    DeleteAddressCommand, DeleteAddressHandler, ListAddressesHandler, SetDefaultAddressCommand,
    SetDefaultAddressHandler,
};
pub use product::{
    DeleteProductCommand, DeleteProductHandler, TrackProductViewCommand, TrackProductViewHandler,
};
pub use vendor::{DeactivateVendorCommand, DeactivateVendorHandler};
