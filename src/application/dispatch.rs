//! Request dispatch.
//!
//! A transport layer deserializes a [`MarketplaceRequest`], resolves the
//! caller into a [`RequestContext`] and hands both to
//! [`MarketplaceCore::dispatch`]. The returned [`Response`] serializes as the
//! bare outcome JSON.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::address::Address;
use crate::domain::foundation::{Outcome, RequestContext, TypedOutcome};
use crate::ports::{CurrentCaller, IdentityProvider, PasswordResetNotifier, Persistence, TokenStore};

use super::handlers::{
    ChangePasswordCommand, ChangePasswordHandler, CurrentUserView, DeactivateVendorCommand,
    DeactivateVendorHandler, DeleteAddressCommand, DeleteAddressHandler, DeleteProductCommand,
    DeleteProductHandler, GetCurrentUserHandler, ListAddressesHandler,
    RequestPasswordResetCommand, RequestPasswordResetHandler, ResetPasswordCommand,
    ResetPasswordHandler, SetDefaultAddressCommand, SetDefaultAddressHandler,
    TrackProductViewCommand, TrackProductViewHandler,
};

/// One variant per marketplace operation.
#[derive(Debug, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum MarketplaceRequest {
    DeleteProduct(DeleteProductCommand),
    TrackProductView(TrackProductViewCommand),
    DeactivateVendor(DeactivateVendorCommand),
    ListAddresses,
    DeleteAddress(DeleteAddressCommand),
    SetDefaultAddress(SetDefaultAddressCommand),
    RequestPasswordReset(RequestPasswordResetCommand),
    ResetPassword(ResetPasswordCommand),
    ChangePassword(ChangePasswordCommand),
    GetCurrentUser,
}

impl MarketplaceRequest {
    /// Operation name as used in the `operation` tag.
    pub fn operation(&self) -> &'static str {
        match self {
            MarketplaceRequest::DeleteProduct(_) => "delete_product",
            MarketplaceRequest::TrackProductView(_) => "track_product_view",
            MarketplaceRequest::DeactivateVendor(_) => "deactivate_vendor",
            MarketplaceRequest::ListAddresses => "list_addresses",
            MarketplaceRequest::DeleteAddress(_) => "delete_address",
            MarketplaceRequest::SetDefaultAddress(_) => "set_default_address",
            MarketplaceRequest::RequestPasswordReset(_) => "request_password_reset",
            MarketplaceRequest::ResetPassword(_) => "reset_password",
            MarketplaceRequest::ChangePassword(_) => "change_password",
            MarketplaceRequest::GetCurrentUser => "get_current_user",
        }
    }
}

/// Outcome of a dispatched request, by payload shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Done(Outcome),
    Flag(TypedOutcome<bool>),
    Addresses(TypedOutcome<Vec<Address>>),
    CurrentUser(TypedOutcome<CurrentUserView>),
}

impl Response {
    pub fn succeeded(&self) -> bool {
        match self {
            Response::Done(o) => o.succeeded(),
            Response::Flag(o) => o.succeeded(),
            Response::Addresses(o) => o.succeeded(),
            Response::CurrentUser(o) => o.succeeded(),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Response::Done(o) => o.message(),
            Response::Flag(o) => o.message(),
            Response::Addresses(o) => o.message(),
            Response::CurrentUser(o) => o.message(),
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            Response::Done(o) => o.errors(),
            Response::Flag(o) => o.errors(),
            Response::Addresses(o) => o.errors(),
            Response::CurrentUser(o) => o.errors(),
        }
    }
}

/// Collaborators the core is wired to.
#[derive(Clone)]
pub struct CorePorts {
    pub persistence: Arc<dyn Persistence>,
    pub identity: Arc<dyn IdentityProvider>,
    pub tokens: Arc<dyn TokenStore>,
    pub notifier: Arc<dyn PasswordResetNotifier>,
}

/// Facade owning one handler per operation.
pub struct MarketplaceCore {
    delete_product: DeleteProductHandler,
    track_product_view: TrackProductViewHandler,
    deactivate_vendor: DeactivateVendorHandler,
    list_addresses: ListAddressesHandler,
    delete_address: DeleteAddressHandler,
    set_default_address: SetDefaultAddressHandler,
    request_password_reset: RequestPasswordResetHandler,
    reset_password: ResetPasswordHandler,
    change_password: ChangePasswordHandler,
    get_current_user: GetCurrentUserHandler,
}

impl MarketplaceCore {
    /// `reset_url` is the frontend page reset links point at.
    pub fn new(ports: CorePorts, reset_url: Url) -> Self {
        let CorePorts {
            persistence,
            identity,
            tokens,
            notifier,
        } = ports;

        Self {
            delete_product: DeleteProductHandler::new(persistence.clone()),
            track_product_view: TrackProductViewHandler::new(persistence.clone()),
            deactivate_vendor: DeactivateVendorHandler::new(persistence.clone()),
            list_addresses: ListAddressesHandler::new(persistence.clone()),
            delete_address: DeleteAddressHandler::new(persistence.clone()),
            set_default_address: SetDefaultAddressHandler::new(persistence),
            request_password_reset: RequestPasswordResetHandler::new(
                identity.clone(),
                notifier,
                reset_url,
            ),
            reset_password: ResetPasswordHandler::new(identity.clone(), tokens.clone()),
            change_password: ChangePasswordHandler::new(identity.clone(), tokens),
            get_current_user: GetCurrentUserHandler::new(identity),
        }
    }

    /// Route a request to its handler.
    #[tracing::instrument(skip_all, fields(operation = request.operation()))]
    pub async fn dispatch(&self, request: MarketplaceRequest, ctx: &RequestContext) -> Response {
        match request {
            MarketplaceRequest::DeleteProduct(cmd) => {
                Response::Flag(self.delete_product.handle(cmd, ctx).await)
            }
            MarketplaceRequest::TrackProductView(cmd) => {
                Response::Done(self.track_product_view.handle(cmd, ctx).await)
            }
            MarketplaceRequest::DeactivateVendor(cmd) => {
                Response::Flag(self.deactivate_vendor.handle(cmd, ctx).await)
            }
            MarketplaceRequest::ListAddresses => {
                Response::Addresses(self.list_addresses.handle(ctx).await)
            }
            MarketplaceRequest::DeleteAddress(cmd) => {
                Response::Flag(self.delete_address.handle(cmd, ctx).await)
            }
            MarketplaceRequest::SetDefaultAddress(cmd) => {
                Response::Flag(self.set_default_address.handle(cmd, ctx).await)
            }
            MarketplaceRequest::RequestPasswordReset(cmd) => {
                Response::Done(self.request_password_reset.handle(cmd, ctx).await)
            }
            MarketplaceRequest::ResetPassword(cmd) => {
                Response::Done(self.reset_password.handle(cmd, ctx).await)
            }
            MarketplaceRequest::ChangePassword(cmd) => {
                Response::Done(self.change_password.handle(cmd, ctx).await)
            }
            MarketplaceRequest::GetCurrentUser => {
                Response::CurrentUser(self.get_current_user.handle(ctx).await)
            }
        }
    }

    /// Resolve the caller and dispatch with a fresh context.
    pub async fn dispatch_as(&self, request: MarketplaceRequest, caller: &dyn CurrentCaller) -> Response {
        let ctx = caller.request_context();
        self.dispatch(request, &ctx).await
    }
}
