//! Account and credential handlers.

mod change_password;
mod get_current_user;
mod request_password_reset;
mod reset_password;

pub use change_password::{
    ChangePasswordCommand, ChangePasswordHandler, CURRENT_PASSWORD_INCORRECT, INVALID_PASSWORD,
    PASSWORD_CHANGE_FAILED,
};
pub use get_current_user::{CurrentUserView, GetCurrentUserHandler};
pub use request_password_reset::{
    RequestPasswordResetCommand, RequestPasswordResetHandler, RESET_REQUESTED_MESSAGE,
};
pub use reset_password::{
    ResetPasswordCommand, ResetPasswordHandler, INVALID_EMAIL_OR_TOKEN, INVALID_REQUEST,
    PASSWORD_RESET_FAILED,
};
