//! Identity handlers: registration, login, and account maintenance.

mod change_password;
mod get_current_principal;
mod login;
mod register;
mod update_account;
mod update_avatar;
mod update_cover_image;

pub use change_password::{ChangePasswordCommand, ChangePasswordHandler};
pub use get_current_principal::{GetCurrentPrincipalHandler, GetCurrentPrincipalQuery};
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use register::{RegisterCommand, RegisterHandler, RegisterResult};
pub use update_account::{UpdateAccountCommand, UpdateAccountHandler};
pub use update_avatar::{UpdateAvatarCommand, UpdateAvatarHandler};
pub use update_cover_image::{UpdateCoverImageCommand, UpdateCoverImageHandler};
