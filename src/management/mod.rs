mod auth;
mod session;

pub use auth::begin_login;
pub use auth::complete_login;
pub use auth::logout;
pub use auth::restore_credential;
pub use session::AuthSession;
