mod store;
mod vault;

pub use store::{LogoutReason, SessionEvent, SessionStore};
pub use vault::SessionVault;
