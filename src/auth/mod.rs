//! Session lifecycle: in-memory credential storage, single-flight refresh
//! coordination, and sign-in/sign-out/registration.

pub(crate) mod refresh;
pub mod session;
pub mod store;

pub use session::{LogoutReason, NewAccount, Session, SessionEvent, SessionState};
pub use store::Identity;
