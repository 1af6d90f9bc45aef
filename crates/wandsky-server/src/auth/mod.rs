//! Session bridge between the browser and the backend's bearer tokens.

pub mod credentials;
pub mod extract;
pub mod google;
pub mod session;

pub use extract::{MaybeSession, RequireSession};
pub use google::GoogleOAuthClient;
pub use session::{OAuthAccount, Session, SessionKeys, SignedInUser};
