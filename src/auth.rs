//! Auth-domain building blocks: scope sets, redacted secrets, and issued credentials.

pub mod credentials;
pub mod scope;
pub mod secret;

pub use credentials::*;
pub use scope::*;
pub use secret::*;
