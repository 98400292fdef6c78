//! API credentials for every tracked network.
//!
//! - `types`: the per-network bundle shapes and their validation
//! - `store`: the JSON credential file
//! - `prompt`: interactive editing of one bundle

pub mod prompt;
pub mod store;
pub mod types;

pub use prompt::prompt_for_bundle;
pub use store::CredentialStore;
pub use types::{masked, InstagramCredentials, TumblrCredentials, TwitterCredentials};
