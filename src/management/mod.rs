mod auth;
mod refresh;
pub mod store;

pub use auth::TokenManager;
pub use refresh::RefreshScheduler;
pub use store::ACCESS_TOKEN_KEY;
pub use store::FileTokenStore;
pub use store::MemoryTokenStore;
pub use store::REFRESH_TOKEN_KEY;
pub use store::TokenStore;
