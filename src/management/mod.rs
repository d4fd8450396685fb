mod auth;
mod datasets;
mod memo;
mod session;

pub use auth::TokenManager;
pub use datasets::collect_datasets;
pub use memo::Memo;
pub use memo::MemoCache;
pub use session::AuthPhase;
pub use session::CodeExchange;
pub use session::Session;
pub use session::SessionError;
