mod content;
mod tokens;

pub use content::ContentError;
pub use content::ContentManager;
pub use content::DEBOUNCE_WINDOW;
pub use content::Debouncer;
pub use content::FETCH_ATTEMPTS;
pub use content::GridSelection;
pub use content::RETRY_DELAY;
pub use tokens::SWEEP_INTERVAL_SECS;
pub use tokens::TOKEN_TTL_SECS;
pub use tokens::TokenStore;
pub use tokens::TokenStoreError;
pub use tokens::spawn_sweeper;
