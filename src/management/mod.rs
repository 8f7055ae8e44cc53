mod chain;
mod image_cache;
mod session;
mod store;

pub use chain::MonthChain;
pub use chain::next_month;
pub use chain::should_continue;
pub use image_cache::AlbumImageCache;
pub use session::ApplicationState;
pub use session::ChainStatus;
pub use session::Effect;
pub use session::Event;
pub use session::should_persist;
pub use store::ImageUrlStore;
pub use store::JsonFileStore;
pub use store::StoreError;
