mod cache;
mod loader;
mod source;

pub use cache::{ensure_fresh, CacheStatus};
pub use loader::load_satellites;
pub use source::{HttpTleSource, TleSource};

#[cfg(test)]
pub(crate) use source::fake::{serve_once, FakeTleSource};
