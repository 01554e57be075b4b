mod archs;
mod cache;
mod config;
mod top;

pub use self::archs::archs;
pub use self::cache::cache;
pub use self::config::config;
pub use self::top::top;
