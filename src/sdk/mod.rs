pub mod config;
pub mod directions;
pub mod map;
pub mod routing;
pub mod session;
pub mod util;
