mod any;
mod duration;
mod time;

pub use any::*;
pub use duration::*;
pub use time::*;
