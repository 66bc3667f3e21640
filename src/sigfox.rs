mod decode;
mod reading;

pub use decode::*;
pub use reading::*;
