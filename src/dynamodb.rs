mod attribute_value;
mod change_record;
mod event_name;

pub use attribute_value::*;
pub use change_record::*;
pub use event_name::*;
