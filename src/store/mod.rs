pub mod attributes;
pub mod value;

pub use attributes::{AttributeStore, Subscription};
pub use value::Value;
