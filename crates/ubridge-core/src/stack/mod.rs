pub mod index;
pub mod stack;
pub mod value;

pub use index::{absolute_index, slot_index};
pub use stack::{HostStack, Stack, AUX_HEADROOM};
pub use value::{BoxedObject, RawAddress, Value, NO_VALUE};
