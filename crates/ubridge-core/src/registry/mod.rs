pub mod record;
pub mod registry;

pub use record::{RecordId, TypeRecord};
pub use registry::{Ancestors, TypeRegistry};
