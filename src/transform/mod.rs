//! Transformers applied to workflows in flight

mod field_dropper;
mod upload;

pub use field_dropper::{FieldDropper, N8N_READ_ONLY_FIELDS};
pub use upload::UploadPreparer;
