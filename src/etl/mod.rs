//! Extract, transform, load abstractions
//!
//! Every command that moves workflows is a pipeline: `build` renders
//! templates into a directory, `pull` copies the server into a directory,
//! and `push` copies a directory onto the server.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::Pipeline;
pub use transform::{IdentityTransformer, Transformer};
