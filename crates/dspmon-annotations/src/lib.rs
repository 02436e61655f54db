//! Operator status annotations: the durable JSON document and the
//! in-memory session state layered on top of it.

mod error;
mod session;
mod store;

pub use error::AnnotationError;
pub use session::AnnotationSession;
pub use store::{AnnotationMap, AnnotationStore};
