pub mod publisher;
pub mod serializer;


pub use publisher::{Publisher, SnsPublisher, StdoutPublisher};
pub use serializer::JsonSerializer;
