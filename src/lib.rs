pub mod audio;
pub mod config;
pub mod corpus;
pub mod dataset;
pub mod error;

pub use config::{Config, Language, BUILDER_CONFIGS};
pub use corpus::Split;
pub use dataset::{generate_examples, ExampleGenerator, ExampleRecord};
pub use error::{MustcError, Result};
