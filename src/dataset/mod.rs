pub mod generator;
pub mod info;
pub mod record;

pub use generator::{generate_examples, ExampleGenerator};
pub use info::{
    dataset_info, features, manual_download_instructions, split_generators, DatasetInfo,
    FeatureType, SplitGenerator,
};
pub use record::{AudioField, ExampleRecord};
