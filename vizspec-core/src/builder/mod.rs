mod builder;
mod element;

pub use builder::{build_spec, BuilderConfig, VizSpecBuilder};
pub use element::{VizElement, VizLayer, VizMark, VizRepeat};
