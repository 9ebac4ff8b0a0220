//! Report models, their styling, and the writer that lays them out

mod assembly;
pub use assembly::*;

mod model;
pub use model::*;

mod style;
pub use style::*;

mod writer;
pub use writer::*;
