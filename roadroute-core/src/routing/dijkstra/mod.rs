mod path_finder;
mod result;
mod state;

pub use path_finder::{PathFinder, find_path};
pub use result::PathResult;
