pub mod helpers;
pub mod index;
pub mod detail;
pub mod results;
pub mod vote;

pub use index::*;
pub use detail::*;
pub use results::*;
pub use vote::*;
