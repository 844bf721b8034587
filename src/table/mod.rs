//! Response tabularization - flatten nested documents and lay them out as a
//! column-aligned table for an external renderer.

pub mod flatten;
pub mod tabulate;

pub use flatten::{flatten, flatten_at, FlatRecord};
pub use tabulate::{tabularize, Table};
