//! Random tables: what a roll on a table means, and how a roll leads from
//! one table to the next.

mod load;
mod model;
mod registry;
mod resolve;

pub use model::{Outcome, Resolved, RollKey, Table};
pub use registry::TableRegistry;
pub use resolve::Resolver;
