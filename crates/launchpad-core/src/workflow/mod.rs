//! Release decision layer
//!
//! Pure functions that, given what git reports, decide which git commands
//! the release needs next. Nothing here touches the repository or the
//! terminal; the CLI executes the returned [`GitStep`]s.

mod branches;
mod publish;
mod step;
mod tag;

pub use branches::*;
pub use publish::*;
pub use step::*;
pub use tag::*;
