//! Update specifications and their application to documents.
//!
//! An [UpdateSpec] is an ordered list of mutation operators built with a
//! fluent API. The [apply] function evaluates a spec against a document and
//! returns the mutated copy; the collection persists it.
//!
//! ```rust,ignore
//! use sediment::update::UpdateSpec;
//!
//! let spec = UpdateSpec::new()
//!     .set("cuisine", "Irish")
//!     .inc("violations", 1)
//!     .push("tags", "pub");
//! let result = collection.update(filter, &spec, &UpdateOptions::new())?;
//! ```
//!
//! Default options update at most the first matching document; clear
//! `just_once` on [UpdateOptions](crate::collection::UpdateOptions) to
//! update every match.
//!
//! Paths may contain the positional marker `$`, which resolves to the index
//! of the first array element matched by the originating filter:
//!
//! ```rust,ignore
//! let filter = field("name").eq("Juni").and(field("grades.score").eq(7));
//! let spec = UpdateSpec::new().set("grades.$.score", 9);
//! collection.update(filter, &spec, &UpdateOptions::new())?;
//! ```

mod applier;
#[allow(clippy::module_inception)]
mod spec;

pub use applier::apply;
pub use spec::*;
