//! Feature Assembly
//!
//! Turns form selections and numeric inputs into a feature record keyed by
//! canonical feature name, and lays that record out in the column order the
//! model artifact declares.

mod assembler;
mod error;
mod input;
mod record;
mod schema;

pub use assembler::assemble;
pub use error::{AssemblyError, SchemaMismatchError};
pub use input::{FormInput, Numerics, Selections};
pub use record::FeatureRecord;
pub use schema::reorder;
