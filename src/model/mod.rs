pub mod gene;
pub mod identity;

pub use gene::{GeneCategory, GeneId, LigandReceptorRecord, RegulatoryRecord, TfBinding};
pub use identity::{Binding, IdentityTable};
