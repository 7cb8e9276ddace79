mod extraction;
mod installment;
mod kind;
mod placement;

pub use self::extraction::Extraction;
pub use self::installment::Installment;
pub use self::kind::Kind;
pub use self::placement::{Placement, SeriesMatch};
