//! The profile card: a pure layout of the attribute record, rendered live
//! and as a standalone snapshot for export.

mod card;
pub mod fonts;
pub mod snapshot;
pub mod surface;

pub use card::ProfileCard;
pub use snapshot::CardSnapshot;
pub use surface::ProfileSurface;
