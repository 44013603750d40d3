//! NBT tag kinds and the tag value model.

mod compound;
mod kind;
mod list;
mod tag;

pub use compound::Compound;
pub use kind::TagKind;
pub use list::List;
pub use tag::{Payload, Tag};
