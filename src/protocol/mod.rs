pub mod primitive;
mod row;
pub mod value;

pub use row::{BinaryRowPayload, TextRowPayload};
