pub mod document;
pub mod medicine;
pub mod results;
pub mod user;

pub use medicine::*;
pub use results::*;
pub use user::*;
