pub mod error;
pub mod identity;
pub mod record;
pub mod response;
pub mod schema;
pub mod usage;

pub use error::{Error, Result};
pub use identity::*;
pub use record::*;
pub use response::*;
pub use schema::*;
pub use usage::*;
