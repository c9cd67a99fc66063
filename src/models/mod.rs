pub mod card;
pub mod list;
pub mod record;
pub mod set;
pub mod sub;

pub use card::*;
pub use list::*;
pub use record::*;
pub use set::*;
pub use sub::*;
