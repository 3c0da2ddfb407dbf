pub mod items;
pub mod purchases;
pub mod reports;
pub mod users;

pub use items::*;
pub use purchases::*;
pub use reports::*;
pub use users::*;
