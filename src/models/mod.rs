pub mod inventory;
pub mod node;

pub use self::inventory::*;
pub use self::node::*;
