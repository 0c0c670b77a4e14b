pub mod order;
pub mod price;
pub mod stock;
pub mod variation;

pub use order::*;
pub use price::*;
pub use stock::*;
pub use variation::*;
