mod item;
mod movement;
mod product;
mod scan;

pub use item::*;
pub use movement::*;
pub use product::*;
pub use scan::*;
