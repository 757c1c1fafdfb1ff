pub mod item;
pub mod page;

pub use item::{Item, ItemType};
pub use page::{Page, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
