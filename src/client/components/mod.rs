pub mod lotus_title;
pub mod navbar;
pub mod page;

pub use lotus_title::LotusTitleButton;
pub use navbar::Navbar;
pub use page::Page;
