//! Domain entities - the core business objects.

mod page;
mod post;
mod user;

pub use page::{POSTS_PER_PAGE, Page, PageRequest};
pub use post::{Post, PostForm, TITLE_MAX_LEN};
pub use user::{USERNAME_MAX_LEN, User};
