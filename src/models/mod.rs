pub mod todo;
pub mod user;

pub use todo::{Todo, TodoId, TodoInput, TodoSearchQuery};
pub use user::{User, UserProfile};
