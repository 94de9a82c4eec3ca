pub mod book;
pub mod id;
