pub mod entities;
pub mod reaction;
pub mod search;
pub mod slug;
