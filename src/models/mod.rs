pub mod collection;
pub mod event;
