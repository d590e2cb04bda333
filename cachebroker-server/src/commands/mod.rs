pub mod catalog;
pub mod simulate;
