pub mod list;
pub mod ydk;
