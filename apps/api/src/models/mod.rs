pub mod keyword;
pub mod location;
pub mod pages;
pub mod research;
