pub mod consts;
pub mod directories;
pub mod error;
pub mod path;
pub mod providers;
pub mod settings;
pub mod test;
