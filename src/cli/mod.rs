pub mod args;
pub mod interactive;
pub mod validation;
