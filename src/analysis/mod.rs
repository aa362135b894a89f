pub mod forecast;
pub mod selection;
