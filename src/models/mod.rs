pub mod popup;
pub mod rating;
pub mod settings;
