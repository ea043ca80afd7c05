pub mod popup;
pub mod settings;
pub mod tab;
pub mod votes;
