pub mod comments;
pub mod flow;
mod icons;
pub mod menu;
