mod changes;
mod component;
mod connect;
mod controls;
mod events;
mod initial;
mod render;
mod state;
mod types;
mod viewport;

pub use component::FlowCanvas;
pub use state::FlowState;
