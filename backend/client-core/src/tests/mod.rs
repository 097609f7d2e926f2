mod component_state;
mod render;
mod session_store;
mod view;
