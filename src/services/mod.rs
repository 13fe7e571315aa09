pub mod bindings;
pub mod notifier;
pub mod picker;
pub mod transport;
pub mod upload_state;
pub mod widget;
