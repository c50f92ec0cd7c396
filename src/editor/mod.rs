pub mod events;
pub mod plugin;
pub mod regions;
pub mod resources;
pub mod session;
pub mod systems;

pub use plugin::RegionEditorPlugin;
