pub(crate) mod blender;
pub(crate) mod orchestrator;
pub(crate) mod renderer;
