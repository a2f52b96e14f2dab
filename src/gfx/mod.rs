//! # Graphics Module
//!
//! The little wgpu plumbing the standalone tool needs: a configured window
//! surface and a per-frame clear pass that the ImGui overlay renders into.
//! There is no scene rasterization here; the viewport exists to host the
//! tool windows.

pub mod surface;

pub use surface::RenderSurface;
