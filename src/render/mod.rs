//! Rendering of positioned scenes.

pub mod svg;

pub use svg::render_svg;
