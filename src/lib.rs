pub mod canvas_dump;
#[cfg(all(feature = "cli", feature = "png"))]
pub mod cli;
pub mod config;
pub mod diagram;
pub mod draw;
pub mod error;
pub mod fonts;
pub mod ir;
pub mod render;
pub mod theme;

#[cfg(all(feature = "cli", feature = "png"))]
pub use cli::run;
pub use config::{Config, RenderConfig};
pub use diagram::build_decision_tree;
pub use draw::Painter;
pub use error::RenderError;
pub use ir::Canvas;
pub use render::render_svg;
pub use theme::Theme;
