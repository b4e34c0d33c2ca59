pub mod fs;
pub mod render;

pub use fs::{is_generated, is_rmd, open_input, output_path_for, resolve_inputs, OutputFile};
pub use render::{Renderer, RscriptRenderer, SkipRenderer};
