mod convert;
mod lines;
mod output;
mod template;

pub use convert::cmd_convert;
pub use lines::cmd_lines;
pub use template::cmd_template;
