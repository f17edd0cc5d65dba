mod root;

pub use root::{Cli, Commands};
