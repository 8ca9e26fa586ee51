pub mod boundary;
pub mod transcript;
pub mod window;

pub use boundary::*;
pub use transcript::*;
pub use window::*;
