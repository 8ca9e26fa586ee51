pub mod stage0_filter;
pub mod stage1_detect;
pub mod stage2_aggregate;
pub mod stage3_reconstruct;

pub use stage0_filter::*;
pub use stage1_detect::*;
pub use stage2_aggregate::*;
pub use stage3_reconstruct::*;
