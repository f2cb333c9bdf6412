pub mod stage0_merge;
pub mod stage1_score;
pub mod stage2_aggregate;

pub use stage0_merge::*;
pub use stage1_score::*;
pub use stage2_aggregate::*;
