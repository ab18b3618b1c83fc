pub mod proportion;
pub mod safe_math;
