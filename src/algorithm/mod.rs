/// Greedy difficulty-ordered tile assignment
pub mod assignment;
/// Remove-capable set of unused tiles
pub mod availability;
/// Generation pipeline orchestration
pub mod executor;
