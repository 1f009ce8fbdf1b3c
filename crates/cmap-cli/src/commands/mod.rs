pub mod analyze;
pub mod curriculum;
pub mod dispatch;
pub mod extract;
pub mod matching;
