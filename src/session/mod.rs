pub mod planner;
pub mod run;
pub mod summary;
