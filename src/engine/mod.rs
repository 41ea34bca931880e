pub mod mastery;
pub mod queue;
pub mod scoring;
