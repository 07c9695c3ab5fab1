pub mod http_submitter;
pub mod navigator;

pub use http_submitter::HttpSubmitter;
pub use navigator::TimedNavigator;
