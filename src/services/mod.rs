pub mod request_builder;
pub mod session_service;
pub mod summary_service;
pub mod trend_service;
pub mod variant_workflow;
