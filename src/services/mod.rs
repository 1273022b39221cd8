pub mod drawdown_service;
pub mod report_service;
pub mod return_service;
