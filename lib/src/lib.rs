pub mod certificate_config;
pub mod delivery_service;
pub mod dispatch_control;
pub mod dispatch_processor;
pub mod dispatch_resources;
pub mod environment;
pub mod error;
pub mod http_gateway;
pub mod recipient;
pub mod recipient_processor;
pub mod report_service;
pub mod send_result;
pub mod state_repository;
pub mod validation;
