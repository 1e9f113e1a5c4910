pub mod dashboard_api;
pub mod rest_gateway;
