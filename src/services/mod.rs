pub mod allocation;
pub mod auto_logout;
pub mod dashboard;
pub mod fetch;
pub mod refresh;
pub mod version_gate;
