//! Integration test modules.

mod geolocation_test;
mod persistence_flow_test;
