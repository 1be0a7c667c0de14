//! Service layer: relay orchestration.

pub mod relay_service;

pub use relay_service::RelayService;
