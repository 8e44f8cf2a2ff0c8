//! Application services: use-case implementations.
//!
//! Each service struct accepts a port trait implementation via a generic
//! parameter (constructor injection), keeping this layer decoupled from
//! concrete adapters. Read-only use-cases only need an [`EntityReader`];
//! mutating ones need an [`EntityStore`].
//!
//! [`EntityReader`]: crate::ports::EntityReader
//! [`EntityStore`]: crate::ports::EntityStore

pub mod device_service;
pub mod dwelling_service;
pub mod pairing_service;
