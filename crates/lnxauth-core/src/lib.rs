//! lnxauth Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `SessionRecord`, `AuthOutcome`, `AuthError`
//! - **Use cases** - `AuthSessionUseCase` (sign-in / sign-out orchestration)
//! - **Port definitions** - Traits for adapters: `ICredentialBroker`,
//!   `IIdentityProvider`, `ISessionStore`, `IConnectivityMonitor`
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure session-state logic with no external
//! dependencies. Ports define trait interfaces that adapter crates implement
//! (credential broker, cloud identity provider, preference store, network
//! reachability). Use cases orchestrate domain entities through port
//! interfaces and convert every failure into an [`domain::AuthOutcome`]
//! result value at the boundary.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
