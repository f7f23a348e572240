//! walletd - Ledger-Backed Wallet Service
//!
//! Per-user integer-cent balances where every balance mutation is paired
//! with an immutable ledger entry, inside one transactional scope.
//!
//! # Modules
//!
//! - [`interest_math`] - Calendar-aware daily interest math (pure)
//! - [`models`] - Persisted row types and state enums
//! - [`store`] - PostgreSQL store: scopes, row locks, repositories
//! - [`service`] - Funding, transfer, and interest-accrual operations
//! - [`gateway`] - HTTP collaborator (axum + Swagger UI)
//! - [`config`] / [`logging`] - Process configuration and tracing setup

pub mod config;
pub mod gateway;
pub mod interest_math;
pub mod logging;
pub mod models;
pub mod service;
pub mod store;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use models::{
    InterestRecord, LedgerEntry, LedgerEntryType, TransactionLog, TransactionLogState, User,
    Wallet,
};
pub use service::{
    AccrualInput, FundingService, InterestService, ProvisioningService, TransferInput,
    TransferService, WalletError,
};
pub use store::{Database, StoreError};
