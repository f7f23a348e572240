//! Money-Moving Services
//!
//! The three core operations (funding, transfer, daily interest accrual)
//! plus the provisioning collaborator. Each takes an explicit `&Database`
//! and returns a typed reply (or a fatal [`error::WalletError`]); HTTP
//! serialization is the gateway's problem.

pub mod error;
pub mod funding;
pub mod interest;
pub mod provisioning;
pub mod transfer;
pub mod types;

pub use error::WalletError;
pub use funding::FundingService;
pub use interest::{AccrualInput, InterestService};
pub use provisioning::ProvisioningService;
pub use transfer::{TransferInput, TransferService};
pub use types::{
    AccrualOutcome, ErrorBody, FundingBody, FundingReceipt, FundingReply, TransferBody,
    TransferReceipt, TransferReply,
};
