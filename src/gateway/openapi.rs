//! OpenAPI document

use utoipa::OpenApi;

use super::handlers;
use super::types;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "walletd API",
        description = "Ledger-backed wallet service: funding, idempotent transfers, daily interest accrual"
    ),
    paths(
        handlers::health::health,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::wallet::get_wallet,
        handlers::wallet::get_wallet_ledger,
        handlers::wallet::fund_wallet,
        handlers::transfer::post_transfer,
        handlers::interest::accrue_interest,
        handlers::interest::get_interest_records,
    ),
    components(schemas(
        types::CreateUserRequest,
        types::FundWalletRequest,
        types::TransferRequest,
        types::AccrueInterestRequest,
        handlers::health::HealthResponse,
        handlers::wallet::WalletLedgerResponse,
        handlers::interest::InterestRecordsResponse,
        crate::models::User,
        crate::models::Wallet,
        crate::models::LedgerEntry,
        crate::models::LedgerEntryType,
        crate::models::InterestRecord,
        crate::service::ErrorBody,
        crate::service::TransferReceipt,
        crate::service::FundingReceipt,
        crate::service::AccrualOutcome,
    )),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Users", description = "Account provisioning"),
        (name = "Wallets", description = "Wallet state, ledger, funding"),
        (name = "Transfers", description = "Idempotent peer transfers"),
        (name = "Interest", description = "Daily interest accrual")
    )
)]
pub struct ApiDoc;
