//! Schema Bootstrap
//!
//! `CREATE TABLE IF NOT EXISTS` DDL executed at startup. The uniqueness
//! constraints here are load-bearing: `transaction_logs_tb.idempotency_key`
//! closes the concurrent-transfer race and
//! `interest_records_tb (wallet_id, interest_date)` closes the concurrent
//! accrual race. Application code assumes both exist.

use sqlx::PgPool;

use super::StoreError;

const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users_tb (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        username VARCHAR(64) NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS wallets_tb (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        wallet_number VARCHAR(32) NOT NULL UNIQUE,
        user_id UUID NOT NULL UNIQUE REFERENCES users_tb(id),
        balance_cents BIGINT NOT NULL DEFAULT 0,
        currency VARCHAR(3) NOT NULL DEFAULT 'NGN',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ledger_tb (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        wallet_id UUID NOT NULL REFERENCES wallets_tb(id),
        amount_cents BIGINT NOT NULL,
        entry_type VARCHAR(32) NOT NULL,
        reference_id VARCHAR(64),
        reference_type VARCHAR(32),
        balance_after_cents BIGINT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"CREATE INDEX IF NOT EXISTS idx_ledger_wallet ON ledger_tb (wallet_id, created_at DESC)"#,
    r#"CREATE INDEX IF NOT EXISTS idx_ledger_reference ON ledger_tb (reference_id, reference_type)"#,
    r#"
    CREATE TABLE IF NOT EXISTS interest_records_tb (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        wallet_id UUID NOT NULL REFERENCES wallets_tb(id),
        interest_date DATE NOT NULL,
        balance_cents_at_eod BIGINT NOT NULL,
        interest_cents BIGINT NOT NULL,
        rate_used NUMERIC(10, 6) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        UNIQUE (wallet_id, interest_date)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS transaction_logs_tb (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        idempotency_key VARCHAR(64) NOT NULL UNIQUE,
        state VARCHAR(16) NOT NULL,
        from_wallet_id UUID,
        to_wallet_id UUID,
        amount_cents BIGINT,
        error_message TEXT,
        response_payload JSONB,
        response_status_code INT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"CREATE INDEX IF NOT EXISTS idx_transaction_logs_state ON transaction_logs_tb (state)"#,
];

/// Run the DDL. Idempotent; safe to call on every startup.
pub async fn init(pool: &PgPool) -> Result<(), StoreError> {
    for statement in DDL {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("Database schema ready");
    Ok(())
}
