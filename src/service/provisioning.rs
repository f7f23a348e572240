//! Account Provisioning (collaborator, not core)
//!
//! Creates a user and its single wallet in one scope. Wallets are created
//! here and only here; the money-moving operations never create or delete
//! them.

use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;

use super::error::WalletError;
use super::types::ErrorBody;
use crate::models::{User, Wallet};
use crate::store::{Database, UserRepo, WalletRepo};

const DEFAULT_CURRENCY: &str = "NGN";
const WALLET_NUMBER_ATTEMPTS: usize = 5;

/// Successful provisioning receipt
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProvisionReceipt {
    pub user: User,
    pub wallet: Wallet,
}

/// Provisioning response body
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ProvisionBody {
    Receipt(ProvisionReceipt),
    Error(ErrorBody),
}

/// Provisioning reply
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProvisionReply {
    pub status_code: u16,
    pub body: ProvisionBody,
}

pub struct ProvisioningService;

impl ProvisioningService {
    /// Create a user together with an empty wallet
    pub async fn create_user(db: &Database, username: &str) -> Result<ProvisionReply, WalletError> {
        let username = username.trim();
        if username.is_empty() {
            return Ok(error_reply(400, "username is required"));
        }
        if username.len() > 64 {
            return Ok(error_reply(400, "username too long"));
        }

        if UserRepo::get_by_username(db.pool(), username).await?.is_some() {
            return Ok(error_reply(
                409,
                format!("User already exists: {}", username),
            ));
        }

        let mut tx = db.begin_repeatable_read().await?;

        let user = UserRepo::create(&mut tx, username).await?;

        let mut wallet_number = generate_wallet_number();
        for _ in 0..WALLET_NUMBER_ATTEMPTS {
            if !WalletRepo::wallet_number_exists(&mut tx, &wallet_number).await? {
                break;
            }
            wallet_number = generate_wallet_number();
        }

        let wallet = WalletRepo::create(&mut tx, user.id, &wallet_number, DEFAULT_CURRENCY).await?;

        tx.commit().await.map_err(crate::store::StoreError::from)?;

        tracing::info!(user_id = %user.id, wallet_id = %wallet.id, "User provisioned");

        Ok(ProvisionReply {
            status_code: 201,
            body: ProvisionBody::Receipt(ProvisionReceipt { user, wallet }),
        })
    }
}

fn error_reply(status_code: u16, msg: impl Into<String>) -> ProvisionReply {
    ProvisionReply {
        status_code,
        body: ProvisionBody::Error(ErrorBody::new(msg)),
    }
}

fn generate_wallet_number() -> String {
    let n: u64 = rand::thread_rng().gen_range(1_000_000_000..10_000_000_000);
    format!("WN{}", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_number_format() {
        for _ in 0..100 {
            let n = generate_wallet_number();
            assert!(n.starts_with("WN"));
            assert_eq!(n.len(), 12);
            assert!(n[2..].chars().all(|c| c.is_ascii_digit()));
        }
    }
}
