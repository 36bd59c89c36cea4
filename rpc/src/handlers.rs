//! Request and response DTOs for the HTTP API.

use salus_health::{HealthRecord, HealthStatistics};
use salus_types::{ConditionTier, Role, Signature};
use serde::{Deserialize, Serialize};

// ── Authentication ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChallengeRequest {
    pub address: String,
}

#[derive(Serialize)]
pub struct ChallengeResponse {
    pub message: String,
    pub nonce: String,
}

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub address: String,
    pub signature: Signature,
    pub message: String,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub user: UserSummary,
    pub access_token: String,
    pub is_new_user: bool,
}

#[derive(Serialize)]
pub struct UserSummary {
    pub id: u64,
    pub address: String,
}

// ── Fungible rewards ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct MintRequest {
    /// Recipient of the reward.
    pub address: String,
}

#[derive(Serialize)]
pub struct MintResponse {
    pub address: String,
    pub minted: u128,
    pub balance: u128,
}

#[derive(Serialize)]
pub struct BalanceResponse {
    pub address: String,
    pub balance: u128,
    pub total_minted: u128,
    pub last_exercise_day: Option<u64>,
}

#[derive(Serialize)]
pub struct DiscountResponse {
    pub address: String,
    pub tier: String,
    pub percent: u8,
}

// ── Condition rewards ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ConditionReportRequest {
    pub address: String,
    pub tier: ConditionTier,
    pub confidence: u8,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub address: String,
    pub records: Vec<HealthRecord>,
}

#[derive(Serialize)]
pub struct StatisticsResponse {
    pub address: String,
    #[serde(flatten)]
    pub statistics: HealthStatistics,
}

// ── Achievements ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct MintAchievementRequest {
    pub recipient: String,
    pub kind: u16,
    pub metadata_ref: String,
}

#[derive(Serialize)]
pub struct MintAchievementResponse {
    pub token_id: u64,
}

#[derive(Deserialize)]
pub struct RecordSaleRequest {
    pub token_id: u64,
    pub price: u128,
}

#[derive(Serialize)]
pub struct RecordSaleResponse {
    pub token_id: u64,
    pub price: u128,
    pub royalty: u128,
    pub seller_payout: u128,
}

// ── Admin ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PauseResponse {
    pub paused: bool,
}

#[derive(Deserialize)]
pub struct GrantRoleRequest {
    pub address: String,
    pub role: Role,
}
