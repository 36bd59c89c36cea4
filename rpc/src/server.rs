//! Axum router and server.
//!
//! Each engine sits behind its own mutex — a single global ordering of
//! mutating calls per ledger, which makes every check-then-write sequence
//! indivisible. Locks are held only for the synchronous engine call, never
//! across an await.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use salus_achievements::{Achievement, AchievementEngine};
use salus_auth::Authenticator;
use salus_health::ConditionEngine;
use salus_ledger::LedgerState;
use salus_rewards::RewardEngine;
use salus_store::{MemoryIdentityStore, MemorySessionStore};
use salus_types::{Timestamp, WalletAddress};

use crate::config::ServiceConfig;
use crate::error::RpcError;
use crate::handlers::*;
use crate::metrics::ServiceMetrics;

type ServiceAuthenticator = Authenticator<MemoryIdentityStore, MemorySessionStore>;

/// Shared state behind every handler.
pub struct AppState {
    pub authenticator: Mutex<ServiceAuthenticator>,
    pub rewards: Mutex<RewardEngine>,
    pub health: Mutex<ConditionEngine>,
    pub achievements: Mutex<AchievementEngine>,
    pub ledger_state: Arc<LedgerState>,
    pub metrics: ServiceMetrics,
}

impl AppState {
    /// Wire up the engines and authenticator from configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Arc<Self>, RpcError> {
        let charity = parse_address(&config.charity_address)?;
        let ledger_state = match &config.controller_address {
            Some(raw) => Arc::new(LedgerState::with_controller(parse_address(raw)?)),
            None => Arc::new(LedgerState::new()),
        };

        let params = config.params.clone();
        let authenticator = Authenticator::new(
            params.nonce_ttl_secs,
            params.max_pending_nonces,
            params.session_ttl_secs,
            MemoryIdentityStore::new(),
            MemorySessionStore::new(),
        );

        Ok(Arc::new(Self {
            authenticator: Mutex::new(authenticator),
            rewards: Mutex::new(RewardEngine::new(Arc::clone(&ledger_state), params.clone())),
            health: Mutex::new(ConditionEngine::new(Arc::clone(&ledger_state), params.clone())),
            achievements: Mutex::new(AchievementEngine::new(
                Arc::clone(&ledger_state),
                params,
                charity,
            )),
            ledger_state,
            metrics: ServiceMetrics::new(),
        }))
    }

    /// Resolve the bearer session to the caller's address.
    ///
    /// The role check happens inside the engines against this address; it
    /// is never re-derived from request fields.
    fn caller(&self, headers: &HeaderMap) -> Result<WalletAddress, RpcError> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(RpcError::MissingBearer)?;
        let session = self
            .authenticator
            .lock()
            .unwrap()
            .resolve_session(token, Timestamp::now())?;
        Ok(session.address)
    }
}

fn parse_address(raw: &str) -> Result<WalletAddress, RpcError> {
    if !raw.starts_with(WalletAddress::PREFIX) {
        return Err(RpcError::InvalidRequest(format!(
            "address must start with {}: {raw}",
            WalletAddress::PREFIX
        )));
    }
    Ok(WalletAddress::new(raw.to_owned()))
}

/// Build the full API router.
pub fn build_router(state: Arc<AppState>, enable_metrics: bool) -> Router {
    let mut router = Router::new()
        .route("/auth/challenge", post(issue_challenge))
        .route("/auth/verify", post(verify))
        .route("/rewards/eye-test", post(mint_eye_test))
        .route("/rewards/exercise", post(mint_exercise))
        .route("/rewards/family-member", post(mint_family_member))
        .route("/rewards/balance/:address", get(reward_balance))
        .route("/rewards/discount/:address", get(doctor_visit_discount))
        .route("/health/report", post(report_condition))
        .route("/health/history/:address", get(health_history))
        .route("/health/statistics/:address", get(health_statistics))
        .route("/achievements/mint", post(mint_achievement))
        .route("/achievements/sale", post(record_sale))
        .route("/achievements/:token_id", get(get_achievement))
        .route("/admin/pause", post(pause))
        .route("/admin/unpause", post(unpause))
        .route("/admin/roles", post(grant_role));

    if enable_metrics {
        router = router.route("/metrics", get(metrics));
    }

    router.layer(CorsLayer::permissive()).with_state(state)
}

// ── Authentication handlers ──────────────────────────────────────────────

async fn issue_challenge(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChallengeRequest>,
) -> Result<Json<ChallengeResponse>, RpcError> {
    let address = parse_address(&req.address)?;
    let challenge = state
        .authenticator
        .lock()
        .unwrap()
        .issue_challenge(&address, Timestamp::now())?;
    state.metrics.challenges_issued.inc();
    Ok(Json(ChallengeResponse {
        message: challenge.message,
        nonce: challenge.nonce,
    }))
}

async fn verify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, RpcError> {
    let address = parse_address(&req.address)?;
    let result = {
        let mut auth = state.authenticator.lock().unwrap();
        auth.verify(&address, &req.signature, &req.message, Timestamp::now())
    };
    let verified = match result {
        Ok(verified) => verified,
        Err(err) => {
            state.metrics.logins_failed.inc();
            return Err(err.into());
        }
    };

    state.metrics.logins_succeeded.inc();
    if let Ok(count) = state.authenticator.lock().unwrap().identity_count() {
        state.metrics.identity_count.set(count as i64);
    }
    Ok(Json(VerifyResponse {
        user: UserSummary {
            id: verified.identity.id,
            address: verified.identity.address.to_string(),
        },
        access_token: verified.session.token,
        is_new_user: verified.is_new_user,
    }))
}

// ── Fungible reward handlers ─────────────────────────────────────────────

async fn mint_eye_test(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<MintRequest>,
) -> Result<Json<MintResponse>, RpcError> {
    let caller = state.caller(&headers)?;
    let recipient = parse_address(&req.address)?;
    let mut rewards = state.rewards.lock().unwrap();
    let minted = rewards.mint_for_eye_test(&caller, &recipient, Timestamp::now())?;
    state.metrics.credits_minted.inc();
    Ok(Json(MintResponse {
        address: recipient.to_string(),
        minted: minted.raw(),
        balance: rewards.balance(&recipient).raw(),
    }))
}

async fn mint_exercise(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<MintRequest>,
) -> Result<Json<MintResponse>, RpcError> {
    let caller = state.caller(&headers)?;
    let recipient = parse_address(&req.address)?;
    let mut rewards = state.rewards.lock().unwrap();
    let minted = rewards.mint_for_daily_exercise(&caller, &recipient, Timestamp::now())?;
    state.metrics.credits_minted.inc();
    Ok(Json(MintResponse {
        address: recipient.to_string(),
        minted: minted.raw(),
        balance: rewards.balance(&recipient).raw(),
    }))
}

async fn mint_family_member(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<MintRequest>,
) -> Result<Json<MintResponse>, RpcError> {
    let caller = state.caller(&headers)?;
    let recipient = parse_address(&req.address)?;
    let mut rewards = state.rewards.lock().unwrap();
    let minted = rewards.mint_for_family_member(&caller, &recipient, Timestamp::now())?;
    state.metrics.credits_minted.inc();
    Ok(Json(MintResponse {
        address: recipient.to_string(),
        minted: minted.raw(),
        balance: rewards.balance(&recipient).raw(),
    }))
}

async fn reward_balance(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<BalanceResponse>, RpcError> {
    let address = parse_address(&address)?;
    let rewards = state.rewards.lock().unwrap();
    let account = rewards.account(&address).cloned().unwrap_or_default();
    Ok(Json(BalanceResponse {
        address: address.to_string(),
        balance: account.balance.raw(),
        total_minted: account.total_minted.raw(),
        last_exercise_day: account.last_exercise_at.map(|t| t.day_number()),
    }))
}

async fn doctor_visit_discount(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<DiscountResponse>, RpcError> {
    let address = parse_address(&address)?;
    let tier = state.rewards.lock().unwrap().doctor_visit_discount(&address);
    Ok(Json(DiscountResponse {
        address: address.to_string(),
        tier: format!("{tier:?}").to_lowercase(),
        percent: tier.percent(),
    }))
}

// ── Condition reward handlers ────────────────────────────────────────────

async fn report_condition(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ConditionReportRequest>,
) -> Result<Json<MintResponse>, RpcError> {
    let caller = state.caller(&headers)?;
    let recipient = parse_address(&req.address)?;
    let mut health = state.health.lock().unwrap();
    let minted = health.mint_for_condition(
        &caller,
        &recipient,
        req.tier,
        req.confidence,
        Timestamp::now(),
    )?;
    state.metrics.condition_reports.inc();
    Ok(Json(MintResponse {
        address: recipient.to_string(),
        minted: minted.raw(),
        balance: health.balance(&recipient).raw(),
    }))
}

async fn health_history(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<HistoryResponse>, RpcError> {
    let address = parse_address(&address)?;
    let records = state.health.lock().unwrap().history(&address).to_vec();
    Ok(Json(HistoryResponse {
        address: address.to_string(),
        records,
    }))
}

async fn health_statistics(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<StatisticsResponse>, RpcError> {
    let address = parse_address(&address)?;
    let statistics = state.health.lock().unwrap().statistics(&address);
    Ok(Json(StatisticsResponse {
        address: address.to_string(),
        statistics,
    }))
}

// ── Achievement handlers ─────────────────────────────────────────────────

async fn mint_achievement(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<MintAchievementRequest>,
) -> Result<Json<MintAchievementResponse>, RpcError> {
    let caller = state.caller(&headers)?;
    let recipient = parse_address(&req.recipient)?;
    let token_id = state.achievements.lock().unwrap().mint(
        &caller,
        &recipient,
        req.kind,
        req.metadata_ref,
        Timestamp::now(),
    )?;
    state.metrics.achievements_minted.inc();
    Ok(Json(MintAchievementResponse { token_id }))
}

async fn record_sale(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<RecordSaleRequest>,
) -> Result<Json<RecordSaleResponse>, RpcError> {
    let caller = state.caller(&headers)?;
    let record = state.achievements.lock().unwrap().record_sale(
        &caller,
        req.token_id,
        req.price,
        Timestamp::now(),
    )?;
    state.metrics.sales_recorded.inc();
    Ok(Json(RecordSaleResponse {
        token_id: record.token_id,
        price: record.price,
        royalty: record.royalty,
        seller_payout: record.price - record.royalty,
    }))
}

async fn get_achievement(
    State(state): State<Arc<AppState>>,
    Path(token_id): Path<u64>,
) -> Result<Json<Achievement>, RpcError> {
    let achievement = state
        .achievements
        .lock()
        .unwrap()
        .achievement(token_id)?
        .clone();
    Ok(Json(achievement))
}

// ── Admin handlers ───────────────────────────────────────────────────────

async fn pause(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<PauseResponse>, RpcError> {
    let caller = state.caller(&headers)?;
    state.ledger_state.pause(&caller)?;
    Ok(Json(PauseResponse { paused: true }))
}

async fn unpause(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<PauseResponse>, RpcError> {
    let caller = state.caller(&headers)?;
    state.ledger_state.unpause(&caller)?;
    Ok(Json(PauseResponse { paused: false }))
}

async fn grant_role(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<GrantRoleRequest>,
) -> Result<Json<serde_json::Value>, RpcError> {
    let caller = state.caller(&headers)?;
    let target = parse_address(&req.address)?;
    state.ledger_state.grant_role(&caller, target, req.role)?;
    Ok(Json(serde_json::json!({ "granted": true })))
}

async fn metrics(State(state): State<Arc<AppState>>) -> String {
    state.metrics.encode()
}

// ── Server ───────────────────────────────────────────────────────────────

/// Binds the configured address and serves the API until shutdown.
pub struct RpcServer {
    config: ServiceConfig,
}

impl RpcServer {
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    pub async fn serve(self) -> Result<(), RpcError> {
        let state = AppState::from_config(&self.config)?;
        let router = build_router(state, self.config.enable_metrics);

        let listener = tokio::net::TcpListener::bind(self.config.listen_addr)
            .await
            .map_err(|e| RpcError::Server(format!("failed to bind {}: {e}", self.config.listen_addr)))?;
        tracing::info!(addr = %self.config.listen_addr, "salus API listening");

        axum::serve(listener, router)
            .await
            .map_err(|e| RpcError::Server(format!("server error: {e}")))
    }
}
