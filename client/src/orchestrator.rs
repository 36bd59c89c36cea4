//! The connection orchestrator — a singleton state machine that
//! de-duplicates concurrent requests to the wallet agent.
//!
//! Single-flight: one pending `Shared` future per operation kind. A caller
//! finding a flight in place joins it instead of issuing a second wallet
//! prompt; all joiners observe the same result. Flights update the machine
//! state themselves on completion, so the bookkeeping happens exactly once
//! no matter how many callers joined.
//!
//! The mutex is only ever held between awaits, never across one.

use std::sync::{Arc, Mutex};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use salus_types::WalletAddress;

use crate::agent::WalletAgent;
use crate::api::{AuthApi, AuthSession};
use crate::error::ClientError;

type Flight<T> = Shared<BoxFuture<'static, Result<T, ClientError>>>;

/// Where the machine currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionPhase {
    Idle,
    Connecting,
    Connected,
    Authenticating,
    Authenticated,
    /// A flight failed. `connect`/`authenticate` may be retried, or
    /// `reset` clears everything.
    Error,
}

struct Inner {
    phase: ConnectionPhase,
    address: Option<WalletAddress>,
    session: Option<AuthSession>,
    connect_flight: Option<Flight<WalletAddress>>,
    auth_flight: Option<Flight<AuthSession>>,
}

/// De-duplicates concurrent `connect` and `authenticate` requests against
/// the external wallet agent.
pub struct ConnectionOrchestrator<A, B> {
    agent: Arc<A>,
    api: Arc<B>,
    inner: Arc<Mutex<Inner>>,
}

impl<A, B> ConnectionOrchestrator<A, B>
where
    A: WalletAgent + 'static,
    B: AuthApi + 'static,
{
    pub fn new(agent: Arc<A>, api: Arc<B>) -> Self {
        Self {
            agent,
            api,
            inner: Arc::new(Mutex::new(Inner {
                phase: ConnectionPhase::Idle,
                address: None,
                session: None,
                connect_flight: None,
                auth_flight: None,
            })),
        }
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.inner.lock().unwrap().phase
    }

    /// The connected address, if the machine has one.
    pub fn address(&self) -> Option<WalletAddress> {
        self.inner.lock().unwrap().address.clone()
    }

    /// The authenticated session, if the machine has one.
    pub fn session(&self) -> Option<AuthSession> {
        self.inner.lock().unwrap().session.clone()
    }

    /// Connect to the wallet agent.
    ///
    /// Joins an existing in-flight attempt if there is one. When already
    /// connected, queries the agent's current address instead of issuing a
    /// new request — no duplicate prompt.
    pub async fn connect(&self) -> Result<WalletAddress, ClientError> {
        let (existing_flight, already_connected) = {
            let inner = self.inner.lock().unwrap();
            let existing_flight = inner.connect_flight.clone();
            let already_connected = matches!(
                inner.phase,
                ConnectionPhase::Connected
                    | ConnectionPhase::Authenticating
                    | ConnectionPhase::Authenticated
            );
            (existing_flight, already_connected)
        };
        if let Some(flight) = existing_flight {
            return flight.await;
        }

        if already_connected {
            if let Some(address) = self.agent.current_address().await {
                return Ok(address);
            }
            // The agent dropped the connection behind our back; fall
            // through and request a fresh one.
        }

        let flight = {
            let mut inner = self.inner.lock().unwrap();
            // Re-check: another caller may have started a flight while we
            // were querying the agent.
            if let Some(flight) = &inner.connect_flight {
                flight.clone()
            } else {
                inner.phase = ConnectionPhase::Connecting;
                let flight = self.spawn_connect_flight();
                inner.connect_flight = Some(flight.clone());
                flight
            }
        };
        flight.await
    }

    /// Run the full challenge → sign → verify sequence.
    ///
    /// Single-flighted like `connect`. Connects first if needed (joining
    /// any connect flight in progress). Already authenticated → returns
    /// the existing session.
    pub async fn authenticate(&self) -> Result<AuthSession, ClientError> {
        {
            let inner = self.inner.lock().unwrap();
            if let Some(flight) = &inner.auth_flight {
                let flight = flight.clone();
                drop(inner);
                return flight.await;
            }
            if inner.phase == ConnectionPhase::Authenticated {
                if let Some(session) = &inner.session {
                    return Ok(session.clone());
                }
            }
        }

        let address = self.connect().await?;

        let flight = {
            let mut inner = self.inner.lock().unwrap();
            if let Some(flight) = &inner.auth_flight {
                flight.clone()
            } else {
                inner.phase = ConnectionPhase::Authenticating;
                let flight = self.spawn_auth_flight(address);
                inner.auth_flight = Some(flight.clone());
                flight
            }
        };
        flight.await
    }

    /// Escape hatch: clear all in-flight markers and return to `Idle`.
    ///
    /// Required because wallet agents can silently drop a request (the
    /// user closes a popup) without any callback. Callers still awaiting a
    /// dropped flight keep waiting on it; new calls start fresh.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.connect_flight = None;
        inner.auth_flight = None;
        inner.phase = ConnectionPhase::Idle;
        inner.address = None;
        inner.session = None;
        tracing::debug!("connection orchestrator reset");
    }

    fn spawn_connect_flight(&self) -> Flight<WalletAddress> {
        let agent = Arc::clone(&self.agent);
        let inner = Arc::clone(&self.inner);
        async move {
            let result = agent.connect().await;
            let mut inner = inner.lock().unwrap();
            inner.connect_flight = None;
            match &result {
                Ok(address) => {
                    inner.phase = ConnectionPhase::Connected;
                    inner.address = Some(address.clone());
                }
                Err(err) => {
                    inner.phase = ConnectionPhase::Error;
                    tracing::warn!(%err, "wallet connect failed");
                }
            }
            result
        }
        .boxed()
        .shared()
    }

    fn spawn_auth_flight(&self, address: WalletAddress) -> Flight<AuthSession> {
        let agent = Arc::clone(&self.agent);
        let api = Arc::clone(&self.api);
        let inner = Arc::clone(&self.inner);
        async move {
            let result = async {
                let challenge = api.issue_challenge(&address).await?;
                let signature = agent.sign_message(&challenge.message).await?;
                api.verify(&address, &signature, &challenge.message).await
            }
            .await;

            let mut inner = inner.lock().unwrap();
            inner.auth_flight = None;
            match &result {
                Ok(session) => {
                    inner.phase = ConnectionPhase::Authenticated;
                    inner.session = Some(session.clone());
                }
                Err(err) => {
                    inner.phase = ConnectionPhase::Error;
                    tracing::warn!(%err, "authentication failed");
                }
            }
            result
        }
        .boxed()
        .shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::api::ChallengeResponse;
    use salus_types::Signature;

    fn addr(tag: &str) -> WalletAddress {
        WalletAddress::new(format!("sal_{tag}"))
    }

    /// Scripted wallet agent: pops one result per connect call and counts
    /// how many requests actually reached it.
    struct ScriptedAgent {
        connects: Mutex<VecDeque<Result<WalletAddress, ClientError>>>,
        connect_calls: AtomicUsize,
        sign_calls: AtomicUsize,
        current: Mutex<Option<WalletAddress>>,
        /// Delay before answering, so concurrent callers can pile up.
        delay: Duration,
    }

    impl ScriptedAgent {
        fn new(connects: Vec<Result<WalletAddress, ClientError>>) -> Self {
            Self {
                connects: Mutex::new(connects.into()),
                connect_calls: AtomicUsize::new(0),
                sign_calls: AtomicUsize::new(0),
                current: Mutex::new(None),
                delay: Duration::from_millis(10),
            }
        }
    }

    #[async_trait]
    impl WalletAgent for ScriptedAgent {
        async fn connect(&self) -> Result<WalletAddress, ClientError> {
            self.connect_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            let result = self
                .connects
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ClientError::AgentUnavailable("script exhausted".into())));
            if let Ok(address) = &result {
                *self.current.lock().unwrap() = Some(address.clone());
            }
            result
        }

        async fn current_address(&self) -> Option<WalletAddress> {
            self.current.lock().unwrap().clone()
        }

        async fn sign_message(&self, _message: &str) -> Result<Signature, ClientError> {
            self.sign_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Signature([0u8; 64]))
        }
    }

    /// Backend stub that accepts any signature.
    struct StubApi {
        challenge_calls: AtomicUsize,
        verify_calls: AtomicUsize,
    }

    impl StubApi {
        fn new() -> Self {
            Self {
                challenge_calls: AtomicUsize::new(0),
                verify_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AuthApi for StubApi {
        async fn issue_challenge(
            &self,
            address: &WalletAddress,
        ) -> Result<ChallengeResponse, ClientError> {
            self.challenge_calls.fetch_add(1, Ordering::SeqCst);
            Ok(ChallengeResponse {
                message: format!("Address: {address}\nNonce: deadbeef"),
                nonce: "deadbeef".into(),
            })
        }

        async fn verify(
            &self,
            address: &WalletAddress,
            _signature: &Signature,
            _message: &str,
        ) -> Result<AuthSession, ClientError> {
            self.verify_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok(AuthSession {
                user_id: 7,
                address: address.clone(),
                access_token: "token".into(),
                is_new_user: true,
            })
        }
    }

    fn orchestrator(
        agent: ScriptedAgent,
    ) -> (ConnectionOrchestrator<ScriptedAgent, StubApi>, Arc<ScriptedAgent>, Arc<StubApi>) {
        let agent = Arc::new(agent);
        let api = Arc::new(StubApi::new());
        (
            ConnectionOrchestrator::new(Arc::clone(&agent), Arc::clone(&api)),
            agent,
            api,
        )
    }

    #[tokio::test]
    async fn concurrent_connects_issue_one_agent_request() {
        let (orch, agent, _) = orchestrator(ScriptedAgent::new(vec![Ok(addr("aa"))]));

        let (a, b, c) = tokio::join!(orch.connect(), orch.connect(), orch.connect());
        assert_eq!(a.as_ref().unwrap(), &addr("aa"));
        assert_eq!(b.unwrap(), addr("aa"));
        assert_eq!(c.unwrap(), addr("aa"));
        assert_eq!(agent.connect_calls.load(Ordering::SeqCst), 1);
        assert_eq!(orch.phase(), ConnectionPhase::Connected);
    }

    #[tokio::test]
    async fn connected_machine_short_circuits_without_prompting() {
        let (orch, agent, _) = orchestrator(ScriptedAgent::new(vec![Ok(addr("aa"))]));

        orch.connect().await.unwrap();
        let again = orch.connect().await.unwrap();
        assert_eq!(again, addr("aa"));
        // Second call answered from current_address, not a new prompt.
        assert_eq!(agent.connect_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_connect_clears_flight_and_allows_retry() {
        let (orch, agent, _) = orchestrator(ScriptedAgent::new(vec![
            Err(ClientError::UserRejected),
            Ok(addr("aa")),
        ]));

        let first = orch.connect().await;
        assert_eq!(first, Err(ClientError::UserRejected));
        assert_eq!(orch.phase(), ConnectionPhase::Error);

        // The machine is not stuck: a second call starts a fresh flight.
        let second = orch.connect().await.unwrap();
        assert_eq!(second, addr("aa"));
        assert_eq!(agent.connect_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_authenticates_share_one_flow() {
        let (orch, agent, api) = orchestrator(ScriptedAgent::new(vec![Ok(addr("aa"))]));

        let (a, b, c) = tokio::join!(orch.authenticate(), orch.authenticate(), orch.authenticate());
        for result in [a, b, c] {
            let session = result.unwrap();
            assert_eq!(session.address, addr("aa"));
            assert_eq!(session.access_token, "token");
        }
        assert_eq!(agent.connect_calls.load(Ordering::SeqCst), 1);
        assert_eq!(agent.sign_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.challenge_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.verify_calls.load(Ordering::SeqCst), 1);
        assert_eq!(orch.phase(), ConnectionPhase::Authenticated);
    }

    #[tokio::test]
    async fn authenticated_machine_returns_existing_session() {
        let (orch, _, api) = orchestrator(ScriptedAgent::new(vec![Ok(addr("aa"))]));

        orch.authenticate().await.unwrap();
        orch.authenticate().await.unwrap();
        assert_eq!(api.verify_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn user_rejected_signature_fails_authentication_without_sticking() {
        struct RejectingAgent(ScriptedAgent);

        #[async_trait]
        impl WalletAgent for RejectingAgent {
            async fn connect(&self) -> Result<WalletAddress, ClientError> {
                self.0.connect().await
            }
            async fn current_address(&self) -> Option<WalletAddress> {
                self.0.current_address().await
            }
            async fn sign_message(&self, _message: &str) -> Result<Signature, ClientError> {
                Err(ClientError::UserRejected)
            }
        }

        let agent = Arc::new(RejectingAgent(ScriptedAgent::new(vec![
            Ok(addr("aa")),
            Ok(addr("aa")),
        ])));
        let api = Arc::new(StubApi::new());
        let orch = ConnectionOrchestrator::new(agent, Arc::clone(&api));

        let result = orch.authenticate().await;
        assert_eq!(result, Err(ClientError::UserRejected));
        assert!(!result.unwrap_err().is_retryable());
        assert_eq!(orch.phase(), ConnectionPhase::Error);
        // Marker cleared — the next attempt starts a new flow.
        assert_eq!(api.challenge_calls.load(Ordering::SeqCst), 1);
        orch.authenticate().await.unwrap_err();
        assert_eq!(api.challenge_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn reset_recovers_a_silently_dropped_request() {
        /// Agent whose first request hangs forever (user closed the popup,
        /// no callback), second one succeeds.
        struct HangingAgent {
            calls: AtomicUsize,
        }

        #[async_trait]
        impl WalletAgent for HangingAgent {
            async fn connect(&self) -> Result<WalletAddress, ClientError> {
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    futures_util::future::pending::<()>().await;
                    unreachable!()
                }
                Ok(addr("aa"))
            }
            async fn current_address(&self) -> Option<WalletAddress> {
                None
            }
            async fn sign_message(&self, _message: &str) -> Result<Signature, ClientError> {
                Ok(Signature([0u8; 64]))
            }
        }

        let agent = Arc::new(HangingAgent {
            calls: AtomicUsize::new(0),
        });
        let api = Arc::new(StubApi::new());
        let orch = Arc::new(ConnectionOrchestrator::new(agent, api));

        let stuck = tokio::spawn({
            let orch = Arc::clone(&orch);
            async move { orch.connect().await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(orch.phase(), ConnectionPhase::Connecting);

        orch.reset();
        assert_eq!(orch.phase(), ConnectionPhase::Idle);

        // A fresh attempt succeeds; the stuck one stays parked.
        let address = orch.connect().await.unwrap();
        assert_eq!(address, addr("aa"));
        stuck.abort();
    }

    #[tokio::test]
    async fn reset_clears_session_and_address() {
        let (orch, _, _) = orchestrator(ScriptedAgent::new(vec![Ok(addr("aa"))]));
        orch.authenticate().await.unwrap();
        assert!(orch.session().is_some());

        orch.reset();
        assert!(orch.session().is_none());
        assert!(orch.address().is_none());
        assert_eq!(orch.phase(), ConnectionPhase::Idle);
    }
}
