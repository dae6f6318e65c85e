// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Test doubles shared by the unit tests.
//!
//! - [`MockBackend`]: in-process axum router speaking the backend contract
//!   over a real socket
//! - [`FakeApi`]: scripted, recording [`CertificateApi`]
//! - [`FakeInjected`]: scriptable injected provider
//! - [`StaticWallet`]: fixed-state [`ConnectionProvider`]

use std::{
    collections::{HashMap, VecDeque},
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, RwLock,
    },
};

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, task::JoinHandle};
use url::Url;

use crate::{
    api::{
        client::REQUEST_ID_HEADER, CertificateApi, CERTIFICATE_ISSUE_PATH,
        CERTIFICATE_REVOKE_PATH, CERTIFICATE_VERIFY_PATH, INSTITUTION_REGISTER_PATH,
        INSTITUTION_VERIFY_PATH, PLATFORM_INITIALIZE_PATH,
    },
    error::ClientError,
    models::{
        Certificate, CertificateData, Institution, IssueCertificateRequest, Platform,
        RegisterInstitutionRequest, RevokeCertificateRequest, TxReceipt, VerifyCertificateRequest,
        VerifyCertificateResponse, VerifyInstitutionRequest,
    },
    wallet::{
        injected::{
            AccountsHandler, ListenerId, ListenerRegistry, ETH_ACCOUNTS, ETH_REQUEST_ACCOUNTS,
        },
        ConnectionProvider, InjectedProvider, ProviderError, ProviderEvent, WalletError,
        WalletKind,
    },
};

pub const ISSUED_AT: i64 = 1_700_000_000;

/// Issue request with plausible defaults for the given pair.
pub fn issue_request(institution: &str, student: &str) -> IssueCertificateRequest {
    IssueCertificateRequest {
        institution_pubkey: institution.to_string(),
        student_pubkey: student.to_string(),
        student_name: "Ada Lovelace".to_string(),
        course_name: "Systems Programming".to_string(),
        course_duration: 12,
        skills_acquired: vec!["Rust".to_string()],
        grade: "A".to_string(),
        metadata_uri: String::new(),
    }
}

pub fn sample_certificate(
    institution: &str,
    student: &str,
    index: u64,
    is_revoked: bool,
) -> CertificateData {
    CertificateData {
        pda: format!("CERT-{institution}-{student}-{index}"),
        student_wallet: student.to_string(),
        institution: institution.to_string(),
        student_name: "Ada Lovelace".to_string(),
        course_name: "Systems Programming".to_string(),
        course_duration: 12,
        skills_acquired: vec!["Rust".to_string(), "Go".to_string()],
        grade: "A".to_string(),
        issued_at: ISSUED_AT,
        certificate_hash: None,
        is_revoked,
        index,
    }
}

// =============================================================================
// MockBackend
// =============================================================================

#[derive(Default)]
struct BackendState {
    hits: Vec<String>,
    request_ids: Vec<String>,
    platform_initialized: bool,
    institutions: Vec<String>,
    certificates: Vec<CertificateData>,
    tx_counter: u64,
}

impl BackendState {
    fn record(&mut self, path: &str, headers: &HeaderMap) {
        self.hits.push(path.to_string());
        if let Some(id) = headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()) {
            self.request_ids.push(id.to_string());
        }
    }

    fn next_tx(&mut self) -> String {
        self.tx_counter += 1;
        format!("TX-{}", self.tx_counter)
    }
}

type Shared = Arc<Mutex<BackendState>>;
type Reply = (StatusCode, Json<Value>);

fn failure(status: StatusCode, error: &str) -> Reply {
    (status, Json(json!({ "ok": false, "error": error })))
}

async fn initialize(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let mut state = state.lock().unwrap();
    state.record(PLATFORM_INITIALIZE_PATH, &headers);
    if state.platform_initialized {
        return failure(StatusCode::CONFLICT, "platform already initialized");
    }
    state.platform_initialized = true;
    let tx = state.next_tx();
    (
        StatusCode::OK,
        Json(json!({ "ok": true, "platformPda": "PLATFORM-PDA", "tx": tx })),
    )
}

async fn register_institution(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<RegisterInstitutionRequest>,
) -> Reply {
    let mut state = state.lock().unwrap();
    state.record(INSTITUTION_REGISTER_PATH, &headers);
    let address = format!("INST-{}", state.institutions.len() + 1);
    state.institutions.push(address.clone());
    let tx = state.next_tx();
    tracing::debug!(name = %body.name, %address, "mock institution registered");
    (
        StatusCode::OK,
        Json(json!({ "ok": true, "institution": address, "tx": tx })),
    )
}

async fn verify_institution(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<VerifyInstitutionRequest>,
) -> Reply {
    let mut state = state.lock().unwrap();
    state.record(INSTITUTION_VERIFY_PATH, &headers);
    if !state.institutions.contains(&body.institution_pubkey) {
        return failure(StatusCode::NOT_FOUND, "institution not found");
    }
    let tx = state.next_tx();
    (StatusCode::OK, Json(json!({ "ok": true, "tx": tx })))
}

async fn issue_certificate(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<IssueCertificateRequest>,
) -> Reply {
    let mut state = state.lock().unwrap();
    state.record(CERTIFICATE_ISSUE_PATH, &headers);
    let index = state
        .certificates
        .iter()
        .filter(|c| {
            c.institution == body.institution_pubkey && c.student_wallet == body.student_pubkey
        })
        .count() as u64;
    let pda = format!(
        "CERT-{}-{}-{}",
        body.institution_pubkey, body.student_pubkey, index
    );
    state.certificates.push(CertificateData {
        pda: pda.clone(),
        student_wallet: body.student_pubkey,
        institution: body.institution_pubkey,
        student_name: body.student_name,
        course_name: body.course_name,
        course_duration: body.course_duration,
        skills_acquired: body.skills_acquired,
        grade: body.grade,
        issued_at: ISSUED_AT,
        certificate_hash: None,
        is_revoked: false,
        index,
    });
    let tx = state.next_tx();
    (
        StatusCode::OK,
        Json(json!({ "ok": true, "certificate": pda, "tx": tx })),
    )
}

fn find_certificate<'a>(
    certificates: &'a mut [CertificateData],
    institution: &str,
    student: &str,
    index: Option<u64>,
) -> Option<&'a mut CertificateData> {
    certificates
        .iter_mut()
        .filter(|c| c.institution == institution && c.student_wallet == student)
        .filter(|c| index.is_none_or(|i| c.index == i))
        .max_by_key(|c| c.index)
}

async fn verify_certificate(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<VerifyCertificateRequest>,
) -> Reply {
    let mut state = state.lock().unwrap();
    state.record(CERTIFICATE_VERIFY_PATH, &headers);
    match find_certificate(
        &mut state.certificates,
        &body.institution_pubkey,
        &body.student_pubkey,
        body.index,
    ) {
        Some(certificate) => (
            StatusCode::OK,
            Json(json!({ "ok": true, "certificate": certificate })),
        ),
        None => failure(StatusCode::OK, "not found"),
    }
}

async fn revoke_certificate(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<RevokeCertificateRequest>,
) -> Reply {
    let mut state = state.lock().unwrap();
    state.record(CERTIFICATE_REVOKE_PATH, &headers);
    let Some(certificate) = find_certificate(
        &mut state.certificates,
        &body.institution_pubkey,
        &body.student_pubkey,
        Some(body.index),
    ) else {
        return failure(StatusCode::NOT_FOUND, "certificate not found");
    };
    if certificate.is_revoked {
        return failure(StatusCode::BAD_REQUEST, "certificate already revoked");
    }
    certificate.is_revoked = true;
    let tx = state.next_tx();
    (StatusCode::OK, Json(json!({ "ok": true, "tx": tx })))
}

/// Backend stand-in served on `127.0.0.1:0` under `/api`.
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
    server: JoinHandle<()>,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState::default()));
        let api = Router::new()
            .route(PLATFORM_INITIALIZE_PATH, post(initialize))
            .route(INSTITUTION_REGISTER_PATH, post(register_institution))
            .route(INSTITUTION_VERIFY_PATH, post(verify_institution))
            .route(CERTIFICATE_ISSUE_PATH, post(issue_certificate))
            .route(CERTIFICATE_VERIFY_PATH, post(verify_certificate))
            .route(CERTIFICATE_REVOKE_PATH, post(revoke_certificate));
        let app = Router::new()
            .nest("/api", api)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            server,
        }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/api", self.addr)).unwrap()
    }

    /// Requests received on `path` (relative to `/api`).
    pub fn hits(&self, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .hits
            .iter()
            .filter(|hit| hit.as_str() == path)
            .count()
    }

    pub fn request_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().request_ids.clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

// =============================================================================
// FakeApi
// =============================================================================

/// Recording [`CertificateApi`]. Unscripted calls get a canned success.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<(String, Value)>>,
    scripted: Mutex<HashMap<String, VecDeque<Result<Value, String>>>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response body for the next call on `path`.
    pub fn respond(&self, path: &str, body: Value) {
        self.queue(path, Ok(body));
    }

    /// Queue a transport failure for the next call on `path`.
    pub fn fail(&self, path: &str, message: &str) {
        self.queue(path, Err(message.to_string()));
    }

    fn queue(&self, path: &str, answer: Result<Value, String>) {
        self.scripted
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(answer);
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.calls.lock().unwrap().last().map(|(_, body)| body.clone())
    }

    fn answer<B, R>(&self, path: &str, body: Option<&B>) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = body
            .map(|b| serde_json::to_value(b).unwrap())
            .unwrap_or(Value::Null);
        self.calls.lock().unwrap().push((path.to_string(), body));

        let next = self
            .scripted
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(VecDeque::pop_front);
        let value = match next {
            Some(Ok(value)) => value,
            Some(Err(message)) => return Err(ClientError::Transport(message)),
            None => canned(path),
        };
        Ok(serde_json::from_value(value).unwrap())
    }
}

fn canned(path: &str) -> Value {
    match path {
        PLATFORM_INITIALIZE_PATH => {
            json!({ "ok": true, "platformPda": "PLATFORM-PDA", "tx": "TX-1" })
        }
        INSTITUTION_REGISTER_PATH => json!({ "ok": true, "institution": "INST-1", "tx": "TX-1" }),
        CERTIFICATE_ISSUE_PATH => {
            json!({ "ok": true, "certificate": "CERT-INST1-STU1-0", "tx": "TX-1" })
        }
        CERTIFICATE_VERIFY_PATH => {
            json!({ "ok": true, "certificate": sample_certificate("INST1", "STU1", 0, false) })
        }
        _ => json!({ "ok": true, "tx": "TX-1" }),
    }
}

#[async_trait]
impl CertificateApi for FakeApi {
    async fn initialize_platform(&self) -> Result<Platform, ClientError> {
        self.answer::<(), _>(PLATFORM_INITIALIZE_PATH, None)
    }

    async fn register_institution(
        &self,
        request: &RegisterInstitutionRequest,
    ) -> Result<Institution, ClientError> {
        self.answer(INSTITUTION_REGISTER_PATH, Some(request))
    }

    async fn verify_institution(
        &self,
        request: &VerifyInstitutionRequest,
    ) -> Result<TxReceipt, ClientError> {
        self.answer(INSTITUTION_VERIFY_PATH, Some(request))
    }

    async fn issue_certificate(
        &self,
        request: &IssueCertificateRequest,
    ) -> Result<Certificate, ClientError> {
        self.answer(CERTIFICATE_ISSUE_PATH, Some(request))
    }

    async fn verify_certificate(
        &self,
        request: &VerifyCertificateRequest,
    ) -> Result<VerifyCertificateResponse, ClientError> {
        self.answer(CERTIFICATE_VERIFY_PATH, Some(request))
    }

    async fn revoke_certificate(
        &self,
        request: &RevokeCertificateRequest,
    ) -> Result<TxReceipt, ClientError> {
        self.answer(CERTIFICATE_REVOKE_PATH, Some(request))
    }
}

// =============================================================================
// FakeInjected
// =============================================================================

fn owned(accounts: &[&str]) -> Vec<String> {
    accounts.iter().map(|a| a.to_string()).collect()
}

/// Scriptable EIP-1193 provider.
pub struct FakeInjected {
    is_metamask: bool,
    authorized: Vec<String>,
    accounts_fail: bool,
    emit_during_query: Option<Vec<String>>,
    grant: Result<Vec<String>, ProviderError>,
    calls: Mutex<Vec<String>>,
    listeners: ListenerRegistry,
}

impl FakeInjected {
    pub fn new() -> Self {
        Self {
            is_metamask: true,
            authorized: Vec::new(),
            accounts_fail: false,
            emit_during_query: None,
            grant: Ok(Vec::new()),
            calls: Mutex::new(Vec::new()),
            listeners: ListenerRegistry::default(),
        }
    }

    pub fn not_metamask(mut self) -> Self {
        self.is_metamask = false;
        self
    }

    /// Accounts returned by the silent `eth_accounts` query.
    pub fn with_authorized(mut self, accounts: &[&str]) -> Self {
        self.authorized = owned(accounts);
        self
    }

    pub fn failing_accounts(mut self) -> Self {
        self.accounts_fail = true;
        self
    }

    /// Fire `accountsChanged` while `eth_accounts` is being answered.
    pub fn emit_during_accounts_query(mut self, accounts: &[&str]) -> Self {
        self.emit_during_query = Some(owned(accounts));
        self
    }

    /// Accounts granted by `eth_requestAccounts`.
    pub fn granting(mut self, accounts: &[&str]) -> Self {
        self.grant = Ok(owned(accounts));
        self
    }

    pub fn rejecting(mut self, error: ProviderError) -> Self {
        self.grant = Err(error);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn emit_accounts(&self, accounts: &[&str]) {
        self.listeners.emit(&owned(accounts));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[async_trait]
impl InjectedProvider for FakeInjected {
    fn is_metamask(&self) -> bool {
        self.is_metamask
    }

    async fn request(&self, method: &str, _params: Option<Value>) -> Result<Value, ProviderError> {
        self.calls.lock().unwrap().push(method.to_string());
        match method {
            ETH_ACCOUNTS => {
                if let Some(accounts) = &self.emit_during_query {
                    self.listeners.emit(accounts);
                }
                if self.accounts_fail {
                    return Err(ProviderError::new(Some(-32603), "internal error"));
                }
                Ok(json!(self.authorized))
            }
            ETH_REQUEST_ACCOUNTS => self.grant.clone().map(|accounts| json!(accounts)),
            other => Err(ProviderError::new(
                Some(4200),
                format!("unsupported method {other}"),
            )),
        }
    }

    fn on(&self, _event: ProviderEvent, handler: AccountsHandler) -> ListenerId {
        self.listeners.add(handler)
    }

    fn remove_listener(&self, _event: ProviderEvent, id: ListenerId) {
        self.listeners.remove(id);
    }
}

// =============================================================================
// StaticWallet
// =============================================================================

/// Wallet with a fixed availability; `connect` hands out a fixed account.
pub struct StaticWallet {
    kind: WalletKind,
    available: bool,
    account: RwLock<Option<String>>,
    connect_calls: Arc<AtomicUsize>,
}

impl StaticWallet {
    fn build(kind: WalletKind, available: bool, account: Option<&str>) -> Self {
        Self {
            kind,
            available,
            account: RwLock::new(account.map(str::to_string)),
            connect_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn available(kind: WalletKind) -> Self {
        Self::build(kind, true, None)
    }

    pub fn connected(kind: WalletKind, account: &str) -> Self {
        Self::build(kind, true, Some(account))
    }

    pub fn missing(kind: WalletKind) -> Self {
        Self::build(kind, false, None)
    }

    pub fn connect_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.connect_calls)
    }
}

#[async_trait]
impl ConnectionProvider for StaticWallet {
    fn kind(&self) -> WalletKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn current_account(&self) -> Option<String> {
        self.account.read().unwrap().clone()
    }

    async fn connect(&self) -> Result<Option<String>, WalletError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        let mut account = self.account.write().unwrap();
        if account.is_none() {
            *account = Some(format!("{}-account", self.kind));
        }
        Ok(account.clone())
    }

    fn disconnect(&self) {
        *self.account.write().unwrap() = None;
    }

    fn install_hint(&self) -> &'static str {
        "install the test wallet"
    }
}
