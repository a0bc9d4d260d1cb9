//! gRPC service implementation for account registration and login.
//!
//! [`AccountService`] implements the generated [`UserService`] trait. The store
//! is injected at construction; the service holds no other state, so clones
//! are cheap and calls run concurrently.
//!
//! ## Register
//!
//! Validate -> probe uniqueness -> insert -> respond, stopping at the first
//! failure. The probe only exists to return a friendly conflict early; the
//! store's unique indexes decide the outcome when two registrations race.
//!
//! ## Login
//!
//! A single lookup by normalized email. Misses always report
//! [`INVALID_CREDENTIALS`] so callers cannot enumerate accounts.

use crate::server::{
    store::{Account, AccountStore, IdentityQuery, StoreError},
    telemetry::{
        increment_accounts_registered, increment_errors, increment_requests,
        record_request_duration,
    },
};
use std::{sync::Arc, time::Instant};
use tonic::{Request, Response, Status};
use userservice_core::{
    Error, Registration, Result,
    error::{ACCOUNT_EXISTS, DUPLICATE_ACCOUNT, INVALID_CREDENTIALS},
    proto::{
        LoginMessageRequest, LoginMessageResponse, RegisterMessageRequest,
        RegisterMessageResponse, user_service_server::UserService,
    },
    validation::normalize_email,
};

const REGISTERED: &str = "Registered successfully";

/// `user.UserService` implementation over an injected [`AccountStore`].
///
/// The store is shared by every in-flight call through an [`Arc`]; the
/// service keeps no other state. Clones share the same store.
pub struct AccountService<S> {
    store: Arc<S>,
}

impl<S> Clone for AccountService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: AccountStore> AccountService<S> {
    /// Creates a service backed by `store`. The store must already be
    /// connected and have its unique indexes in place.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Runs the registration workflow.
    pub async fn register(&self, req: &RegisterMessageRequest) -> Result<RegisterMessageResponse> {
        let registration = Registration::try_from(req)?;

        match self
            .store
            .find_by_identity(&IdentityQuery::any_of(&registration))
            .await
        {
            Ok(None) => {}
            Ok(Some(_)) => return Err(Error::conflict(ACCOUNT_EXISTS)),
            Err(err) => return Err(internal(err, "internal server error")),
        }

        let account = Account::new(registration, req.password.clone());

        match self.store.insert(&account).await {
            Ok(()) => {}
            Err(StoreError::DuplicateKey { index }) => {
                tracing::warn!(index = ?index, "Unique index rejected a registration");
                return Err(Error::conflict(DUPLICATE_ACCOUNT));
            }
            Err(err) => return Err(internal(err, "failed to create user")),
        }

        increment_accounts_registered();
        tracing::info!(user_name = %account.user_name, "Account registered");

        Ok(RegisterMessageResponse {
            user_name: account.user_name,
            message: REGISTERED.to_owned(),
            success: true,
        })
    }

    /// Looks up the account owning `req.email`.
    pub async fn login(&self, req: &LoginMessageRequest) -> Result<LoginMessageResponse> {
        let query = IdentityQuery::by_email(normalize_email(&req.email));

        match self.store.find_by_identity(&query).await {
            Ok(Some(account)) => Ok(LoginMessageResponse {
                email: account.email,
                user_name: account.user_name,
                password: account.password_hash,
            }),
            Ok(None) => Err(Error::not_found(INVALID_CREDENTIALS)),
            Err(err) => Err(internal(err, "login failed")),
        }
    }
}

#[tonic::async_trait]
impl<S: AccountStore + 'static> UserService for AccountService<S> {
    #[tracing::instrument(skip_all, fields(method = "LoginUser"))]
    async fn login_user(
        &self,
        req: Request<LoginMessageRequest>,
    ) -> core::result::Result<Response<LoginMessageResponse>, Status> {
        let start = Instant::now();
        let result = self.login(req.get_ref()).await;
        respond("LoginUser", start, result)
    }

    #[tracing::instrument(skip_all, fields(method = "RegisterUser", user_name = %req.get_ref().user_name))]
    async fn register_user(
        &self,
        req: Request<RegisterMessageRequest>,
    ) -> core::result::Result<Response<RegisterMessageResponse>, Status> {
        let start = Instant::now();
        let result = self.register(req.get_ref()).await;
        respond("RegisterUser", start, result)
    }
}

/// Logs a store failure with its cause and returns the sanitized error sent
/// to the caller.
fn internal(cause: StoreError, context: &'static str) -> Error {
    let err = Error::internal(context);
    tracing::error!(
        error = %cause,
        retryable = err.is_retryable(),
        "{context}"
    );
    err
}

/// Records metrics for a finished call and converts it for the transport.
fn respond<T>(
    method: &'static str,
    start: Instant,
    result: Result<T>,
) -> core::result::Result<Response<T>, Status> {
    increment_requests(method);
    record_request_duration(method, start.elapsed().as_secs_f64() * 1000.0);

    result.map(Response::new).map_err(|err| {
        let status = Status::from(err);
        increment_errors(method, status.code());
        status
    })
}
