//! # Account Client
//!
//! Registration, login and restaurant profile management on top of the
//! `Account` actor.
use crate::account_actor::entity::normalize_email;
use crate::account_actor::AccountError;
use crate::auth::{PasswordHash, DEFAULT_PASSWORD_COST};
use crate::model::{
    Account, AccountCreate, AccountId, AccountUpdate, PartySummary, RegisterAccount,
    RestaurantUpdate, Role,
};
use async_trait::async_trait;
use store_actor::{ActorClient, Filter, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Account actor.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Account>,
    password_cost: u32,
}

impl AccountClient {
    pub fn new(inner: ResourceClient<Account>) -> Self {
        Self {
            inner,
            password_cost: DEFAULT_PASSWORD_COST,
        }
    }

    /// Sets the bcrypt work factor for passwords hashed by this client.
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    async fn hash_password(&self, password: &str) -> Result<PasswordHash, AccountError> {
        let password = password.to_string();
        let cost = self.password_cost;
        tokio::task::spawn_blocking(move || PasswordHash::new(&password, cost))
            .await
            .map_err(|e| AccountError::Credential(e.to_string()))?
            .map_err(|e| AccountError::Credential(e.to_string()))
    }
}

async fn password_matches(hash: PasswordHash, password: &str) -> bool {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash.verify(&password))
        .await
        .unwrap_or(false)
}

#[async_trait]
impl ActorClient<Account> for AccountClient {
    type Error = AccountError;

    fn inner(&self) -> &ResourceClient<Account> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<AccountError>() {
            Ok(err) => err,
            Err(FrameworkError::Conflict(existing)) => AccountError::EmailTaken(existing),
            Err(FrameworkError::NotFound(id)) => AccountError::NotFound(id),
            Err(other) => AccountError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl AccountClient {
    /// Registers a new account. The password is hashed before it reaches the store.
    #[instrument(
        skip(self, request),
        fields(email = %request.email, role = %request.profile.role())
    )]
    pub async fn register(&self, request: RegisterAccount) -> Result<Account, AccountError> {
        if request.password.is_empty() {
            return Err(AccountError::ValidationError("Password is required".into()));
        }
        let password_hash = self.hash_password(&request.password).await?;

        let id = self
            .inner
            .create(AccountCreate {
                name: request.name,
                email: request.email,
                password_hash,
                profile: request.profile,
            })
            .await
            .map_err(Self::map_error)?;
        info!(account_id = %id, "Account registered");
        self.profile(id).await
    }

    /// Finds the account of `role` with this email and checks the password.
    ///
    /// Unknown emails and wrong passwords fail the same way.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Account, AccountError> {
        let email = normalize_email(email);
        let matches = self
            .list(Filter::new(move |a: &Account| a.email == email && a.role == role))
            .await?;
        if let Some(account) = matches.into_iter().next() {
            if password_matches(account.password_hash.clone(), password).await {
                debug!(account_id = %account.id, "Credentials accepted");
                return Ok(account);
            }
        }
        warn!("Credentials rejected");
        Err(AccountError::InvalidCredentials)
    }

    #[instrument(skip(self))]
    pub async fn profile(&self, id: AccountId) -> Result<Account, AccountError> {
        self.get(id)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    /// Open restaurants, oldest registration first.
    #[instrument(skip(self))]
    pub async fn list_active_restaurants(&self) -> Result<Vec<Account>, AccountError> {
        let mut restaurants = self
            .list(Filter::new(Account::is_active_restaurant))
            .await?;
        restaurants.sort_by_key(|a| a.id.0);
        Ok(restaurants)
    }

    /// A restaurant as the public sees it; closed restaurants do not exist here.
    #[instrument(skip(self))]
    pub async fn active_restaurant(&self, id: AccountId) -> Result<Account, AccountError> {
        self.get(id)
            .await?
            .filter(Account::is_active_restaurant)
            .ok_or(AccountError::RestaurantUnavailable(id))
    }

    #[instrument(skip(self))]
    pub async fn update_restaurant(
        &self,
        id: AccountId,
        caller: AccountId,
        update: RestaurantUpdate,
    ) -> Result<Account, AccountError> {
        if caller != id {
            warn!(%caller, restaurant = %id, "Refusing restaurant update by non-owner");
            return Err(AccountError::Forbidden("update this restaurant".into()));
        }
        self.inner
            .update(id, AccountUpdate::Restaurant(update))
            .await
            .map_err(|e| match Self::map_error(e) {
                AccountError::NotFound(_) => AccountError::RestaurantUnavailable(id),
                other => other,
            })
    }

    /// Replaces the password. An unchanged password keeps its stored hash.
    #[instrument(skip(self, new_password))]
    pub async fn change_password(
        &self,
        id: AccountId,
        new_password: &str,
    ) -> Result<Account, AccountError> {
        if new_password.is_empty() {
            return Err(AccountError::ValidationError("Password is required".into()));
        }
        let account = self.profile(id).await?;
        if password_matches(account.password_hash.clone(), new_password).await {
            debug!("Password unchanged, keeping stored hash");
            return Ok(account);
        }
        let hash = self.hash_password(new_password).await?;
        self.inner
            .update(id, AccountUpdate::Password(hash))
            .await
            .map_err(Self::map_error)
    }

    /// Counterpart details for order lists; `None` if the account is gone.
    #[instrument(skip(self))]
    pub async fn summary(&self, id: AccountId) -> Result<Option<PartySummary>, AccountError> {
        Ok(self.get(id).await?.map(|a| a.summary()))
    }
}
