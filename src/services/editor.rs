//! Add/edit screens for entities that support it.

use std::marker::PhantomData;
use std::sync::Arc;

use validator::Validate;

use crate::domain::entity::EditableEntity;
use crate::domain::permission::ScreenAccess;
use crate::domain::types::RowId;
use crate::dto::query::QueryParams;
use crate::repository::errors::GatewayError;
use crate::repository::{Endpoint, QueryGateway};
use crate::services::{ServiceError, ServiceResult};

/// Loads and saves single records of `E`.
///
/// Access is taken from the list screen the editor was opened from.
pub struct EntityEditor<E: EditableEntity> {
    gateway: Arc<dyn QueryGateway>,
    access: ScreenAccess,
    _entity: PhantomData<E>,
}

impl<E: EditableEntity> EntityEditor<E> {
    pub fn new(gateway: Arc<dyn QueryGateway>, access: ScreenAccess) -> Self {
        Self {
            gateway,
            access,
            _entity: PhantomData,
        }
    }

    /// Reads the record shown on the edit form.
    pub async fn load(&self, id: &str) -> ServiceResult<E> {
        let config = &E::CONFIG;
        let id = RowId::new(id)?;
        let endpoint = Endpoint::item(config.resource, E::GET_ENDPOINT, id.as_str());

        let envelope = self.gateway.read(&endpoint, &QueryParams::default()).await?;
        if !envelope.success {
            log::warn!(
                "{} {id} not loaded: {}",
                config.name,
                envelope.failure_message()
            );
            return Err(ServiceError::NotFound);
        }

        let data = envelope.data.ok_or(ServiceError::NotFound)?;
        serde_json::from_value(data).map_err(|e| {
            log::error!("Malformed {} payload for {id}: {e}", config.name);
            GatewayError::from(e).into()
        })
    }

    /// Creates a record when `id` is `None`, otherwise updates it.
    pub async fn save(&self, id: Option<&str>, draft: &E::Draft) -> ServiceResult<()> {
        let config = &E::CONFIG;
        let id = id.map(RowId::new).transpose()?;

        let allowed = match id {
            Some(_) => self.access.is_edit,
            None => self.access.is_create,
        };
        if !allowed {
            return Err(ServiceError::Unauthorized);
        }

        if let Err(e) = draft.validate() {
            log::error!("Failed to validate {} form: {e}", config.name);
            return Err(ServiceError::Form(e.to_string()));
        }

        let body = serde_json::to_value(draft)
            .map_err(|e| ServiceError::Form(format!("{} form: {e}", config.name)))?;

        let envelope = match &id {
            Some(id) => {
                let endpoint = Endpoint::item(config.resource, E::UPDATE_ENDPOINT, id.as_str());
                self.gateway.update(&endpoint, &body).await?
            }
            None => {
                let endpoint = Endpoint::new(config.resource, E::CREATE_ENDPOINT);
                self.gateway.create(&endpoint, &body).await?
            }
        };

        if !envelope.success {
            let message = envelope.failure_message();
            log::error!("Backend refused to save {}: {message}", config.name);
            return Err(ServiceError::Rejected(message));
        }

        match id {
            Some(id) => log::info!("Updated {} {id}", config.name),
            None => log::info!("Created {}", config.name),
        }
        Ok(())
    }
}
