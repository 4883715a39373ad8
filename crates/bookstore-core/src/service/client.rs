//! # Client Service
//!
//! Registration and renaming of clients.
//!
//! ## Check Order
//! ```text
//! create(name)                    rename(id, new_name)
//!   │                               │
//!   ├── name empty? → Validation    ├── name empty? → Validation
//!   │                               ├── id unknown? → NotFound
//!   ├── name taken? → Conflict      ├── name taken? → Conflict
//!   │                               │
//!   ▼                               ▼
//! save_client(new)                save_client(renamed)
//! ```
//!
//! The uniqueness check is a plain by-name lookup. Renaming a client to the
//! name it already has finds the client itself and is rejected as a conflict.

use tracing::{debug, info};

use crate::error::{ConflictError, CoreError, CoreResult};
use crate::store::Store;
use crate::types::{Client, ClientId};
use crate::validation::validate_client_name;

/// Creates and renames clients.
///
/// ## Usage
/// ```rust,ignore
/// let service = ClientService::new(&db);
///
/// let client = service.create("alice")?;
/// service.rename(client.id, "alice-b")?;
/// ```
#[derive(Debug, Clone)]
pub struct ClientService<S> {
    store: S,
}

impl<S: Store> ClientService<S> {
    /// Creates a new ClientService over the given store.
    pub fn new(store: S) -> Self {
        ClientService { store }
    }

    /// Registers a new client.
    ///
    /// ## Returns
    /// * `Ok(Client)` - the saved client, with a fresh id and no books
    /// * `Err(Validation)` - `name` is empty
    /// * `Err(Conflict)` - another client already uses `name`
    pub fn create(&self, name: &str) -> CoreResult<Client> {
        validate_client_name(name)?;

        self.ensure_name_available(name)?;

        let client = Client::new(name);
        self.store.save_client(&client)?;

        info!(client_id = %client.id, name = %client.name, "Client created");
        Ok(client)
    }

    /// Changes a client's name.
    ///
    /// ## Returns
    /// * `Ok(())` - the renamed client was saved
    /// * `Err(Validation)` - `new_name` is empty
    /// * `Err(NotFound)` - no client has `client_id`
    /// * `Err(Conflict)` - some client, possibly this one, already uses `new_name`
    pub fn rename(&self, client_id: ClientId, new_name: &str) -> CoreResult<()> {
        validate_client_name(new_name)?;

        let mut client = self
            .store
            .find_client_by_id(client_id)?
            .ok_or_else(|| CoreError::client_not_found(client_id))?;

        self.ensure_name_available(new_name)?;

        let old_name = std::mem::replace(&mut client.name, new_name.to_string());
        self.store.save_client(&client)?;

        info!(%client_id, %old_name, new_name = %client.name, "Client renamed");
        Ok(())
    }

    /// Returns a conflict if any client is registered under `name`.
    fn ensure_name_available(&self, name: &str) -> CoreResult<()> {
        if let Some(existing) = self.store.find_client_by_name(name)? {
            debug!(name, existing_id = %existing.id, "Client name already taken");
            return Err(ConflictError::DuplicateName {
                name: name.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
