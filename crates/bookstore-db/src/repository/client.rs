//! # Client Repository
//!
//! Table operations for clients.
//!
//! Name lookup scans the table. Names are only unique because
//! `ClientService` checks before saving; `upsert` itself accepts any record.

use bookstore_core::{Client, ClientId};
use tracing::debug;

use crate::database::{lock, SharedTables};
use crate::error::DbResult;

/// Repository for client records.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.clients();
///
/// let client = repo.get_by_name("alice")?;
/// ```
#[derive(Debug, Clone)]
pub struct ClientRepository {
    tables: SharedTables,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub(crate) fn new(tables: SharedTables) -> Self {
        ClientRepository { tables }
    }

    /// Gets a client by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Client))` - Client found
    /// * `Ok(None)` - Client not found
    pub fn get_by_id(&self, id: ClientId) -> DbResult<Option<Client>> {
        let tables = lock(&self.tables)?;
        let client = tables.clients.get(&id).cloned();

        debug!(client_id = %id, found = client.is_some(), "Client lookup by id");
        Ok(client)
    }

    /// Gets the client registered under exactly `name`.
    pub fn get_by_name(&self, name: &str) -> DbResult<Option<Client>> {
        let tables = lock(&self.tables)?;
        let client = tables.clients.values().find(|c| c.name == name).cloned();

        debug!(name, found = client.is_some(), "Client lookup by name");
        Ok(client)
    }

    /// Inserts or replaces a client.
    pub fn upsert(&self, client: &Client) -> DbResult<()> {
        let mut tables = lock(&self.tables)?;
        let replaced = tables.clients.insert(client.id, client.clone()).is_some();

        debug!(client_id = %client.id, replaced, "Client saved");
        Ok(())
    }

    /// Lists all clients, ordered by name.
    pub fn list(&self) -> DbResult<Vec<Client>> {
        let tables = lock(&self.tables)?;
        let mut clients: Vec<Client> = tables.clients.values().cloned().collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    /// Counts registered clients.
    pub fn count(&self) -> DbResult<usize> {
        Ok(lock(&self.tables)?.clients.len())
    }
}
