//! Application service — namespace-scoped workspace listings.
//!
//! The directory is a plain value owned by one session and passed by `&mut`
//! to whoever needs it. Entries live as long as the directory: there is no
//! expiry and no invalidation.

use std::collections::HashMap;

use anyhow::Result;
use cradle_common::Workspace;
use tracing::{debug, warn};

use crate::application::ports::WorkspaceApi;
use crate::domain::{DirectoryError, in_namespace};

/// Read-through cache of workspace listings.
#[derive(Debug, Default)]
pub struct WorkspaceDirectory {
    by_namespace: HashMap<String, Vec<Workspace>>,
    owned: Vec<Workspace>,
    known: HashMap<String, Workspace>,
}

impl WorkspaceDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached workspaces of `namespace`, without any remote call.
    #[must_use]
    pub fn cached(&self, namespace: &str) -> Option<&[Workspace]> {
        self.by_namespace.get(namespace).map(Vec::as_slice)
    }

    /// Workspaces of `namespace`: the cached list when it is non-empty,
    /// otherwise a fresh namespace-scoped listing, which is cached even when
    /// empty.
    ///
    /// The fetched listing is filtered on `namespace` before it is cached, so
    /// an entry never holds workspaces of another namespace.
    ///
    /// # Errors
    ///
    /// Returns the listing error; the cache is left untouched.
    pub async fn get_or_fetch_by_namespace(
        &mut self,
        api: &impl WorkspaceApi,
        namespace: &str,
    ) -> Result<Vec<Workspace>> {
        if let Some(cached) = self.by_namespace.get(namespace).filter(|l| !l.is_empty()) {
            debug!(namespace, count = cached.len(), "namespace cache hit");
            return Ok(cached.clone());
        }
        debug!(namespace, "namespace cache miss");
        let fetched = in_namespace(api.list_by_namespace(namespace).await?, namespace);
        self.by_namespace
            .insert(namespace.to_string(), fetched.clone());
        Ok(fetched)
    }

    /// Workspaces owned by the current user: cached when non-empty, otherwise
    /// fetched and cached.
    ///
    /// # Errors
    ///
    /// Returns the listing error; the cache is left untouched.
    pub async fn get_or_fetch_owned(&mut self, api: &impl WorkspaceApi) -> Result<Vec<Workspace>> {
        if !self.owned.is_empty() {
            debug!(count = self.owned.len(), "owned cache hit");
            return Ok(self.owned.clone());
        }
        self.owned = api.list_owned().await?;
        Ok(self.owned.clone())
    }

    /// Resolve the workspaces of `namespace`, falling back to the owned
    /// listing when the namespace listing fails for any reason.
    ///
    /// The result is always filtered on `namespace` and stored under it, even
    /// when empty.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Unavailable`] if both listings fail. Nothing
    /// is cached in that case.
    pub async fn list_by_namespace(
        &mut self,
        api: &impl WorkspaceApi,
        namespace: &str,
    ) -> Result<Vec<Workspace>> {
        let workspaces = match self.get_or_fetch_by_namespace(api, namespace).await {
            Ok(list) => list,
            Err(scoped) => {
                warn!(namespace, error = %scoped, "namespace listing failed, using owned workspaces");
                self.get_or_fetch_owned(api)
                    .await
                    .map_err(|owned| DirectoryError::Unavailable {
                        namespace: namespace.to_string(),
                        scoped: format!("{scoped:#}"),
                        owned: format!("{owned:#}"),
                    })?
            }
        };
        let filtered = in_namespace(workspaces, namespace);
        self.by_namespace
            .insert(namespace.to_string(), filtered.clone());
        Ok(filtered)
    }

    /// Record a workspace this session created, replacing any previous
    /// entry with the same id.
    pub fn remember(&mut self, workspace: Workspace) {
        self.known.insert(workspace.id.clone(), workspace);
    }

    /// A workspace previously passed to [`Self::remember`].
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&Workspace> {
        self.known.get(id)
    }
}
