// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Cluster resources.

use crate::client::Client;
use crate::document::Document;
use crate::pool::{ElementPool, PoolElement, ResourceKind};
use crate::response::Response;

/// Descriptor shared by cluster handles and pools.
pub static CLUSTER: ResourceKind = ResourceKind {
    name: "cluster",
    root: "CLUSTER",
    states: &[],
    types: &[],
};

/// Allocate a new cluster. On success the message carries the assigned id.
pub fn allocate(client: &Client, name: &str) -> Response {
    client.call(&CLUSTER.action("allocate"), vec![name.into()])
}

/// Fetch the cluster document.
pub fn info(client: &Client, id: i64) -> Response {
    client.call(&CLUSTER.action("info"), vec![id.into()])
}

/// Delete the cluster.
pub fn delete(client: &Client, id: i64) -> Response {
    client.call(&CLUSTER.action("delete"), vec![id.into()])
}

/// Move a host into the cluster.
pub fn add_host(client: &Client, host_id: i64, cluster_id: i64) -> Response {
    client.call(&CLUSTER.action("add"), vec![host_id.into(), cluster_id.into()])
}

/// Move a host back to the default cluster.
pub fn remove_host(client: &Client, host_id: i64) -> Response {
    client.call(&CLUSTER.action("remove"), vec![host_id.into()])
}

/// Handle for one cluster.
#[derive(Debug)]
pub struct Cluster<'c> {
    client: &'c Client,
    element: PoolElement,
}

impl<'c> Cluster<'c> {
    /// Handle from a bare id; call [`Cluster::info`] before reading fields.
    pub fn new(client: &'c Client, id: i64) -> Self {
        Self {
            client,
            element: PoolElement::new(&CLUSTER, id),
        }
    }

    /// Handle from an already-parsed document fragment.
    pub fn from_document(client: &'c Client, document: Document) -> Self {
        Self {
            client,
            element: PoolElement::from_document(&CLUSTER, document),
        }
    }

    pub(crate) fn from_element(client: &'c Client, element: PoolElement) -> Self {
        Self { client, element }
    }

    pub fn id(&self) -> i64 {
        self.element.id()
    }

    pub fn element(&self) -> &PoolElement {
        &self.element
    }

    /// Fetch and cache the cluster document.
    pub fn info(&mut self) -> Response {
        let response = info(self.client, self.element.id());
        self.element.process_info(&response);
        response
    }

    pub fn delete(&self) -> Response {
        delete(self.client, self.element.id())
    }

    pub fn add_host(&self, host_id: i64) -> Response {
        add_host(self.client, host_id, self.element.id())
    }

    pub fn remove_host(&self, host_id: i64) -> Response {
        remove_host(self.client, host_id)
    }

    /// Text content at `path` in the cached document.
    pub fn xpath(&self, path: &str) -> Option<&str> {
        self.element.xpath(path)
    }

    /// The cluster name from the cached document.
    pub fn name(&self) -> Option<&str> {
        self.element.xpath("NAME")
    }
}

/// Handle for the cluster pool listing.
#[derive(Debug)]
pub struct ClusterPool<'c> {
    client: &'c Client,
    pool: ElementPool,
}

impl<'c> ClusterPool<'c> {
    pub fn new(client: &'c Client) -> Self {
        Self {
            client,
            pool: ElementPool::new(&CLUSTER),
        }
    }

    /// Fetch and cache the pool listing.
    pub fn info(&mut self) -> Response {
        let response = self.client.call(&self.pool.action("info"), Vec::new());
        self.pool.process_info(&response);
        response
    }

    /// Per-cluster handles over the cached listing.
    pub fn clusters(&self) -> Vec<Cluster<'c>> {
        self.pool
            .elements()
            .into_iter()
            .map(|element| Cluster::from_element(self.client, element))
            .collect()
    }
}
