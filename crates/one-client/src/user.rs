// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! User resources.

use crate::client::Client;
use crate::document::Document;
use crate::pool::{ElementPool, PoolElement, ResourceKind};
use crate::response::Response;

/// Descriptor shared by user handles and pools. Users carry no numeric
/// state or type codes; their enabled flag is a document field.
pub static USER: ResourceKind = ResourceKind {
    name: "user",
    root: "USER",
    states: &[],
    types: &[],
};

/// Allocate a new user. On success the message carries the assigned id.
/// `auth_driver` may be empty to take the server default.
pub fn allocate(client: &Client, username: &str, password: &str, auth_driver: &str) -> Response {
    client.call(
        &USER.action("allocate"),
        vec![username.into(), password.into(), auth_driver.into()],
    )
}

/// Fetch the user document.
pub fn info(client: &Client, id: i64) -> Response {
    client.call(&USER.action("info"), vec![id.into()])
}

/// Delete the user.
pub fn delete(client: &Client, id: i64) -> Response {
    client.call(&USER.action("delete"), vec![id.into()])
}

/// Change the user's password.
pub fn passwd(client: &Client, id: i64, password: &str) -> Response {
    client.call(&USER.action("passwd"), vec![id.into(), password.into()])
}

/// Change the user's main group.
pub fn chgrp(client: &Client, id: i64, gid: i64) -> Response {
    client.call(&USER.action("chgrp"), vec![id.into(), gid.into()])
}

/// Change the user's auth driver.
pub fn chauth(client: &Client, id: i64, auth_driver: &str) -> Response {
    client.call(&USER.action("chauth"), vec![id.into(), auth_driver.into()])
}

/// Replace the user template contents.
pub fn update(client: &Client, id: i64, template: &str) -> Response {
    client.call(&USER.action("update"), vec![id.into(), template.into()])
}

/// Handle for one user.
#[derive(Debug)]
pub struct User<'c> {
    client: &'c Client,
    element: PoolElement,
}

impl<'c> User<'c> {
    /// Handle from a bare id; call [`User::info`] before reading fields.
    pub fn new(client: &'c Client, id: i64) -> Self {
        Self {
            client,
            element: PoolElement::new(&USER, id),
        }
    }

    /// Handle from an already-parsed document fragment.
    pub fn from_document(client: &'c Client, document: Document) -> Self {
        Self {
            client,
            element: PoolElement::from_document(&USER, document),
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

    /// Fetch and cache the user document.
    pub fn info(&mut self) -> Response {
        let response = info(self.client, self.element.id());
        self.element.process_info(&response);
        response
    }

    pub fn delete(&self) -> Response {
        delete(self.client, self.element.id())
    }

    pub fn passwd(&self, password: &str) -> Response {
        passwd(self.client, self.element.id(), password)
    }

    pub fn chgrp(&self, gid: i64) -> Response {
        chgrp(self.client, self.element.id(), gid)
    }

    pub fn chauth(&self, auth_driver: &str) -> Response {
        chauth(self.client, self.element.id(), auth_driver)
    }

    pub fn update(&self, template: &str) -> Response {
        update(self.client, self.element.id(), template)
    }

    /// Text content at `path` in the cached document.
    pub fn xpath(&self, path: &str) -> Option<&str> {
        self.element.xpath(path)
    }

    /// Whether the user is enabled.
    pub fn is_enabled(&self) -> bool {
        self.element.flag_field("ENABLED")
    }
}

/// Handle for the user pool listing. The listing is not filtered by
/// ownership; only administrators see other accounts.
#[derive(Debug)]
pub struct UserPool<'c> {
    client: &'c Client,
    pool: ElementPool,
}

impl<'c> UserPool<'c> {
    pub fn new(client: &'c Client) -> Self {
        Self {
            client,
            pool: ElementPool::new(&USER),
        }
    }

    /// Fetch and cache the pool listing.
    pub fn info(&mut self) -> Response {
        let response = self.client.call(&self.pool.action("info"), Vec::new());
        self.pool.process_info(&response);
        response
    }

    /// Per-user handles over the cached listing.
    pub fn users(&self) -> Vec<User<'c>> {
        self.pool
            .elements()
            .into_iter()
            .map(|element| User::from_element(self.client, element))
            .collect()
    }
}
