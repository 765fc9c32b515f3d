// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Image resources.
//!
//! Each action exists once, as a free function taking the client; the
//! [`Image`] handle adds thin forwarding methods plus accessors over the
//! cached document.

use crate::client::Client;
use crate::document::Document;
use crate::error::Result;
use crate::pool::{ElementPool, Label, PoolElement, PoolFilter, ResourceKind};
use crate::response::Response;

/// Descriptor shared by image handles and pools.
pub static IMAGE: ResourceKind = ResourceKind {
    name: "image",
    root: "IMAGE",
    states: &[
        Label { name: "INIT", short: "init" },
        Label { name: "READY", short: "rdy" },
        Label { name: "USED", short: "used" },
        Label { name: "DISABLED", short: "disa" },
    ],
    types: &[
        Label { name: "OS", short: "OS" },
        Label { name: "CDROM", short: "CD" },
        Label { name: "DATABLOCK", short: "DB" },
    ],
};

const STATE_DISABLED: i64 = 3;

/// Allocate a new image from a template. On success the message carries
/// the id assigned to it.
pub fn allocate(client: &Client, template: &str) -> Response {
    client.call(&IMAGE.action("allocate"), vec![template.into()])
}

/// Fetch the image document. On success the message carries the XML
/// rendering of the image.
pub fn info(client: &Client, id: i64) -> Response {
    client.call(&IMAGE.action("info"), vec![id.into()])
}

/// Delete the image.
pub fn delete(client: &Client, id: i64) -> Response {
    client.call(&IMAGE.action("delete"), vec![id.into()])
}

/// Replace the image template contents.
pub fn update(client: &Client, id: i64, template: &str) -> Response {
    client.call(&IMAGE.action("update"), vec![id.into(), template.into()])
}

/// Enable or disable the image.
pub fn enable(client: &Client, id: i64, enable: bool) -> Response {
    client.call(&IMAGE.action("enable"), vec![id.into(), enable.into()])
}

/// Publish or unpublish the image.
pub fn publish(client: &Client, id: i64, publish: bool) -> Response {
    client.call(&IMAGE.action("publish"), vec![id.into(), publish.into()])
}

/// Change owner and/or group; -1 leaves the current value.
pub fn chown(client: &Client, id: i64, uid: i64, gid: i64) -> Response {
    client.call(&IMAGE.action("chown"), vec![id.into(), uid.into(), gid.into()])
}

/// Change the image type.
pub fn chtype(client: &Client, id: i64, image_type: &str) -> Response {
    client.call(&IMAGE.action("chtype"), vec![id.into(), image_type.into()])
}

/// Handle for one image.
#[derive(Debug)]
pub struct Image<'c> {
    client: &'c Client,
    element: PoolElement,
}

impl<'c> Image<'c> {
    /// Handle from a bare id; call [`Image::info`] before reading fields.
    pub fn new(client: &'c Client, id: i64) -> Self {
        Self {
            client,
            element: PoolElement::new(&IMAGE, id),
        }
    }

    /// Handle from an already-parsed document fragment.
    pub fn from_document(client: &'c Client, document: Document) -> Self {
        Self {
            client,
            element: PoolElement::from_document(&IMAGE, document),
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

    /// Fetch and cache the image document.
    pub fn info(&mut self) -> Response {
        let response = info(self.client, self.element.id());
        self.element.process_info(&response);
        response
    }

    pub fn delete(&self) -> Response {
        delete(self.client, self.element.id())
    }

    pub fn update(&self, template: &str) -> Response {
        update(self.client, self.element.id(), template)
    }

    pub fn enable(&self) -> Response {
        enable(self.client, self.element.id(), true)
    }

    pub fn disable(&self) -> Response {
        enable(self.client, self.element.id(), false)
    }

    pub fn publish(&self) -> Response {
        publish(self.client, self.element.id(), true)
    }

    pub fn unpublish(&self) -> Response {
        publish(self.client, self.element.id(), false)
    }

    pub fn chown(&self, uid: i64, gid: i64) -> Response {
        chown(self.client, self.element.id(), uid, gid)
    }

    /// Change the owner, leaving the group alone.
    pub fn chuid(&self, uid: i64) -> Response {
        chown(self.client, self.element.id(), uid, -1)
    }

    /// Change the group, leaving the owner alone.
    pub fn chgrp(&self, gid: i64) -> Response {
        chown(self.client, self.element.id(), -1, gid)
    }

    pub fn chtype(&self, image_type: &str) -> Response {
        chtype(self.client, self.element.id(), image_type)
    }

    /// Text content at `path` in the cached document.
    pub fn xpath(&self, path: &str) -> Option<&str> {
        self.element.xpath(path)
    }

    /// Numeric state; `None` until [`Image::info`] has succeeded.
    pub fn state(&self) -> Option<i64> {
        self.element.state()
    }

    /// State name (`READY`, ...); `Ok(None)` while unknown.
    pub fn state_name(&self) -> Result<Option<&'static str>> {
        Ok(self.element.state_label()?.map(|l| l.name))
    }

    /// Abbreviated state for dense listings.
    pub fn short_state(&self) -> Result<Option<&'static str>> {
        Ok(self.element.state_label()?.map(|l| l.short))
    }

    /// Numeric image type; `None` until the document is loaded.
    pub fn type_code(&self) -> Option<i64> {
        self.element.int_field("TYPE")
    }

    /// Type name (`OS`, `CDROM`, `DATABLOCK`); `Ok(None)` while unknown.
    pub fn type_name(&self) -> Result<Option<&'static str>> {
        Ok(self.element.type_label()?.map(|l| l.name))
    }

    /// Abbreviated type for dense listings.
    pub fn short_type(&self) -> Result<Option<&'static str>> {
        Ok(self.element.type_label()?.map(|l| l.short))
    }

    /// Whether the image is enabled; `None` while the state is unknown.
    pub fn is_enabled(&self) -> Option<bool> {
        self.element.state().map(|s| s != STATE_DISABLED)
    }

    /// Whether the image is public.
    pub fn is_public(&self) -> bool {
        self.element.flag_field("PUBLIC")
    }
}

/// Handle for the image pool listing.
#[derive(Debug)]
pub struct ImagePool<'c> {
    client: &'c Client,
    pool: ElementPool,
}

impl<'c> ImagePool<'c> {
    pub fn new(client: &'c Client) -> Self {
        Self {
            client,
            pool: ElementPool::new(&IMAGE),
        }
    }

    /// Fetch and cache the pool listing for `filter`.
    pub fn info(&mut self, filter: PoolFilter) -> Response {
        let response = self
            .client
            .call(&self.pool.action("info"), vec![filter.flag().into()]);
        self.pool.process_info(&response);
        response
    }

    /// Per-image handles over the cached listing; empty until
    /// [`ImagePool::info`] has succeeded.
    pub fn images(&self) -> Vec<Image<'c>> {
        self.pool
            .elements()
            .into_iter()
            .map(|element| Image::from_element(self.client, element))
            .collect()
    }
}
