// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Owned snapshot of a resource's server-side state.
//!
//! `info` calls return the resource rendered as an XML document. It is
//! parsed once, into an owned tree, and queried afterwards with simple
//! slash-separated field paths (`"STATE"`, `"TEMPLATE/SIZE"`). Nothing here
//! validates a schema; accessors answer `None` for anything absent.

use roxmltree::Document as XmlDocument;

use crate::error::{ClientError, Result};

/// One element of the tree: tag name, direct text content, child elements.
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let mut text = String::new();
        let mut children = Vec::new();
        for child in node.children() {
            if child.is_element() {
                children.push(Element::from_node(child));
            } else if child.is_text() {
                text.push_str(child.text().unwrap_or(""));
            }
        }
        Self {
            name: node.tag_name().name().to_string(),
            text: text.trim().to_string(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    fn find(&self, path: &str) -> Option<&Element> {
        let mut current = self;
        for step in path.split('/').filter(|s| !s.is_empty()) {
            current = current.children.iter().find(|c| c.name == step)?;
        }
        Some(current)
    }
}

/// A parsed resource document, rooted at the resource element
/// (`<IMAGE>`, `<USER>`, `<IMAGE_POOL>`, ...).
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse an XML payload into an owned document.
    pub fn parse(xml: &str) -> Result<Self> {
        let doc =
            XmlDocument::parse(xml).map_err(|e| ClientError::Document(e.to_string()))?;
        Ok(Self {
            root: Element::from_node(doc.root_element()),
        })
    }

    /// Wrap an element fragment, e.g. one member of a pool listing.
    pub fn from_element(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_name(&self) -> &str {
        &self.root.name
    }

    /// Text content at a slash-separated path below the root, first match
    /// wins. `None` when the path does not resolve.
    pub fn text_at(&self, path: &str) -> Option<&str> {
        self.root.find(path).map(|e| e.text.as_str())
    }
}
