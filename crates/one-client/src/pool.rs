// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Generic remote-resource handles.
//!
//! Every resource kind (image, user, cluster, ...) is the same machine: a
//! numeric id, an optional cached [`Document`] replaced by each successful
//! `info` call, and uniform field accessors over that document. Instead of
//! one subtype per kind, a single [`PoolElement`] is parametrized by a
//! static [`ResourceKind`] descriptor carrying the wire prefix, the document
//! root tag and the label tables for numeric state/type codes.

use tracing::warn;

use crate::document::Document;
use crate::error::{ClientError, Result};
use crate::response::Response;

/// Human-readable names for one numeric state or type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub name: &'static str,
    pub short: &'static str,
}

/// Per-kind descriptor: everything that distinguishes one resource kind
/// from another at this layer.
#[derive(Debug)]
pub struct ResourceKind {
    /// Wire action prefix, e.g. `image` in `image.info`.
    pub name: &'static str,
    /// Root tag of the resource document, e.g. `IMAGE`.
    pub root: &'static str,
    /// Labels positionally indexed by the numeric `STATE` code.
    pub states: &'static [Label],
    /// Labels positionally indexed by the numeric `TYPE` code.
    pub types: &'static [Label],
}

impl ResourceKind {
    /// Full action name for `operation`, e.g. `image.delete`.
    pub fn action(&self, operation: &str) -> String {
        format!("{}.{operation}", self.name)
    }

    /// Label for a numeric state code. A code outside the table is reported
    /// as an error, never indexed blindly.
    pub fn state_label(&self, code: i64) -> Result<Label> {
        Self::lookup(self.states, "state", code)
    }

    /// Label for a numeric type code, with the same range check.
    pub fn type_label(&self, code: i64) -> Result<Label> {
        Self::lookup(self.types, "type", code)
    }

    fn lookup(table: &'static [Label], name: &'static str, code: i64) -> Result<Label> {
        usize::try_from(code)
            .ok()
            .and_then(|index| table.get(index))
            .copied()
            .ok_or(ClientError::UnknownCode { table: name, code })
    }
}

/// Handle for a single remote resource.
///
/// Field accessors answer `None` until a successful `info` call has
/// installed a document; callers must not treat "unknown" as a value.
#[derive(Debug, Clone)]
pub struct PoolElement {
    id: i64,
    kind: &'static ResourceKind,
    document: Option<Document>,
}

impl PoolElement {
    /// Handle from a bare id; the document must be fetched before any
    /// field accessor is meaningful.
    pub fn new(kind: &'static ResourceKind, id: i64) -> Self {
        Self {
            id,
            kind,
            document: None,
        }
    }

    /// Handle from an already-parsed fragment, the pool-enumeration path.
    /// The id is taken from the fragment's `ID` field, -1 when absent.
    pub fn from_document(kind: &'static ResourceKind, document: Document) -> Self {
        let id = document
            .text_at("ID")
            .and_then(|t| t.parse().ok())
            .unwrap_or(-1);
        Self {
            id,
            kind,
            document: Some(document),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn kind(&self) -> &'static ResourceKind {
        self.kind
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Text content at `path` in the cached document; `None` when no
    /// document is cached or the path does not resolve.
    pub fn xpath(&self, path: &str) -> Option<&str> {
        self.document.as_ref()?.text_at(path)
    }

    /// Numeric field at `path`; `None` when absent or non-numeric.
    pub fn int_field(&self, path: &str) -> Option<i64> {
        self.xpath(path)?.parse().ok()
    }

    /// Boolean-like field at `path`; the wire convention is `"1"` for true.
    pub fn flag_field(&self, path: &str) -> bool {
        self.xpath(path) == Some("1")
    }

    /// The numeric `STATE` field. `None` means unknown, which is never a
    /// valid state index.
    pub fn state(&self) -> Option<i64> {
        self.int_field("STATE")
    }

    /// Label for the current state: `Ok(None)` while unknown, an error for
    /// a numeric code outside the kind's table.
    pub fn state_label(&self) -> Result<Option<Label>> {
        self.state()
            .map(|code| self.kind.state_label(code))
            .transpose()
    }

    /// Label for the numeric `TYPE` field, same contract as
    /// [`Self::state_label`].
    pub fn type_label(&self) -> Result<Option<Label>> {
        self.int_field("TYPE")
            .map(|code| self.kind.type_label(code))
            .transpose()
    }

    /// Install the document carried by a successful info response. Failed
    /// responses and unparseable payloads leave the cached document
    /// untouched, stale but consistent.
    pub fn process_info(&mut self, response: &Response) {
        if !response.is_success() {
            return;
        }
        let Some(message) = response.message() else {
            return;
        };
        match Document::parse(message) {
            Ok(document) => self.document = Some(document),
            Err(err) => warn!(
                kind = self.kind.name,
                id = self.id,
                %err,
                "discarding unparseable info payload"
            ),
        }
    }
}

/// Ownership filter for pool listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PoolFilter {
    /// Resources belonging to the calling user.
    #[default]
    Mine,
    /// Every resource the caller is allowed to see.
    All,
    /// Resources of the calling user and of its group.
    MineAndGroup,
    /// Resources of one specific user id.
    User(i64),
}

impl PoolFilter {
    /// The wire encoding of the filter.
    pub fn flag(self) -> i64 {
        match self {
            PoolFilter::Mine => -3,
            PoolFilter::All => -2,
            PoolFilter::MineAndGroup => -1,
            PoolFilter::User(uid) => uid,
        }
    }
}

/// Collection counterpart of [`PoolElement`]: the cached `<KIND>_POOL`
/// listing document, split on demand into per-element handles.
#[derive(Debug)]
pub struct ElementPool {
    kind: &'static ResourceKind,
    document: Option<Document>,
}

impl ElementPool {
    pub fn new(kind: &'static ResourceKind) -> Self {
        Self {
            kind,
            document: None,
        }
    }

    /// Full action name for a pool operation, e.g. `imagepool.info`.
    pub fn action(&self, operation: &str) -> String {
        format!("{}pool.{operation}", self.kind.name)
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Install the listing carried by a successful info response; same
    /// replacement semantics as [`PoolElement::process_info`].
    pub fn process_info(&mut self, response: &Response) {
        if !response.is_success() {
            return;
        }
        let Some(message) = response.message() else {
            return;
        };
        match Document::parse(message) {
            Ok(document) => self.document = Some(document),
            Err(err) => warn!(
                kind = self.kind.name,
                %err,
                "discarding unparseable pool payload"
            ),
        }
    }

    /// Split the cached listing into element handles, one per child of the
    /// pool root matching the kind's resource tag. Empty until a listing
    /// has been fetched.
    pub fn elements(&self) -> Vec<PoolElement> {
        let Some(document) = &self.document else {
            return Vec::new();
        };
        document
            .root()
            .children()
            .iter()
            .filter(|el| el.name() == self.kind.root)
            .map(|el| PoolElement::from_document(self.kind, Document::from_element(el.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_KIND: ResourceKind = ResourceKind {
        name: "image",
        root: "IMAGE",
        states: &[
            Label { name: "INIT", short: "init" },
            Label { name: "READY", short: "rdy" },
        ],
        types: &[],
    };

    #[test]
    fn test_accessors_before_info_are_unknown() {
        let element = PoolElement::new(&TEST_KIND, 5);
        assert_eq!(element.id(), 5);
        assert_eq!(element.xpath("ID"), None);
        assert_eq!(element.state(), None);
        assert_eq!(element.state_label().unwrap(), None);
        assert!(!element.flag_field("PUBLIC"));
    }

    #[test]
    fn test_successful_info_replaces_document() {
        let mut element = PoolElement::new(&TEST_KIND, 5);
        element.process_info(&Response::new(
            true,
            Some("<IMAGE><ID>5</ID><STATE>0</STATE></IMAGE>".to_string()),
        ));
        assert_eq!(element.state(), Some(0));

        element.process_info(&Response::new(
            true,
            Some("<IMAGE><ID>5</ID><STATE>1</STATE></IMAGE>".to_string()),
        ));
        assert_eq!(element.state(), Some(1));
        assert_eq!(element.state_label().unwrap().map(|l| l.name), Some("READY"));
    }

    #[test]
    fn test_failed_info_leaves_document_untouched() {
        let mut element = PoolElement::new(&TEST_KIND, 5);
        element.process_info(&Response::new(
            true,
            Some("<IMAGE><STATE>1</STATE></IMAGE>".to_string()),
        ));

        element.process_info(&Response::failure("error getting image"));
        assert_eq!(element.state(), Some(1));

        element.process_info(&Response::new(true, Some("not xml <".to_string())));
        assert_eq!(element.state(), Some(1));
    }

    #[test]
    fn test_missing_state_field_is_unknown_not_an_error() {
        let mut element = PoolElement::new(&TEST_KIND, 5);
        element.process_info(&Response::new(
            true,
            Some("<IMAGE><ID>5</ID></IMAGE>".to_string()),
        ));
        assert_eq!(element.state(), None);
        assert_eq!(element.state_label().unwrap(), None);
    }

    #[test]
    fn test_out_of_range_state_is_an_explicit_error() {
        let mut element = PoolElement::new(&TEST_KIND, 5);
        element.process_info(&Response::new(
            true,
            Some("<IMAGE><STATE>9</STATE></IMAGE>".to_string()),
        ));
        match element.state_label() {
            Err(ClientError::UnknownCode { table, code }) => {
                assert_eq!(table, "state");
                assert_eq!(code, 9);
            }
            other => panic!("expected unknown code error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_document_extracts_id() {
        let doc = Document::parse("<IMAGE><ID>12</ID></IMAGE>").unwrap();
        let element = PoolElement::from_document(&TEST_KIND, doc);
        assert_eq!(element.id(), 12);

        let doc = Document::parse("<IMAGE></IMAGE>").unwrap();
        let element = PoolElement::from_document(&TEST_KIND, doc);
        assert_eq!(element.id(), -1);
    }

    #[test]
    fn test_pool_filter_flags() {
        assert_eq!(PoolFilter::Mine.flag(), -3);
        assert_eq!(PoolFilter::All.flag(), -2);
        assert_eq!(PoolFilter::MineAndGroup.flag(), -1);
        assert_eq!(PoolFilter::User(8).flag(), 8);
    }

    #[test]
    fn test_pool_enumeration() {
        let mut pool = ElementPool::new(&TEST_KIND);
        assert_eq!(pool.action("info"), "imagepool.info");
        assert!(pool.elements().is_empty());

        pool.process_info(&Response::new(
            true,
            Some(
                "<IMAGE_POOL>\
                 <IMAGE><ID>1</ID><STATE>1</STATE></IMAGE>\
                 <IMAGE><ID>3</ID><STATE>0</STATE></IMAGE>\
                 </IMAGE_POOL>"
                    .to_string(),
            ),
        ));

        let elements = pool.elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].id(), 1);
        assert_eq!(elements[0].state(), Some(1));
        assert_eq!(elements[1].id(), 3);
    }
}
