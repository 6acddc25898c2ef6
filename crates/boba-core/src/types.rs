//! # Domain Types
//!
//! Core domain types used throughout Boba Catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │  ProductRecord  │   │  CatalogEntry   │   │   EditSession   │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  name           │   │  id (remote)    │   │  mode           │        │
//! │  │  category       │   │  record         │   │  draft          │        │
//! │  │  price (text)   │   └─────────────────┘   └─────────────────┘        │
//! │  │  image (b64)    │                                                    │
//! │  └─────────────────┘   ┌─────────────────┐   ┌─────────────────┐        │
//! │                        │    EditMode     │   │   DraftField    │        │
//! │                        │  ─────────────  │   │  ─────────────  │        │
//! │                        │  Creating       │   │  Name Category  │        │
//! │                        │  Editing(id)    │   │  Price Image    │        │
//! │                        └─────────────────┘   └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Record ids are opaque strings minted by the remote store on create.
//! A record has no id while it only exists as a local draft; ids live on
//! [`CatalogEntry`], never inside [`ProductRecord`] itself.

use serde::{Deserialize, Serialize};

// =============================================================================
// Product Record
// =============================================================================

/// A product record as stored in the remote collection.
///
/// All fields are free-form text. `price` is deliberately NOT parsed as a
/// number - the collection stores whatever the operator typed, and display
/// formatting is a frontend concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRecord {
    /// Display name shown in the catalog list.
    pub name: String,

    /// Category label (e.g. "Trà", "Cà phê").
    pub category: String,

    /// Price as entered, stored as text.
    pub price: String,

    /// Encoded image payload (PNG bytes, base64); empty string = no image.
    /// The wire name matches the deployed document shape.
    #[serde(rename = "imageBase64")]
    pub image: String,
}

impl ProductRecord {
    /// Creates a record from its three required fields, without an image.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        ProductRecord {
            name: name.into(),
            category: category.into(),
            price: price.into(),
            image: String::new(),
        }
    }

    /// Attaches an encoded image payload.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Returns true if the record carries an image payload.
    #[inline]
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }

    /// Writes a single field by name. No validation is performed here;
    /// required-field checks run at submit time.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::Category => self.category = value,
            DraftField::Price => self.price = value,
            DraftField::Image => self.image = value,
        }
    }

    /// Reads a single field by name.
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Category => &self.category,
            DraftField::Price => &self.price,
            DraftField::Image => &self.image,
        }
    }
}

// =============================================================================
// Catalog Entry & Snapshot
// =============================================================================

/// A persisted record paired with the id the remote store assigned to it.
///
/// Invariant: `id` is never empty - entries only exist for records the
/// remote store has acknowledged in a snapshot push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Opaque id assigned by the remote store.
    pub id: String,

    /// The record contents at the time of the snapshot.
    pub record: ProductRecord,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, record: ProductRecord) -> Self {
        CatalogEntry {
            id: id.into(),
            record,
        }
    }
}

/// A full replacement delivery of the remote collection, in feed order.
///
/// Snapshots are replaced wholesale on every push - never diffed or patched
/// in place.
pub type Snapshot = Vec<CatalogEntry>;

// =============================================================================
// Draft Fields
// =============================================================================

/// Names the editable fields of a draft record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Name,
    Category,
    Price,
    Image,
}

impl DraftField {
    /// Field label used in validation error messages.
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Category => "category",
            DraftField::Price => "price",
            DraftField::Image => "image",
        }
    }
}

// =============================================================================
// Edit Session
// =============================================================================

/// Whether the active draft creates a new record or overwrites an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "targetId", rename_all = "snake_case")]
pub enum EditMode {
    /// Composing a brand new record; no remote id exists yet.
    Creating,

    /// Editing the persisted record at the given id.
    Editing(String),
}

impl Default for EditMode {
    fn default() -> Self {
        EditMode::Creating
    }
}

/// The local "add new vs. edit existing" form state.
///
/// ## Lifecycle
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │   new() ──────────► Creating, empty draft                               │
/// │                          │                                              │
/// │   begin_edit(id, rec) ───┼──► Editing(id), draft = snapshot copy        │
/// │                          │         │                                    │
/// │   reset() ◄──────────────┴─────────┘   (after submit, or when the       │
/// │                                         edited record disappears)       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// The draft is a snapshot copy: mutating it never touches the catalog
/// entry it was populated from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSession {
    /// Current mode.
    pub mode: EditMode,

    /// The record under construction.
    pub draft: ProductRecord,
}

impl EditSession {
    /// Starts a fresh session: Creating mode, empty draft.
    pub fn new() -> Self {
        EditSession::default()
    }

    /// Switches to editing the record at `id`, populating the draft with a
    /// copy of its current fields. Any in-progress draft is discarded -
    /// last action wins, no confirmation.
    pub fn begin_edit(&mut self, id: impl Into<String>, record: &ProductRecord) {
        self.mode = EditMode::Editing(id.into());
        self.draft = record.clone();
    }

    /// Resets to a fresh Creating session with an empty draft.
    pub fn reset(&mut self) {
        *self = EditSession::new();
    }

    /// Returns the id being edited, if any.
    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            EditMode::Creating => None,
            EditMode::Editing(id) => Some(id),
        }
    }

    /// Returns true if this session is editing the record at `id`.
    pub fn is_editing(&self, id: &str) -> bool {
        self.editing_id() == Some(id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
