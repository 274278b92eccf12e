//! Closed element taxonomy and the label-to-kind classifier map.
//!
//! Raw detector labels are free-form strings ("button", "cell phone",
//! "TextField"). [`LabelMap`] folds them into the closed [`ElementKind`]
//! enumeration. The mapping is total: a label that matches no alias resolves
//! to the table's fallback kind, never to an error.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic category of a detected UI element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Tappable button
    Button,
    /// Single-line text input
    TextField,
    /// Static text or label
    Text,
    /// Generic box / card
    Container,
    /// Image or picture placeholder
    Image,
    /// Small glyph
    Icon,
    /// Checkbox with a trailing label
    Checkbox,
    /// Labeled on/off toggle
    Switch,
    /// Side navigation panel
    Drawer,
    /// Dialog surface
    Modal,
    /// Paged dot indicator
    PageIndicator,
    /// System status bar, implied by the page scaffold
    StatusBar,
    /// Anything the classifier could not place
    Unknown,
}

impl ElementKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Button,
        Self::TextField,
        Self::Text,
        Self::Container,
        Self::Image,
        Self::Icon,
        Self::Checkbox,
        Self::Switch,
        Self::Drawer,
        Self::Modal,
        Self::PageIndicator,
        Self::StatusBar,
        Self::Unknown,
    ];

    /// Canonical snake_case name (matches the serde representation).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::TextField => "text_field",
            Self::Text => "text",
            Self::Container => "container",
            Self::Image => "image",
            Self::Icon => "icon",
            Self::Checkbox => "checkbox",
            Self::Switch => "switch",
            Self::Drawer => "drawer",
            Self::Modal => "modal",
            Self::PageIndicator => "page_indicator",
            Self::StatusBar => "status_bar",
            Self::Unknown => "unknown",
        }
    }

    /// Title-cased display name, used as widget text when a detection has no label.
    #[inline]
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Button => "Button",
            Self::TextField => "Text Field",
            Self::Text => "Text",
            Self::Container => "Container",
            Self::Image => "Image",
            Self::Icon => "Icon",
            Self::Checkbox => "Checkbox",
            Self::Switch => "Switch",
            Self::Drawer => "Drawer",
            Self::Modal => "Modal",
            Self::PageIndicator => "Page Indicator",
            Self::StatusBar => "Status Bar",
            Self::Unknown => "Unknown",
        }
    }

    /// False for kinds that render to nothing (the status bar is already
    /// provided by the page scaffold).
    #[inline]
    #[must_use]
    pub const fn is_rendered(self) -> bool {
        !matches!(self, Self::StatusBar)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no [`ElementKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseElementKindError(String);

impl fmt::Display for ParseElementKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown element kind: '{}'", self.0)
    }
}

impl std::error::Error for ParseElementKindError {}

impl FromStr for ElementKind {
    type Err = ParseElementKindError;

    /// Parses snake_case names and display names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = normalize(s);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == needle || normalize(kind.display_name()) == needle)
            .ok_or_else(|| ParseElementKindError(s.to_string()))
    }
}

/// Aliases shorter than this only match exactly, never as substrings
/// ("tv" must not fire inside "textview").
const MIN_SUBSTRING_ALIAS_LEN: usize = 3;

/// UI vocabulary plus the COCO stand-ins used when a general object detector
/// is pointed at a sketch.
const UI_ELEMENT_ALIASES: &[(&str, ElementKind)] = &[
    ("button", ElementKind::Button),
    ("btn", ElementKind::Button),
    ("remote", ElementKind::Button),
    ("cell phone", ElementKind::Button),
    ("textfield", ElementKind::TextField),
    ("text_field", ElementKind::TextField),
    ("text field", ElementKind::TextField),
    ("textinput", ElementKind::TextField),
    ("input", ElementKind::TextField),
    ("keyboard", ElementKind::TextField),
    ("text", ElementKind::Text),
    ("label", ElementKind::Text),
    ("book", ElementKind::Text),
    ("container", ElementKind::Container),
    ("box", ElementKind::Container),
    ("rectangle", ElementKind::Container),
    ("card", ElementKind::Container),
    ("tv", ElementKind::Container),
    ("laptop", ElementKind::Container),
    ("image", ElementKind::Image),
    ("picture", ElementKind::Image),
    ("photo", ElementKind::Image),
    ("person", ElementKind::Image),
    ("frisbee", ElementKind::Image),
    ("icon", ElementKind::Icon),
    ("clock", ElementKind::Icon),
    ("stop sign", ElementKind::Icon),
    ("checkbox", ElementKind::Checkbox),
    ("check_box", ElementKind::Checkbox),
    ("switch", ElementKind::Switch),
    ("toggle", ElementKind::Switch),
    ("drawer", ElementKind::Drawer),
    ("sidebar", ElementKind::Drawer),
    ("modal", ElementKind::Modal),
    ("dialog", ElementKind::Modal),
    ("popup", ElementKind::Modal),
    ("page_indicator", ElementKind::PageIndicator),
    ("pageindicator", ElementKind::PageIndicator),
    ("page indicator", ElementKind::PageIndicator),
    ("dots", ElementKind::PageIndicator),
    ("status_bar", ElementKind::StatusBar),
    ("statusbar", ElementKind::StatusBar),
    ("status bar", ElementKind::StatusBar),
];

/// Reduced mapping used by the first demo build: a handful of COCO classes,
/// and every unmatched rectangle treated as a container.
const COCO_DEMO_ALIASES: &[(&str, ElementKind)] = &[
    ("cell phone", ElementKind::Button),
    ("remote", ElementKind::Button),
    ("keyboard", ElementKind::Button),
    ("book", ElementKind::Container),
    ("laptop", ElementKind::Container),
    ("tv", ElementKind::Image),
    ("monitor", ElementKind::Image),
];

static DEFAULT_LABEL_MAP: Lazy<LabelMap> = Lazy::new(LabelMap::ui_elements);

/// Classify a raw label with the default UI vocabulary.
///
/// ```rust
/// use sketchgen_core::{classify, ElementKind};
///
/// assert_eq!(classify("Button"), ElementKind::Button);
/// assert_eq!(classify("primary_btn"), ElementKind::Button);
/// assert_eq!(classify("giraffe"), ElementKind::Unknown);
/// ```
#[must_use]
pub fn classify(raw_label: &str) -> ElementKind {
    DEFAULT_LABEL_MAP.classify(raw_label)
}

/// Case-insensitive alias table mapping raw labels onto [`ElementKind`].
///
/// Many aliases may map to one kind. Lookup tries an exact alias match first,
/// then the longest alias contained in the label (ties go to the earlier
/// entry), then the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    entries: Vec<(String, ElementKind)>,
    fallback: ElementKind,
}

impl LabelMap {
    /// Build a custom table. Aliases are stored lowercased and trimmed.
    #[must_use]
    pub fn new<I, S>(entries: I, fallback: ElementKind) -> Self
    where
        I: IntoIterator<Item = (S, ElementKind)>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(alias, kind)| (normalize(alias.as_ref()), kind))
                .filter(|(alias, _)| !alias.is_empty())
                .collect(),
            fallback,
        }
    }

    /// Default UI vocabulary, unmatched labels become [`ElementKind::Unknown`].
    #[must_use]
    pub fn ui_elements() -> Self {
        Self::new(UI_ELEMENT_ALIASES.iter().copied(), ElementKind::Unknown)
    }

    /// Legacy COCO demo mapping, unmatched labels become [`ElementKind::Container`].
    #[must_use]
    pub fn coco_demo() -> Self {
        Self::new(COCO_DEMO_ALIASES.iter().copied(), ElementKind::Container)
    }

    /// Kind returned when nothing matches
    #[inline]
    #[must_use]
    pub const fn fallback(&self) -> ElementKind {
        self.fallback
    }

    /// Number of aliases in the table
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no aliases (everything maps to the fallback)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Map a raw label to a kind. Total: never fails.
    #[must_use]
    pub fn classify(&self, raw_label: &str) -> ElementKind {
        let label = normalize(raw_label);
        if label.is_empty() {
            return self.fallback;
        }

        if let Some((_, kind)) = self.entries.iter().find(|(alias, _)| *alias == label) {
            return *kind;
        }

        let mut best: Option<(&str, ElementKind)> = None;
        for (alias, kind) in &self.entries {
            if alias.len() < MIN_SUBSTRING_ALIAS_LEN || !label.contains(alias.as_str()) {
                continue;
            }
            if best.map_or(true, |(current, _)| alias.len() > current.len()) {
                best = Some((alias.as_str(), *kind));
            }
        }

        best.map_or(self.fallback, |(_, kind)| kind)
    }
}

impl Default for LabelMap {
    #[inline]
    fn default() -> Self {
        Self::ui_elements()
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}
