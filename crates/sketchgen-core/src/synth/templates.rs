//! Per-kind Flutter widget templates.
//!
//! Each template is a plain formatting function over [`WidgetParams`]. The
//! output starts at column zero; callers re-indent it when nesting. Every
//! template returns a complete expression with balanced brackets.

use crate::taxonomy::ElementKind;

/// Minimum button height; Material touch target.
pub const BUTTON_MIN_HEIGHT: u32 = 48;
/// Minimum icon size.
pub const ICON_MIN_SIZE: u32 = 24;
/// Glyph size inside image placeholders.
const IMAGE_GLYPH_SIZE: u32 = 48;
/// Dots drawn by the page indicator.
const PAGE_INDICATOR_DOTS: u32 = 3;

/// Inputs shared by every template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetParams<'a> {
    /// Display text, unescaped
    pub text: &'a str,
    /// Width in logical pixels on the reference canvas
    pub width: u32,
    /// Height in logical pixels on the reference canvas
    pub height: u32,
}

/// A template: formats one widget expression.
pub type TemplateFn = fn(&WidgetParams<'_>) -> String;

/// Template used for each kind.
///
/// Exhaustive on purpose: adding a kind fails to compile until it is given a
/// template here.
#[must_use]
pub fn template_for(kind: ElementKind) -> TemplateFn {
    match kind {
        ElementKind::Button => button,
        ElementKind::TextField => text_field,
        ElementKind::Text => text,
        ElementKind::Container | ElementKind::Unknown => container,
        ElementKind::Image => image_placeholder,
        ElementKind::Icon => icon,
        ElementKind::Checkbox => checkbox,
        ElementKind::Switch => labeled_switch,
        ElementKind::Drawer => drawer,
        ElementKind::Modal => modal,
        ElementKind::PageIndicator => page_indicator,
        ElementKind::StatusBar => omitted,
    }
}

/// Quote text as a Dart single-quoted string literal.
#[must_use]
pub fn dart_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// `ElevatedButton` with a minimum size; height floors at [`BUTTON_MIN_HEIGHT`].
#[must_use]
pub fn button(params: &WidgetParams<'_>) -> String {
    format!(
        "ElevatedButton(
  onPressed: () {{}},
  style: ElevatedButton.styleFrom(
    minimumSize: Size({width}, {height}),
    shape: RoundedRectangleBorder(
      borderRadius: BorderRadius.circular(12),
    ),
  ),
  child: Text({text}),
)",
        width = params.width,
        height = params.height.max(BUTTON_MIN_HEIGHT),
        text = dart_string(params.text),
    )
}

/// Outlined `TextField` with label and hint.
#[must_use]
pub fn text_field(params: &WidgetParams<'_>) -> String {
    format!(
        "TextField(
  decoration: InputDecoration(
    labelText: {label},
    hintText: {hint},
    border: OutlineInputBorder(
      borderRadius: BorderRadius.circular(12),
    ),
    filled: true,
  ),
)",
        label = dart_string(params.text),
        hint = dart_string(&format!("Enter {}", params.text.to_lowercase())),
    )
}

/// Body text.
#[must_use]
pub fn text(params: &WidgetParams<'_>) -> String {
    format!(
        "Text(
  {text},
  style: Theme.of(context).textTheme.bodyLarge,
)",
        text = dart_string(params.text),
    )
}

/// Outlined box of the detected size. Also used for unknown elements.
#[must_use]
pub fn container(params: &WidgetParams<'_>) -> String {
    format!(
        "Container(
  width: {width},
  height: {height},
  decoration: BoxDecoration(
    color: Theme.of(context).colorScheme.surface,
    borderRadius: BorderRadius.circular(12),
    border: Border.all(
      color: Theme.of(context).colorScheme.outline,
    ),
  ),
)",
        width = params.width,
        height = params.height,
    )
}

/// Filled box with an image glyph.
#[must_use]
pub fn image_placeholder(params: &WidgetParams<'_>) -> String {
    format!(
        "Container(
  width: {width},
  height: {height},
  decoration: BoxDecoration(
    color: Theme.of(context).colorScheme.surfaceContainerHighest,
    borderRadius: BorderRadius.circular(12),
  ),
  child: Icon(
    Icons.image,
    size: {glyph},
    color: Theme.of(context).colorScheme.onSurfaceVariant,
  ),
)",
        width = params.width,
        height = params.height,
        glyph = IMAGE_GLYPH_SIZE,
    )
}

/// Icon sized by the detection height; floors at [`ICON_MIN_SIZE`].
#[must_use]
pub fn icon(params: &WidgetParams<'_>) -> String {
    format!(
        "Icon(
  Icons.star,
  size: {size},
  color: Theme.of(context).colorScheme.primary,
)",
        size = params.height.max(ICON_MIN_SIZE),
    )
}

/// Checkbox with its label as a list tile.
#[must_use]
pub fn checkbox(params: &WidgetParams<'_>) -> String {
    format!(
        "CheckboxListTile(
  value: false,
  onChanged: (value) {{}},
  title: Text({text}),
  controlAffinity: ListTileControlAffinity.leading,
)",
        text = dart_string(params.text),
    )
}

/// Labeled on/off toggle.
#[must_use]
pub fn labeled_switch(params: &WidgetParams<'_>) -> String {
    format!(
        "SwitchListTile(
  value: false,
  onChanged: (value) {{}},
  title: Text({text}),
)",
        text = dart_string(params.text),
    )
}

/// Navigation drawer panel with a single header tile.
#[must_use]
pub fn drawer(params: &WidgetParams<'_>) -> String {
    format!(
        "Drawer(
  width: {width},
  child: ListView(
    shrinkWrap: true,
    children: [
      ListTile(
        leading: const Icon(Icons.menu),
        title: Text({text}),
      ),
    ],
  ),
)",
        width = params.width,
        text = dart_string(params.text),
    )
}

/// Dialog surface with cancel/confirm actions.
#[must_use]
pub fn modal(params: &WidgetParams<'_>) -> String {
    format!(
        "AlertDialog(
  title: Text({text}),
  content: const Text('Dialog content'),
  actions: [
    TextButton(
      onPressed: () {{}},
      child: const Text('Cancel'),
    ),
    FilledButton(
      onPressed: () {{}},
      child: const Text('OK'),
    ),
  ],
)",
        text = dart_string(params.text),
    )
}

/// Row of dots with the first one highlighted.
#[must_use]
pub fn page_indicator(_params: &WidgetParams<'_>) -> String {
    format!(
        "Row(
  mainAxisAlignment: MainAxisAlignment.center,
  children: List.generate(
    {dots},
    (index) => Container(
      width: 8,
      height: 8,
      margin: const EdgeInsets.symmetric(horizontal: 4),
      decoration: BoxDecoration(
        shape: BoxShape.circle,
        color: index == 0
            ? Theme.of(context).colorScheme.primary
            : Theme.of(context).colorScheme.outlineVariant,
      ),
    ),
  ),
)",
        dots = PAGE_INDICATOR_DOTS,
    )
}

/// Renders nothing; the element is implied by the page scaffold.
#[must_use]
pub fn omitted(_params: &WidgetParams<'_>) -> String {
    String::new()
}
