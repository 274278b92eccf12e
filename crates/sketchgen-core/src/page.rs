//! Page assembly: wraps a widget expression into a complete Flutter screen.

use crate::detection::Detection;
use crate::synth::{dart_string, indent_tail, Synthesizer};

/// Class name used when a page name has no usable characters.
pub const DEFAULT_PAGE_NAME: &str = "GeneratedPage";

/// Default padding around the page body.
pub const DEFAULT_PAGE_PADDING: u32 = 16;

/// Default number of widgets in a preview.
pub const DEFAULT_PREVIEW_LIMIT: usize = 5;

/// Turn a free-form name into a Dart class identifier.
///
/// Keeps ASCII alphanumerics only. A result that is empty or does not start
/// with a letter becomes [`DEFAULT_PAGE_NAME`]; otherwise the first letter is
/// uppercased.
///
/// ```rust
/// use sketchgen_core::page::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("login page"), "Loginpage");
/// assert_eq!(sanitize_identifier("3 bad name!"), "GeneratedPage");
/// ```
#[must_use]
pub fn sanitize_identifier(name: &str) -> String {
    let kept: String = name.chars().filter(char::is_ascii_alphanumeric).collect();
    let mut chars = kept.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            let mut out = String::with_capacity(kept.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        _ => DEFAULT_PAGE_NAME.to_string(),
    }
}

/// Wrap `body` (a widget expression at column zero) into a `StatefulWidget`
/// page named after `page_name`.
#[must_use = "returns the page source"]
pub fn assemble(page_name: &str, body: &str, padding: u32) -> String {
    let class_name = sanitize_identifier(page_name);
    let body = if body.trim().is_empty() {
        "const SizedBox.shrink()"
    } else {
        body
    };

    format!(
        "import 'package:flutter/material.dart';

class {class_name} extends StatefulWidget {{
  const {class_name}({{super.key}});

  @override
  State<{class_name}> createState() => _{class_name}State();
}}

class _{class_name}State extends State<{class_name}> {{
  @override
  Widget build(BuildContext context) {{
    return Scaffold(
      appBar: AppBar(
        title: const Text({title}),
        centerTitle: true,
      ),
      body: SafeArea(
        child: SingleChildScrollView(
          padding: const EdgeInsets.all({padding}),
          child: {body},
        ),
      ),
    );
  }}
}}
",
        title = dart_string(&class_name),
        body = indent_tail(body, 10),
    )
}

/// Leaf widgets of the first `limit` detections, separated by blank lines.
///
/// `ordered` must already be in reading order. Kinds that render nothing are
/// skipped without counting towards the limit.
#[must_use]
pub fn preview(synthesizer: &Synthesizer, ordered: &[Detection], limit: usize) -> String {
    ordered
        .iter()
        .map(|detection| synthesizer.fragment(detection))
        .filter(|fragment| !fragment.is_empty())
        .take(limit)
        .map(|fragment| fragment.source)
        .collect::<Vec<_>>()
        .join("\n\n")
}
