//! Descriptor emitters: the fixed XML schema, the user-template format
//! with `%` specifiers, and a JSON equivalent for engine pipelines.

use serde_json::{json, Value};
use tracing::warn;

use crate::model::{AtlasLayout, SpriteFrame};

/// Render the fixed XML descriptor.
///
/// One `<sprite>` element per input, in input order. `width`/`height` are
/// the trimmed dimensions handed to the packer (pre-rotation). Attribute
/// values are entity-escaped, so re-parsing recovers every field exactly.
pub fn to_xml(layout: &AtlasLayout) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<texture width=\"{}\" height=\"{}\">\n",
        layout.width, layout.height
    ));
    for s in &layout.sprites {
        out.push_str(&format!(
            "    <sprite name=\"{}\" left=\"{}\" top=\"{}\" rotated=\"{}\" width=\"{}\" height=\"{}\" trimOffsetLeft=\"{}\" trimOffsetTop=\"{}\" originWidth=\"{}\" originHeight=\"{}\"></sprite>\n",
            xml_escape(&s.name),
            s.placement.left,
            s.placement.top,
            s.placement.rotated,
            s.width,
            s.height,
            s.trim.offset_left,
            s.trim.offset_top,
            s.trim.origin_width,
            s.trim.origin_height,
        ));
    }
    out.push_str("</texture>\n");
    out
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// User-supplied template strings for custom descriptor formats. Emission
/// is `header`, then for each sprite `split` (between sprites only) and
/// `body`, then `footer`.
#[derive(Debug, Clone, Default)]
pub struct TemplateSpec {
    pub header: Option<String>,
    pub body: String,
    pub footer: Option<String>,
    pub split: Option<String>,
}

/// Render the template descriptor.
pub fn to_template(layout: &AtlasLayout, spec: &TemplateSpec) -> String {
    let mut out = String::new();
    if let Some(header) = &spec.header {
        out.push_str(&expand(header, layout, None));
    }
    for (i, sprite) in layout.sprites.iter().enumerate() {
        if i > 0 {
            if let Some(split) = &spec.split {
                out.push_str(&expand(split, layout, None));
            }
        }
        out.push_str(&expand(&spec.body, layout, Some(sprite)));
    }
    if let Some(footer) = &spec.footer {
        out.push_str(&expand(footer, layout, None));
    }
    out
}

/// Expand one template string.
///
/// `%W`/`%H` are the bin dimensions; the lowercase specifiers refer to the
/// sprite currently in scope and are only meaningful inside the body. An
/// unknown specifier (or a sprite specifier with no sprite in scope) emits
/// the literal character and logs a warning.
fn expand(template: &str, layout: &AtlasLayout, sprite: Option<&SpriteFrame>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => match chars.next() {
                Some('W') => out.push_str(&layout.width.to_string()),
                Some('H') => out.push_str(&layout.height.to_string()),
                Some('%') => out.push('%'),
                Some(spec_char) => match sprite {
                    Some(s) => expand_sprite_specifier(&mut out, spec_char, s),
                    None => {
                        warn!(specifier = %spec_char, "unknown format specifier");
                        out.push(spec_char);
                    }
                },
                None => {
                    warn!("dangling '%' at end of template");
                    out.push('%');
                }
            },
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    warn!(escape = %other, "unknown escape");
                    out.push(other);
                }
                None => {
                    warn!("dangling '\\' at end of template");
                    out.push('\\');
                }
            },
            other => out.push(other),
        }
    }
    out
}

fn expand_sprite_specifier(out: &mut String, spec_char: char, s: &SpriteFrame) {
    match spec_char {
        'n' => out.push_str(&s.name),
        'w' => out.push_str(&s.width.to_string()),
        'h' => out.push_str(&s.height.to_string()),
        'x' => out.push_str(&s.placement.left.to_string()),
        'y' => out.push_str(&s.placement.top.to_string()),
        'l' => out.push_str(&s.trim.offset_left.to_string()),
        't' => out.push_str(&s.trim.offset_top.to_string()),
        'c' => out.push_str(&s.trim.origin_width.to_string()),
        'r' => out.push_str(&s.trim.origin_height.to_string()),
        'f' => out.push_str(if s.placement.rotated { "1" } else { "0" }),
        other => {
            warn!(specifier = %other, "unknown format specifier");
            out.push(other);
        }
    }
}

/// JSON rendition of the layout, field-for-field equivalent to the XML
/// descriptor.
pub fn to_json(layout: &AtlasLayout) -> Value {
    let sprites: Vec<Value> = layout
        .sprites
        .iter()
        .map(|s| {
            json!({
                "name": s.name,
                "left": s.placement.left,
                "top": s.placement.top,
                "rotated": s.placement.rotated,
                "width": s.width,
                "height": s.height,
                "trimOffsetLeft": s.trim.offset_left,
                "trimOffsetTop": s.trim.offset_top,
                "originWidth": s.trim.origin_width,
                "originHeight": s.trim.origin_height,
            })
        })
        .collect();
    json!({
        "texture": {
            "width": layout.width,
            "height": layout.height,
            "occupancy": layout.occupancy,
        },
        "sprites": sprites,
    })
}
