use std::fmt::Write as _;

use crate::{
    foundation::error::{LevelError, LevelResult},
    scene::model::{NodeKind, ResourceId, SceneDocument, Variant},
};

/// Scene text format version emitted in the header.
pub const SCENE_FORMAT: u32 = 3;

/// Renders `doc` as engine scene text.
///
/// The document is validated first; output is byte-for-byte stable for equal
/// documents.
pub fn render_scene(doc: &SceneDocument) -> LevelResult<String> {
    doc.validate()?;
    let mut out = String::new();
    write_scene(&mut out, doc)?;
    Ok(out)
}

fn write_scene(out: &mut String, doc: &SceneDocument) -> LevelResult<()> {
    writeln!(
        out,
        "[gd_scene load_steps={} format={SCENE_FORMAT} uid=\"{}\"]",
        doc.load_steps(),
        doc.uid
    )?;

    if !doc.ext_resources.is_empty() {
        out.push('\n');
    }
    for r in &doc.ext_resources {
        write!(out, "[ext_resource type=\"{}\"", r.kind)?;
        if let Some(uid) = &r.uid {
            write!(out, " uid=\"{uid}\"")?;
        }
        writeln!(out, " path=\"{}\" id=\"{}\"]", r.path, r.id.0)?;
    }

    for sub in &doc.sub_resources {
        writeln!(out)?;
        writeln!(out, "[sub_resource type=\"{}\" id=\"{}\"]", sub.kind, sub.key())?;
        write_properties(out, doc, &sub.properties)?;
    }

    for node in &doc.nodes {
        writeln!(out)?;
        write!(out, "[node name=\"{}\"", escape(&node.name))?;
        if let NodeKind::Typed(ty) = &node.kind {
            write!(out, " type=\"{ty}\"")?;
        }
        if let Some(parent) = &node.parent {
            write!(out, " parent=\"{}\"", escape(parent))?;
        }
        if let NodeKind::Instance(id) = node.kind {
            write!(out, " instance=ExtResource(\"{}\")", id.0)?;
        }
        writeln!(out, "]")?;
        write_properties(out, doc, &node.properties)?;
    }
    Ok(())
}

fn write_properties(
    out: &mut String,
    doc: &SceneDocument,
    props: &[(String, Variant)],
) -> LevelResult<()> {
    for (key, value) in props {
        write!(out, "{key} = ")?;
        write_variant(out, doc, value)?;
        out.push('\n');
    }
    Ok(())
}

fn write_variant(out: &mut String, doc: &SceneDocument, value: &Variant) -> LevelResult<()> {
    match value {
        Variant::Bool(b) => write!(out, "{b}")?,
        Variant::Int(i) => write!(out, "{i}")?,
        Variant::Float(f) => out.push_str(&float(*f)),
        Variant::String(s) => write!(out, "\"{}\"", escape(s))?,
        Variant::StringName(s) => write!(out, "&\"{}\"", escape(s))?,
        Variant::Vector2(v) => write!(out, "Vector2({}, {})", real(v.x), real(v.y))?,
        Variant::Color(c) => write!(
            out,
            "Color({:.3}, {:.3}, {:.3}, {})",
            c.r,
            c.g,
            c.b,
            real(c.a)
        )?,
        Variant::ExtResource(id) => write!(out, "ExtResource(\"{}\")", id.0)?,
        Variant::SubResource(id) => write!(out, "SubResource(\"{}\")", sub_key(doc, *id)?)?,
        Variant::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_variant(out, doc, item)?;
            }
            out.push(']');
        }
        Variant::Dictionary(entries) => {
            if entries.is_empty() {
                out.push_str("{}");
                return Ok(());
            }
            out.push_str("{\n");
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                write!(out, "\"{}\": ", escape(key))?;
                write_variant(out, doc, item)?;
            }
            out.push_str("\n}");
        }
    }
    Ok(())
}

fn sub_key(doc: &SceneDocument, id: ResourceId) -> LevelResult<String> {
    doc.sub_resource(id).map(|s| s.key()).ok_or_else(|| {
        LevelError::scene(format!("SubResource({}) names no declared sub-resource", id.0))
    })
}

/// Component inside a vector or color: integral values drop the fraction.
fn real(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v}")
}

/// Standalone float: always carries a fractional part.
fn float(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/render.rs"]
mod tests;
