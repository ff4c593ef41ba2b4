use std::collections::BTreeSet;

use crate::{
    foundation::color::ColorF,
    foundation::core::{Point, Vec2},
    foundation::error::{LevelError, LevelResult},
};

/// Reference id shared by external and sub-resources of one document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(pub u32);

#[derive(Clone, Debug, PartialEq)]
/// A file the scene depends on (`[ext_resource]`).
pub struct ExtResource {
    pub id: ResourceId,
    /// Engine resource type, e.g. `PackedScene`.
    pub kind: String,
    pub path: String,
    pub uid: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
/// A resource embedded in the scene (`[sub_resource]`).
pub struct SubResource {
    pub id: ResourceId,
    pub kind: String,
    pub properties: Vec<(String, Variant)>,
}

impl SubResource {
    /// Textual id, e.g. `SpriteFrames_8`.
    pub fn key(&self) -> String {
        format!("{}_{}", self.kind, self.id.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Built-in engine node type.
    Typed(String),
    /// Instance of a `PackedScene` external resource.
    Instance(ResourceId),
    /// Property overrides for a node that already exists inside an instance.
    Override,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    /// `None` for the root, `"."` for root children, otherwise a node path.
    pub parent: Option<String>,
    pub properties: Vec<(String, Variant)>,
}

impl SceneNode {
    pub fn typed(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Typed(ty.into()))
    }

    pub fn instance(name: impl Into<String>, scene: ResourceId) -> Self {
        Self::new(name, NodeKind::Instance(scene))
    }

    pub fn override_of(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Override)
    }

    fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            properties: Vec::new(),
        }
    }

    pub fn under(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Variant>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Path other nodes use to name this node as their parent.
    pub fn path(&self) -> String {
        match self.parent.as_deref() {
            None => ".".to_owned(),
            Some(".") => self.name.clone(),
            Some(parent) => format!("{parent}/{}", self.name),
        }
    }

    pub fn property(&self, key: &str) -> Option<&Variant> {
        lookup(&self.properties, key)
    }
}

fn lookup<'a>(props: &'a [(String, Variant)], key: &str) -> Option<&'a Variant> {
    props.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

/// Typed property value.
#[derive(Clone, Debug, PartialEq)]
pub enum Variant {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Interned engine string, rendered as `&"name"`.
    StringName(String),
    Vector2(Vec2),
    Color(ColorF),
    ExtResource(ResourceId),
    SubResource(ResourceId),
    Array(Vec<Variant>),
    Dictionary(Vec<(String, Variant)>),
}

impl Variant {
    pub fn string_name(s: impl Into<String>) -> Self {
        Self::StringName(s.into())
    }

    pub fn vector2(x: f64, y: f64) -> Self {
        Self::Vector2(Vec2::new(x, y))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(s) | Variant::StringName(s) => Some(s),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Variant> {
        match self {
            Variant::Dictionary(entries) => lookup(entries, key),
            _ => None,
        }
    }

    fn collect_refs(&self, out: &mut Vec<ResourceRef>) {
        match self {
            Variant::ExtResource(id) => out.push(ResourceRef::Ext(*id)),
            Variant::SubResource(id) => out.push(ResourceRef::Sub(*id)),
            Variant::Array(items) => items.iter().for_each(|v| v.collect_refs(out)),
            Variant::Dictionary(entries) => entries.iter().for_each(|(_, v)| v.collect_refs(out)),
            _ => {}
        }
    }
}

impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Variant::Bool(v)
    }
}

impl From<i64> for Variant {
    fn from(v: i64) -> Self {
        Variant::Int(v)
    }
}

impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Variant::Float(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Variant::String(v.to_owned())
    }
}

impl From<String> for Variant {
    fn from(v: String) -> Self {
        Variant::String(v)
    }
}

impl From<Point> for Variant {
    fn from(p: Point) -> Self {
        Variant::Vector2(p.to_vec2())
    }
}

impl From<Vec2> for Variant {
    fn from(v: Vec2) -> Self {
        Variant::Vector2(v)
    }
}

impl From<ColorF> for Variant {
    fn from(c: ColorF) -> Self {
        Variant::Color(c)
    }
}

/// In-memory scene: resource declarations plus the node tree.
///
/// Ids are handed out by [`SceneDocument::add_ext_resource`] and
/// [`SceneDocument::add_sub_resource`] from one counter starting at 1, so the
/// document decides numbering and callers only keep the returned ids.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneDocument {
    /// Unique scene identifier written to the header.
    pub uid: String,
    pub ext_resources: Vec<ExtResource>,
    pub sub_resources: Vec<SubResource>,
    pub nodes: Vec<SceneNode>,
}

impl SceneDocument {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ext_resources: Vec::new(),
            sub_resources: Vec::new(),
            nodes: Vec::new(),
        }
    }

    fn next_id(&self) -> ResourceId {
        let max = self
            .ext_resources
            .iter()
            .map(|r| r.id.0)
            .chain(self.sub_resources.iter().map(|r| r.id.0))
            .max()
            .unwrap_or(0);
        ResourceId(max + 1)
    }

    pub fn add_ext_resource(
        &mut self,
        kind: impl Into<String>,
        path: impl Into<String>,
        uid: Option<String>,
    ) -> ResourceId {
        let id = self.next_id();
        self.ext_resources.push(ExtResource {
            id,
            kind: kind.into(),
            path: path.into(),
            uid,
        });
        id
    }

    pub fn add_sub_resource(
        &mut self,
        kind: impl Into<String>,
        properties: Vec<(String, Variant)>,
    ) -> ResourceId {
        let id = self.next_id();
        self.sub_resources.push(SubResource {
            id,
            kind: kind.into(),
            properties,
        });
        id
    }

    pub fn add_node(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    /// Number of declared resources, written as the header's `load_steps`.
    pub fn load_steps(&self) -> usize {
        self.ext_resources.len() + self.sub_resources.len()
    }

    pub fn ext_resource(&self, id: ResourceId) -> Option<&ExtResource> {
        self.ext_resources.iter().find(|r| r.id == id)
    }

    pub fn ext_resource_by_path(&self, path: &str) -> Option<&ExtResource> {
        self.ext_resources.iter().find(|r| r.path == path)
    }

    pub fn sub_resource(&self, id: ResourceId) -> Option<&SubResource> {
        self.sub_resources.iter().find(|r| r.id == id)
    }

    /// Looks a node up by its path (`"."` is the root).
    pub fn node(&self, path: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.path() == path)
    }

    /// Checks the reference graph.
    ///
    /// Ids are unique across both resource tables. `ExtResource` references
    /// must name an external resource and `SubResource` references a
    /// sub-resource declared before the referencing entry (external resources
    /// precede sub-resources, which precede nodes). Instances must name a
    /// `PackedScene`. Every node parent must be a node declared earlier, and
    /// exactly one root node must come first.
    pub fn validate(&self) -> LevelResult<()> {
        let mut ids = BTreeSet::<ResourceId>::new();
        let mut ext = BTreeSet::<ResourceId>::new();
        for r in &self.ext_resources {
            if !ids.insert(r.id) {
                return Err(LevelError::scene(format!(
                    "duplicate resource id {} ('{}')",
                    r.id.0, r.path
                )));
            }
            ext.insert(r.id);
        }

        let mut sub = BTreeSet::<ResourceId>::new();
        let mut refs = Vec::new();
        for res in &self.sub_resources {
            refs.clear();
            res.properties.iter().for_each(|(_, v)| v.collect_refs(&mut refs));
            check_refs(&ext, &sub, &refs, &res.key())?;
            if !ids.insert(res.id) {
                return Err(LevelError::scene(format!(
                    "duplicate resource id {} ('{}')",
                    res.id.0,
                    res.key()
                )));
            }
            sub.insert(res.id);
        }

        let mut paths = BTreeSet::<String>::new();
        for (idx, node) in self.nodes.iter().enumerate() {
            match (&node.parent, idx) {
                (None, 0) => {}
                (None, _) => {
                    return Err(LevelError::scene(format!(
                        "node '{}' has no parent but is not the root",
                        node.name
                    )));
                }
                (Some(_), 0) => {
                    return Err(LevelError::scene("first node must be the scene root"));
                }
                (Some(parent), _) => {
                    if parent != "." && !paths.contains(parent) {
                        return Err(LevelError::scene(format!(
                            "node '{}' references unknown parent '{parent}'",
                            node.name
                        )));
                    }
                }
            }
            if !paths.insert(node.path()) {
                return Err(LevelError::scene(format!(
                    "duplicate node path '{}'",
                    node.path()
                )));
            }

            if let NodeKind::Instance(id) = node.kind {
                match self.ext_resource(id) {
                    Some(r) if r.kind == "PackedScene" => {}
                    Some(r) => {
                        return Err(LevelError::scene(format!(
                            "node '{}' instances {} resource {}, expected PackedScene",
                            node.name, r.kind, id.0
                        )));
                    }
                    None => {
                        return Err(LevelError::scene(format!(
                            "'{}' references undeclared ExtResource id {}",
                            node.name, id.0
                        )));
                    }
                }
            }
            refs.clear();
            node.properties.iter().for_each(|(_, v)| v.collect_refs(&mut refs));
            check_refs(&ext, &sub, &refs, &node.name)?;
        }
        Ok(())
    }
}

/// Reference found inside a property value, tagged with the table it targets.
#[derive(Clone, Copy, Debug)]
enum ResourceRef {
    Ext(ResourceId),
    Sub(ResourceId),
}

fn check_refs(
    ext: &BTreeSet<ResourceId>,
    sub: &BTreeSet<ResourceId>,
    refs: &[ResourceRef],
    owner: &str,
) -> LevelResult<()> {
    for r in refs {
        let (table, declared, id) = match *r {
            ResourceRef::Ext(id) => ("ExtResource", ext, id),
            ResourceRef::Sub(id) => ("SubResource", sub, id),
        };
        if !declared.contains(&id) {
            return Err(LevelError::scene(format!(
                "'{owner}' references undeclared {table} id {}",
                id.0
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
