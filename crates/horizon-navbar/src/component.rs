//! The component tree toolbar widgets are composed from.
//!
//! A [`ComponentTree`] is an arena of rectangular components linked into a
//! parent/child hierarchy. Each component carries size bounds, a stacking
//! orientation for its children, and an ordered list of handler bindings that
//! map an [`EventKind`] to a caller-defined handler tag.
//!
//! # Ownership
//!
//! A parent exclusively owns its children. [`ComponentTree::destroy`] removes
//! the whole subtree, children before parents, so no component ever outlives
//! the one containing it.
//!
//! # Layout
//!
//! [`ComponentTree::layout`] stacks children along the parent's orientation.
//! Children with a flex weight of zero take their minimum extent; the space
//! left over is shared between flex children by weight. A child is never
//! placed outside its parent's span: if fixed children overflow, the last
//! ones are shrunk, down to zero.
//!
//! # Example
//!
//! ```
//! use horizon_navbar::component::{ComponentTree, EventKind, Orientation, SizeBounds};
//! use horizon_navbar::render::Rect;
//!
//! let mut tree: ComponentTree<&'static str> = ComponentTree::new();
//! let bar = tree.create("bar", Orientation::Horizontal, SizeBounds::UNBOUNDED, 0);
//! let button = tree.create("button", Orientation::Horizontal, SizeBounds::fixed_width(32), 0);
//! let field = tree.create("field", Orientation::Horizontal, SizeBounds::UNBOUNDED, 1);
//! tree.attach(bar, button).unwrap();
//! tree.attach(bar, field).unwrap();
//! tree.bind(button, EventKind::Click, "back").unwrap();
//!
//! tree.layout(bar, Rect::new(0, 0, 200, 26)).unwrap();
//! assert_eq!(tree.rect(field).unwrap(), Rect::new(32, 0, 168, 26));
//! ```

use slotmap::{SlotMap, new_key_type};

use horizon_navbar_render::{Point, Rect};

use crate::error::{ToolbarError, ToolbarResult};

new_key_type! {
    /// A unique identifier for a component in a [`ComponentTree`].
    ///
    /// Ids stay valid while the tree changes around them and become invalid
    /// when the component is destroyed.
    pub struct ComponentId;
}

/// Direction in which a component stacks its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Children are placed left to right.
    #[default]
    Horizontal,
    /// Children are placed top to bottom.
    Vertical,
}

/// The kinds of events a component can have handlers bound for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The host asks for part of the component to be repainted.
    Redraw,
    /// A pointer button was pressed over the component.
    Click,
}

/// Minimum and maximum extents of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBounds {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
}

impl SizeBounds {
    /// No constraints.
    pub const UNBOUNDED: Self = Self {
        min_width: 0,
        min_height: 0,
        max_width: i32::MAX,
        max_height: i32::MAX,
    };

    /// Exactly `width` wide, any height.
    pub const fn fixed_width(width: i32) -> Self {
        Self {
            min_width: width,
            max_width: width,
            ..Self::UNBOUNDED
        }
    }

    /// Set the maximum height.
    pub const fn with_max_height(mut self, height: i32) -> Self {
        self.max_height = height;
        self
    }

    /// Set the minimum height.
    pub const fn with_min_height(mut self, height: i32) -> Self {
        self.min_height = height;
        self
    }

    fn min_along(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.min_width,
            Orientation::Vertical => self.min_height,
        }
    }

    fn max_along(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.max_width,
            Orientation::Vertical => self.max_height,
        }
    }

    fn max_across(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.max_height,
            Orientation::Vertical => self.max_width,
        }
    }
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// A handler bound to one event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<H> {
    pub kind: EventKind,
    pub handler: H,
}

/// Per-component data stored in the tree.
#[derive(Debug)]
struct ComponentData<H> {
    name: String,
    rect: Rect,
    bounds: SizeBounds,
    flex: u32,
    orientation: Orientation,
    parent: Option<ComponentId>,
    children: Vec<ComponentId>,
    bindings: Vec<Binding<H>>,
}

/// An arena of components forming one or more trees.
#[derive(Debug)]
pub struct ComponentTree<H> {
    components: SlotMap<ComponentId, ComponentData<H>>,
}

impl<H: Copy> ComponentTree<H> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            components: SlotMap::with_key(),
        }
    }

    /// Create a detached component and return its id.
    ///
    /// `flex` is the share of leftover space the component takes in its
    /// parent's layout; zero means it keeps its minimum extent.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        orientation: Orientation,
        bounds: SizeBounds,
        flex: u32,
    ) -> ComponentId {
        let name = name.into();
        let id = self.components.insert(ComponentData {
            name,
            rect: Rect::ZERO,
            bounds,
            flex,
            orientation,
            parent: None,
            children: Vec::new(),
            bindings: Vec::new(),
        });
        tracing::trace!(target: "horizon_navbar::component", ?id, "created component");
        id
    }

    /// Append `child` to `parent`'s children, detaching it from any previous
    /// parent.
    pub fn attach(&mut self, parent: ComponentId, child: ComponentId) -> ToolbarResult<()> {
        self.data(child)?;
        self.data(parent)?;
        if self.is_ancestor_of(child, parent) {
            return Err(ToolbarError::CircularParentage);
        }

        if let Some(old_parent) = self.components.get(child).and_then(|d| d.parent) {
            if let Some(old) = self.components.get_mut(old_parent) {
                old.children.retain(|&c| c != child);
            }
        }
        if let Some(data) = self.components.get_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = self.components.get_mut(parent) {
            data.children.push(child);
        }
        Ok(())
    }

    /// Add a handler binding. Bindings keep their insertion order.
    pub fn bind(&mut self, id: ComponentId, kind: EventKind, handler: H) -> ToolbarResult<()> {
        self.data_mut(id)?.bindings.push(Binding { kind, handler });
        Ok(())
    }

    /// Handlers bound to `kind` on `id`, in binding order.
    pub fn handlers(&self, id: ComponentId, kind: EventKind) -> ToolbarResult<Vec<H>> {
        Ok(self
            .data(id)?
            .bindings
            .iter()
            .filter(|b| b.kind == kind)
            .map(|b| b.handler)
            .collect())
    }

    /// All bindings of `id`.
    pub fn bindings(&self, id: ComponentId) -> ToolbarResult<&[Binding<H>]> {
        Ok(&self.data(id)?.bindings)
    }

    /// Remove a component and all its descendants.
    ///
    /// Descendants are removed depth-first, children before parents, and the
    /// component itself last.
    pub fn destroy(&mut self, id: ComponentId) -> ToolbarResult<()> {
        let descendants = self.depth_first_postorder(id)?;
        tracing::trace!(
            target: "horizon_navbar::component",
            ?id,
            descendant_count = descendants.len() - 1,
            "destroying component tree"
        );

        if let Some(parent) = self.components.get(id).and_then(|d| d.parent) {
            if let Some(parent_data) = self.components.get_mut(parent) {
                parent_data.children.retain(|&c| c != id);
            }
        }

        // Postorder ends with `id` itself.
        for component in descendants {
            self.components.remove(component);
        }
        Ok(())
    }

    /// Check if a component exists.
    #[inline]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(id)
    }

    /// Number of live components.
    #[inline]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn name(&self, id: ComponentId) -> ToolbarResult<&str> {
        Ok(&self.data(id)?.name)
    }

    pub fn parent(&self, id: ComponentId) -> ToolbarResult<Option<ComponentId>> {
        Ok(self.data(id)?.parent)
    }

    pub fn children(&self, id: ComponentId) -> ToolbarResult<&[ComponentId]> {
        Ok(&self.data(id)?.children)
    }

    /// The component's allocated rectangle in window coordinates.
    pub fn rect(&self, id: ComponentId) -> ToolbarResult<Rect> {
        Ok(self.data(id)?.rect)
    }

    pub fn bounds(&self, id: ComponentId) -> ToolbarResult<SizeBounds> {
        Ok(self.data(id)?.bounds)
    }

    /// Replace the size bounds. Takes effect on the next layout.
    pub fn set_bounds(&mut self, id: ComponentId, bounds: SizeBounds) -> ToolbarResult<()> {
        self.data_mut(id)?.bounds = bounds;
        Ok(())
    }

    /// Lay out the subtree rooted at `id` inside `area`.
    ///
    /// The root takes `area` limited by its own maximum extents.
    pub fn layout(&mut self, id: ComponentId, area: Rect) -> ToolbarResult<()> {
        let bounds = self.data(id)?.bounds;
        let rect = Rect::new(
            area.left(),
            area.top(),
            area.width().min(bounds.max_width).max(0),
            area.height().min(bounds.max_height).max(0),
        );
        self.place(id, rect)
    }

    fn place(&mut self, id: ComponentId, rect: Rect) -> ToolbarResult<()> {
        let (orientation, children) = {
            let data = self.data_mut(id)?;
            data.rect = rect;
            (data.orientation, data.children.clone())
        };
        if children.is_empty() {
            return Ok(());
        }

        let (span, cross) = match orientation {
            Orientation::Horizontal => (rect.width(), rect.height()),
            Orientation::Vertical => (rect.height(), rect.width()),
        };

        let mut fixed_total = 0i64;
        let mut flex_total = 0u64;
        for &child in &children {
            let data = self.data(child)?;
            if data.flex == 0 {
                fixed_total += i64::from(data.bounds.min_along(orientation).max(0));
            } else {
                flex_total += u64::from(data.flex);
            }
        }
        let leftover = (i64::from(span) - fixed_total).max(0);

        let mut cursor = 0i32;
        let mut flex_given = 0i64;
        let mut flex_seen = 0u64;
        let mut placements = Vec::with_capacity(children.len());
        for &child in &children {
            let data = self.data(child)?;
            let bounds = data.bounds;
            let wanted = if data.flex == 0 {
                bounds.min_along(orientation).max(0)
            } else {
                flex_seen += u64::from(data.flex);
                // The last flex child absorbs rounding.
                let share = if flex_seen == flex_total {
                    leftover - flex_given
                } else {
                    leftover * i64::from(data.flex) / flex_total as i64
                };
                flex_given += share;
                let share = i32::try_from(share).unwrap_or(i32::MAX);
                share
                    .min(bounds.max_along(orientation))
                    .max(bounds.min_along(orientation))
            };
            let extent = wanted.min(span - cursor).max(0);
            let across = cross.min(bounds.max_across(orientation)).max(0);
            let child_rect = match orientation {
                Orientation::Horizontal => {
                    Rect::new(rect.left() + cursor, rect.top(), extent, across)
                }
                Orientation::Vertical => Rect::new(rect.left(), rect.top() + cursor, across, extent),
            };
            cursor += extent;
            placements.push((child, child_rect));
        }

        for (child, child_rect) in placements {
            self.place(child, child_rect)?;
        }
        Ok(())
    }

    /// The deepest component under `point`, searching from `root`.
    ///
    /// Later siblings are treated as on top of earlier ones.
    pub fn hit_test(&self, root: ComponentId, point: Point) -> Option<ComponentId> {
        let data = self.components.get(root)?;
        if !data.rect.contains(point) {
            return None;
        }
        data.children
            .iter()
            .rev()
            .find_map(|&child| self.hit_test(child, point))
            .or(Some(root))
    }

    /// Components of the subtree whose rectangle overlaps `area`, children
    /// before parents.
    pub fn intersecting(&self, root: ComponentId, area: Rect) -> ToolbarResult<Vec<ComponentId>> {
        Ok(self
            .depth_first_postorder(root)?
            .into_iter()
            .filter(|&id| {
                self.components
                    .get(id)
                    .is_some_and(|d| d.rect.intersects(&area))
            })
            .collect())
    }

    /// Depth-first preorder traversal: the node, then each child subtree.
    pub fn depth_first_preorder(&self, id: ComponentId) -> ToolbarResult<Vec<ComponentId>> {
        let mut result = Vec::new();
        self.preorder_into(id, &mut result)?;
        Ok(result)
    }

    fn preorder_into(&self, id: ComponentId, result: &mut Vec<ComponentId>) -> ToolbarResult<()> {
        let data = self.data(id)?;
        result.push(id);
        for &child in &data.children {
            self.preorder_into(child, result)?;
        }
        Ok(())
    }

    /// Depth-first postorder traversal: each child subtree, then the node.
    pub fn depth_first_postorder(&self, id: ComponentId) -> ToolbarResult<Vec<ComponentId>> {
        let mut result = Vec::new();
        self.postorder_into(id, &mut result)?;
        Ok(result)
    }

    fn postorder_into(&self, id: ComponentId, result: &mut Vec<ComponentId>) -> ToolbarResult<()> {
        let data = self.data(id)?;
        for &child in &data.children {
            self.postorder_into(child, result)?;
        }
        result.push(id);
        Ok(())
    }

    fn is_ancestor_of(&self, potential_ancestor: ComponentId, id: ComponentId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.components.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    fn data(&self, id: ComponentId) -> ToolbarResult<&ComponentData<H>> {
        self.components
            .get(id)
            .ok_or(ToolbarError::InvalidComponent(id))
    }

    fn data_mut(&mut self, id: ComponentId) -> ToolbarResult<&mut ComponentData<H>> {
        self.components
            .get_mut(id)
            .ok_or(ToolbarError::InvalidComponent(id))
    }
}

impl<H: Copy> Default for ComponentTree<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tag {
        Bar,
        Button(usize),
        Field,
    }

    struct Fixture {
        tree: ComponentTree<Tag>,
        bar: ComponentId,
        buttons: Vec<ComponentId>,
        field: ComponentId,
        throbber: ComponentId,
    }

    fn setup() -> Fixture {
        let mut tree = ComponentTree::new();
        let bar = tree.create(
            "bar",
            Orientation::Horizontal,
            SizeBounds::UNBOUNDED.with_max_height(26),
            0,
        );
        tree.bind(bar, EventKind::Redraw, Tag::Bar).unwrap();

        let mut buttons = Vec::new();
        for i in 0..3 {
            let b = tree.create(
                format!("button{i}"),
                Orientation::Horizontal,
                SizeBounds::fixed_width(32),
                0,
            );
            tree.attach(bar, b).unwrap();
            tree.bind(b, EventKind::Redraw, Tag::Button(i)).unwrap();
            tree.bind(b, EventKind::Click, Tag::Button(i)).unwrap();
            buttons.push(b);
        }
        let field = tree.create("field", Orientation::Horizontal, SizeBounds::UNBOUNDED, 1);
        tree.attach(bar, field).unwrap();
        tree.bind(field, EventKind::Click, Tag::Field).unwrap();
        let throbber = tree.create(
            "throbber",
            Orientation::Horizontal,
            SizeBounds::fixed_width(32),
            0,
        );
        tree.attach(bar, throbber).unwrap();

        Fixture {
            tree,
            bar,
            buttons,
            field,
            throbber,
        }
    }

    #[test]
    fn test_horizontal_layout() {
        let mut f = setup();
        f.tree.layout(f.bar, Rect::new(0, 10, 400, 100)).unwrap();

        assert_eq!(f.tree.rect(f.bar).unwrap(), Rect::new(0, 10, 400, 26));
        assert_eq!(f.tree.rect(f.buttons[0]).unwrap(), Rect::new(0, 10, 32, 26));
        assert_eq!(f.tree.rect(f.buttons[2]).unwrap(), Rect::new(64, 10, 32, 26));
        assert_eq!(f.tree.rect(f.field).unwrap(), Rect::new(96, 10, 272, 26));
        assert_eq!(f.tree.rect(f.throbber).unwrap(), Rect::new(368, 10, 32, 26));
    }

    #[test]
    fn test_children_stay_inside_parent() {
        let mut f = setup();
        // Too narrow for the fixed children.
        f.tree.layout(f.bar, Rect::new(5, 0, 70, 26)).unwrap();
        let bar = f.tree.rect(f.bar).unwrap();
        for &child in f.tree.children(f.bar).unwrap() {
            let r = f.tree.rect(child).unwrap();
            assert!(r.left() >= bar.left() && r.right() <= bar.right(), "{r:?}");
        }
        assert_eq!(f.tree.rect(f.buttons[2]).unwrap().width(), 6);
        assert_eq!(f.tree.rect(f.field).unwrap().width(), 0);
    }

    #[test]
    fn test_collapsed_height() {
        let mut f = setup();
        f.tree
            .set_bounds(f.bar, SizeBounds::UNBOUNDED.with_max_height(0))
            .unwrap();
        f.tree.layout(f.bar, Rect::new(0, 0, 400, 26)).unwrap();
        assert_eq!(f.tree.rect(f.bar).unwrap().height(), 0);
        assert_eq!(f.tree.rect(f.field).unwrap().height(), 0);
    }

    #[test]
    fn test_vertical_layout() {
        let mut tree: ComponentTree<Tag> = ComponentTree::new();
        let column = tree.create("column", Orientation::Vertical, SizeBounds::UNBOUNDED, 0);
        let top = tree.create(
            "top",
            Orientation::Horizontal,
            SizeBounds::UNBOUNDED.with_min_height(20),
            0,
        );
        let rest = tree.create("rest", Orientation::Horizontal, SizeBounds::UNBOUNDED, 1);
        tree.attach(column, top).unwrap();
        tree.attach(column, rest).unwrap();

        tree.layout(column, Rect::new(0, 0, 100, 300)).unwrap();
        assert_eq!(tree.rect(top).unwrap(), Rect::new(0, 0, 100, 20));
        assert_eq!(tree.rect(rest).unwrap(), Rect::new(0, 20, 100, 280));
    }

    #[test]
    fn test_handlers_keep_order() {
        let mut f = setup();
        f.tree.bind(f.field, EventKind::Click, Tag::Bar).unwrap();
        assert_eq!(
            f.tree.handlers(f.field, EventKind::Click).unwrap(),
            vec![Tag::Field, Tag::Bar]
        );
        assert!(f.tree.handlers(f.field, EventKind::Redraw).unwrap().is_empty());
    }

    #[test]
    fn test_hit_test_finds_deepest() {
        let mut f = setup();
        f.tree.layout(f.bar, Rect::new(0, 0, 400, 26)).unwrap();
        assert_eq!(f.tree.hit_test(f.bar, Point::new(40, 5)), Some(f.buttons[1]));
        assert_eq!(f.tree.hit_test(f.bar, Point::new(200, 5)), Some(f.field));
        assert_eq!(f.tree.hit_test(f.bar, Point::new(200, 30)), None);
    }

    #[test]
    fn test_intersecting_children_first() {
        let mut f = setup();
        f.tree.layout(f.bar, Rect::new(0, 0, 400, 26)).unwrap();
        let hits = f.tree.intersecting(f.bar, Rect::new(40, 0, 30, 5)).unwrap();
        assert_eq!(hits, vec![f.buttons[1], f.buttons[2], f.bar]);
    }

    #[test]
    fn test_destroy_cascades() {
        let mut f = setup();
        assert_eq!(f.tree.len(), 6);
        f.tree.destroy(f.bar).unwrap();
        assert!(f.tree.is_empty());
        assert!(!f.tree.contains(f.field));
        assert!(matches!(
            f.tree.rect(f.field),
            Err(ToolbarError::InvalidComponent(_))
        ));
    }

    #[test]
    fn test_destroy_child_detaches() {
        let mut f = setup();
        f.tree.destroy(f.buttons[0]).unwrap();
        assert_eq!(f.tree.children(f.bar).unwrap().len(), 4);
        assert!(f.tree.contains(f.bar));
    }

    #[test]
    fn test_circular_parentage_rejected() {
        let mut f = setup();
        assert!(matches!(
            f.tree.attach(f.field, f.bar),
            Err(ToolbarError::CircularParentage)
        ));
        assert!(matches!(
            f.tree.attach(f.bar, f.bar),
            Err(ToolbarError::CircularParentage)
        ));
    }

    #[test]
    fn test_reattach_moves_child() {
        let mut f = setup();
        f.tree.attach(f.field, f.throbber).unwrap();
        assert_eq!(f.tree.parent(f.throbber).unwrap(), Some(f.field));
        assert_eq!(f.tree.children(f.bar).unwrap().len(), 4);
        assert_eq!(f.tree.name(f.throbber).unwrap(), "throbber");
    }
}
