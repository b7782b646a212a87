// crates/lattice-layout/src/engine.rs
//! Box-model reflow.
//!
//! Each widget is resolved width first, then its children against its
//! content box, then height. A widget whose size derives from its children
//! (`ContentFit`) gets its children laid out against a provisional block
//! before its own width is known. `auto` margins count as zero in that
//! measuring pass.

use crate::{
    align_offset, effective_resizer, justify, Axis, FlexLines, FlowCursor, LayoutEngine, Measure,
    MeasureInput, ReflowStats, SizeConstraint,
};
use glam::Vec2;
use lattice_core::{
    AlignItems, BoxModel, BoxSizing, ComputedStyle, ContainingBlock, DirtyFlags, Display,
    FlexDirection, FlexStyle, IntrinsicSize, LayoutDimension, LayoutState, Metrics, NoResources,
    NodeId, Position, Resizer, Sides, WidgetTree,
};
use tracing::{debug, trace, warn};

pub struct ReflowEngine {
    metrics: Metrics,
    resources: Box<dyn IntrinsicSize>,
    debug: bool,
    stats: ReflowStats,
    resolved: Vec<NodeId>,
}

impl Default for ReflowEngine {
    fn default() -> Self {
        Self::new(Metrics::default())
    }
}

impl std::fmt::Debug for ReflowEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReflowEngine")
            .field("metrics", &self.metrics)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl ReflowEngine {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            metrics,
            resources: Box::new(NoResources),
            debug: false,
            stats: ReflowStats::default(),
            resolved: Vec::new(),
        }
    }

    pub fn with_resources(mut self, resources: impl IntrinsicSize + 'static) -> Self {
        self.resources = Box::new(resources);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

impl LayoutEngine for ReflowEngine {
    fn reflow(&mut self, tree: &mut WidgetTree, node: NodeId, block: ContainingBlock) -> ReflowStats {
        self.stats = ReflowStats::default();
        self.resolved.clear();

        tree.traverse(|tree| self.layout_node(tree, node, block));

        for id in self.resolved.drain(..) {
            if let Some(node) = tree.get_mut(id) {
                node.layout_state = LayoutState::Clean;
            }
        }
        if self.debug {
            debug!(
                "Reflow of {}: {} resolved, {} skipped",
                node, self.stats.resolved, self.stats.skipped
            );
        }
        self.stats
    }
}

impl ReflowEngine {
    fn layout_node(&mut self, tree: &mut WidgetTree, id: NodeId, block: ContainingBlock) {
        let Some(node) = tree.get(id) else {
            return;
        };
        if !node.dirty.needs_layout() && node.cached_block == Some(block) {
            trace!("Skipping clean subtree {}", id);
            self.stats.skipped += 1;
            return;
        }

        let style = ComputedStyle::compute(node.style(), &self.metrics);
        let tag = node.resizer;
        let origin = node.layout.margin.position();

        if style.display == Display::None {
            let hidden = BoxModel::default().moved_to(origin);
            self.finish_node(tree, id, hidden, block);
            return;
        }

        set_state(tree, id, LayoutState::ResolvingWidth);
        let intrinsic = if tag == Resizer::Replaced {
            self.intrinsic_size(tree, id)
        } else {
            Vec2::ZERO
        };

        // Percentages on every edge resolve against the block's width.
        let padding = style.padding.map(|d| d.to_pixels_or_zero(block.width).max(0.0));
        let border = style.border_width.map(|d| d.to_pixels_or_zero(block.width).max(0.0));
        let mut margin = style.margin.map(|d| d.to_pixels_or_zero(block.width));
        let frame = padding + border;
        let border_box = style.box_sizing == BoxSizing::BorderBox;

        let mut width_resizer = effective_resizer(tag, &style.width);
        let mut height_resizer = effective_resizer(tag, &style.height);
        if tag != Resizer::Replaced {
            if block.stretch_width && style.width == LayoutDimension::Auto {
                width_resizer = Resizer::Stretch;
            }
            if block.stretch_height && style.height == LayoutDimension::Auto {
                height_resizer = Resizer::Stretch;
            }
        }
        let width_limits = SizeConstraint::resolve(
            style.min_width,
            style.max_width,
            Some(block.width),
            frame.horizontal(),
            border_box,
        );
        let height_limits = SizeConstraint::resolve(
            style.min_height,
            style.max_height,
            block.definite_height(),
            frame.vertical(),
            border_box,
        );

        let mut width_input = MeasureInput {
            specified: style.width.to_pixels(Some(block.width)),
            available: Some(block.width),
            margin: margin.horizontal(),
            frame: frame.horizontal(),
            border_box,
            content_extent: None,
            intrinsic,
            cross_fixed: None,
        };
        let mut height_input = MeasureInput {
            specified: style.height.to_pixels(block.definite_height()),
            available: block.available_height(),
            margin: margin.vertical(),
            frame: frame.vertical(),
            border_box,
            content_extent: None,
            intrinsic,
            cross_fixed: None,
        };
        width_input.cross_fixed = Resizer::Fixed.measure(Axis::Vertical, &height_input);
        height_input.cross_fixed = Resizer::Fixed.measure(Axis::Horizontal, &width_input);

        // Anything but ContentFit knows its height before the children do.
        let known_height = height_resizer
            .measure(Axis::Vertical, &height_input)
            .map(|h| height_limits.constrain(h));

        let width = match width_resizer.measure(Axis::Horizontal, &width_input) {
            Some(width) => width,
            None => {
                let provisional = width_limits
                    .constrain(block.width - margin.horizontal() - frame.horizontal());
                let extent = self.layout_children(tree, id, &style, provisional, known_height, true);
                width_input.content_extent = Some(extent.x);
                Resizer::ContentFit
                    .measure(Axis::Horizontal, &width_input)
                    .unwrap_or(0.0)
            }
        };
        let width = width_limits.constrain(width);

        set_state(tree, id, LayoutState::ResolvingHeight);
        let extent = self.layout_children(tree, id, &style, width, known_height, false);
        let height = match known_height {
            Some(height) => height,
            None => {
                height_input.content_extent = Some(extent.y);
                height_limits.constrain(
                    Resizer::ContentFit
                        .measure(Axis::Vertical, &height_input)
                        .unwrap_or(0.0),
                )
            }
        };

        let block_level = matches!(style.display, Display::Block | Display::Flex);
        if block_level && !style.is_absolute() && block.auto_margins {
            center_block(&style, &mut margin, block.width - width - frame.horizontal());
        }

        let boxes =
            BoxModel::from_content(Vec2::new(width, height), padding, border, margin).moved_to(origin);
        self.finish_node(tree, id, boxes, block);
    }

    /// Lays out and places the children of `id` inside a content box of
    /// `width` (and `height`, when definite). Returns the extent of the
    /// in-flow margin boxes.
    ///
    /// `measuring` is set for the provisional pass of a `ContentFit` parent.
    fn layout_children(
        &mut self,
        tree: &mut WidgetTree,
        id: NodeId,
        style: &ComputedStyle,
        width: f32,
        height: Option<f32>,
        measuring: bool,
    ) -> Vec2 {
        if style.display == Display::Flex {
            return self.layout_flex(tree, id, style.flex, width, height, measuring);
        }

        let children = tree.children(id).to_vec();
        let mut flow = FlowCursor::new(width);
        let mut content_block = ContainingBlock::new(width, height);
        if measuring {
            content_block = content_block.without_auto_margins();
        }

        for child in children {
            let Some(node) = tree.get(child) else {
                continue;
            };
            let style = ComputedStyle::compute(node.style(), &self.metrics);

            let origin = if style.is_absolute() {
                self.layout_node(tree, child, content_block);
                Vec2::new(
                    style.left.to_pixels_or_zero(width),
                    style.top.to_pixels(height).unwrap_or(0.0),
                )
            } else {
                match style.display {
                    Display::None => {
                        self.layout_node(tree, child, content_block);
                        flow.position()
                    }
                    Display::InlineBlock => {
                        let block = flow_block(&style, content_block, flow.offset());
                        self.layout_node(tree, child, block);
                        flow.place_inline(margin_size(tree, child))
                    }
                    Display::Block | Display::Flex => {
                        flow.flush_row();
                        let block = flow_block(&style, content_block, flow.offset());
                        self.layout_node(tree, child, block);
                        flow.place_block(margin_size(tree, child))
                    }
                }
            };
            place(tree, child, origin + relative_offset(&style, width, height));
            debug_assert_resolved(tree, child);
        }
        flow.finish()
    }

    /// Places in-flow children in flex lines along `flex.direction`.
    ///
    /// Items are first laid out at their own size. Lines are then filled
    /// in document order, free main-axis space goes to `auto` margins or,
    /// without any, to `justify-content`, and items are aligned across
    /// each line. Returns the natural extent of the lines, before any free
    /// space is handed out.
    fn layout_flex(
        &mut self,
        tree: &mut WidgetTree,
        id: NodeId,
        flex: FlexStyle,
        width: f32,
        height: Option<f32>,
        measuring: bool,
    ) -> Vec2 {
        let row = flex.direction == FlexDirection::Row;
        let content_block = ContainingBlock::new(width, height).without_auto_margins();
        let children = tree.children(id).to_vec();

        let mut items = Vec::new();
        let mut lines = FlexLines::new(if row { Some(width) } else { height }, flex.wrap);
        for child in children {
            let Some(node) = tree.get(child) else {
                continue;
            };
            let style = ComputedStyle::compute(node.style(), &self.metrics);
            self.layout_node(tree, child, content_block);

            if style.is_absolute() {
                let origin = Vec2::new(
                    style.left.to_pixels_or_zero(width),
                    style.top.to_pixels(height).unwrap_or(0.0),
                );
                place(tree, child, origin);
                continue;
            }
            if style.display == Display::None {
                place(tree, child, Vec2::ZERO);
                continue;
            }

            let size = tree
                .get(child)
                .map(|node| with_auto_margins(node.layout, &style, row, 0.0).margin.size())
                .unwrap_or(Vec2::ZERO);
            let (main, cross) = split(size, row);
            lines.push(items.len(), main, cross);
            items.push((child, style));
        }

        let main_extent = lines.main_extent();
        let cross_extent = lines.cross_extent();
        let main_size = if row { width } else { height.unwrap_or(main_extent) };
        let cross_size = if row { height.unwrap_or(cross_extent) } else { width };
        let line_count = lines.lines().len().max(1) as f32;
        let extra_cross = (cross_size - cross_extent).max(0.0) / line_count;

        let mut cross_pos = 0.0;
        for line in lines.lines() {
            let line_cross = line.cross + extra_cross;
            let free = main_size - line.main;
            let auto_sides: usize = line
                .items
                .iter()
                .map(|&index| {
                    let (lead, trail) = auto_main_margins(&items[index].1, row);
                    lead as usize + trail as usize
                })
                .sum();
            let (start, gap, share) = if free > 0.0 && auto_sides > 0 {
                (0.0, 0.0, free / auto_sides as f32)
            } else {
                let (start, gap) = justify(flex.justify_content, free, line.items.len());
                (start, gap, 0.0)
            };

            let mut main_pos = start;
            for &index in &line.items {
                let (child, style) = &items[index];
                let stretches = if row {
                    style.height == LayoutDimension::Auto
                } else {
                    style.width == LayoutDimension::Auto
                };
                if flex.align_items == AlignItems::Stretch && stretches && !measuring {
                    let block = if row {
                        ContainingBlock::new(width, Some(line_cross)).stretched(false, true)
                    } else {
                        ContainingBlock::new(line_cross, height).stretched(true, false)
                    };
                    self.layout_node(tree, *child, block.without_auto_margins());
                }

                update_box(tree, *child, |boxes| with_auto_margins(boxes, style, row, share));
                let (item_main, item_cross) = split(margin_size(tree, *child), row);
                let cross_offset = cross_pos + align_offset(flex.align_items, line_cross, item_cross);
                let origin = if row {
                    Vec2::new(main_pos, cross_offset)
                } else {
                    Vec2::new(cross_offset, main_pos)
                };
                place(tree, *child, origin + relative_offset(style, width, height));
                debug_assert_resolved(tree, *child);
                main_pos += item_main + gap;
            }
            cross_pos += line_cross;
        }

        if row {
            Vec2::new(main_extent, cross_extent)
        } else {
            Vec2::new(cross_extent, main_extent)
        }
    }

    fn finish_node(&mut self, tree: &mut WidgetTree, id: NodeId, boxes: BoxModel, block: ContainingBlock) {
        let Some(node) = tree.get_mut(id) else {
            return;
        };
        if node.layout != boxes {
            node.dirty |= DirtyFlags::REPAINT;
        }
        node.layout = boxes;
        node.dirty.remove(DirtyFlags::REFLOW | DirtyFlags::CHILD_REFLOW);
        node.cached_block = Some(block);
        node.layout_state = LayoutState::Resolved;

        if self.debug {
            debug!(
                "Resolved {} content {:?} at {:?}",
                node.label(),
                boxes.content.size(),
                boxes.content.position()
            );
        }
        self.resolved.push(id);
        self.stats.resolved += 1;
    }

    fn intrinsic_size(&self, tree: &mut WidgetTree, id: NodeId) -> Vec2 {
        let Some(node) = tree.get_mut(id) else {
            return Vec2::ZERO;
        };
        if let Some(size) = node.intrinsic_size {
            return size;
        }
        let Some(key) = node.resource.as_deref() else {
            return Vec2::ZERO;
        };
        match self.resources.intrinsic_size(key) {
            Some(size) => {
                node.intrinsic_size = Some(size);
                size
            }
            None => {
                warn!("No intrinsic size for resource {:?}, using 0x0", key);
                Vec2::ZERO
            }
        }
    }
}

fn set_state(tree: &mut WidgetTree, id: NodeId, state: LayoutState) {
    if let Some(node) = tree.get_mut(id) {
        node.layout_state = state;
    }
}

fn margin_size(tree: &WidgetTree, id: NodeId) -> Vec2 {
    tree.get(id)
        .map(|node| node.layout.margin.size())
        .unwrap_or(Vec2::ZERO)
}

fn place(tree: &mut WidgetTree, id: NodeId, origin: Vec2) {
    update_box(tree, id, |boxes| boxes.moved_to(origin));
}

fn update_box(tree: &mut WidgetTree, id: NodeId, f: impl FnOnce(BoxModel) -> BoxModel) {
    if let Some(node) = tree.get_mut(id) {
        let updated = f(node.layout);
        if updated != node.layout {
            node.layout = updated;
            node.dirty |= DirtyFlags::REPAINT;
        }
    }
}

fn relative_offset(style: &ComputedStyle, width: f32, height: Option<f32>) -> Vec2 {
    if style.position == Position::Relative {
        Vec2::new(
            style.left.to_pixels_or_zero(width),
            style.top.to_pixels(height).unwrap_or(0.0),
        )
    } else {
        Vec2::ZERO
    }
}

fn debug_assert_resolved(tree: &WidgetTree, child: NodeId) {
    debug_assert!(
        tree.get(child).map_or(true, |node| matches!(
            node.layout_state,
            LayoutState::Resolved | LayoutState::Clean
        )),
        "child {} read before it was resolved",
        child
    );
}

/// (main, cross) components of `size`.
fn split(size: Vec2, row: bool) -> (f32, f32) {
    if row {
        (size.x, size.y)
    } else {
        (size.y, size.x)
    }
}

fn auto_main_margins(style: &ComputedStyle, row: bool) -> (bool, bool) {
    if row {
        style.auto_inline_margins()
    } else {
        style.auto_block_margins()
    }
}

/// Sets every `auto` main-axis margin of a flex item to `share`.
fn with_auto_margins(boxes: BoxModel, style: &ComputedStyle, row: bool, share: f32) -> BoxModel {
    let (lead, trail) = auto_main_margins(style, row);
    if !lead && !trail {
        return boxes;
    }
    let mut margin = boxes.margins();
    let (start, end) = if row {
        (&mut margin.left, &mut margin.right)
    } else {
        (&mut margin.top, &mut margin.bottom)
    };
    if lead {
        *start = share;
    }
    if trail {
        *end = share;
    }
    boxes.with_margins(margin)
}

/// Only stretching children see the space left below their previous
/// siblings, so the others keep a stable cached block when siblings resize.
fn flow_block(style: &ComputedStyle, block: ContainingBlock, used: f32) -> ContainingBlock {
    if style.height == LayoutDimension::Stretch {
        block.with_available_height(block.height - used)
    } else {
        block
    }
}

/// Splits `free` horizontal space between `auto` margins.
fn center_block(style: &ComputedStyle, margin: &mut Sides<f32>, free: f32) {
    match style.auto_inline_margins() {
        (true, true) => {
            let side = (free / 2.0).max(0.0);
            margin.left = side;
            margin.right = side;
        }
        (true, false) => margin.left = (free - margin.right).max(0.0),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::{ResourceManager, WidgetKind};

    fn engine() -> ReflowEngine {
        ReflowEngine::new(Metrics::default())
    }

    fn child_of(tree: &mut WidgetTree, parent: NodeId, styles: &[(&str, &str)]) -> NodeId {
        let child = tree.create(WidgetKind::Container);
        tree.append(parent, child).unwrap();
        for (name, value) in styles {
            tree.set_style_str(child, name, value).unwrap();
        }
        child
    }

    #[test]
    fn test_percentage_width() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let child = child_of(&mut tree, root, &[("width", "50%")]);
        engine().reflow_root(&mut tree, Vec2::new(200.0, 100.0));
        assert_eq!(tree.computed_box(child).unwrap().content.width, 100.0);
    }

    #[test]
    fn test_root_stretches_to_viewport() {
        let mut tree = WidgetTree::new();
        engine().reflow_root(&mut tree, Vec2::new(300.0, 100.0));
        let boxes = tree.computed_box(tree.root()).unwrap();
        assert_eq!(boxes.margin.size(), Vec2::new(300.0, 100.0));
    }

    #[test]
    fn test_content_fit_includes_frame() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let parent = child_of(&mut tree, root, &[("padding-left", "5px"), ("padding-top", "5px"), ("border-top-width", "2px")]);
        child_of(&mut tree, parent, &[("width", "100px"), ("height", "30px"), ("margin-bottom", "10px")]);
        child_of(&mut tree, parent, &[("width", "60px"), ("height", "20px")]);

        engine().reflow_root(&mut tree, Vec2::new(300.0, 300.0));
        let boxes = tree.computed_box(parent).unwrap();
        assert_eq!(boxes.content.size(), Vec2::new(100.0, 60.0));
        assert_eq!(boxes.border.size(), Vec2::new(105.0, 67.0));
    }

    #[test]
    fn test_border_box_sizing() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let child = child_of(
            &mut tree,
            root,
            &[("box-sizing", "border-box"), ("width", "100px"), ("padding-left", "10px"), ("border-left-width", "5px")],
        );
        engine().reflow_root(&mut tree, Vec2::new(300.0, 300.0));
        let boxes = tree.computed_box(child).unwrap();
        assert_eq!(boxes.border.width, 100.0);
        assert_eq!(boxes.content.width, 85.0);
    }

    #[test]
    fn test_min_max_limits() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let narrow = child_of(&mut tree, root, &[("width", "10px"), ("min-width", "40px")]);
        let wide = child_of(&mut tree, root, &[("width", "stretch"), ("max-width", "50%")]);
        engine().reflow_root(&mut tree, Vec2::new(300.0, 300.0));
        assert_eq!(tree.computed_box(narrow).unwrap().content.width, 40.0);
        assert_eq!(tree.computed_box(wide).unwrap().content.width, 150.0);
    }

    #[test]
    fn test_stretch_height_uses_remaining_space() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        child_of(&mut tree, root, &[("height", "30px")]);
        let filler = child_of(&mut tree, root, &[("height", "stretch"), ("width", "stretch")]);
        engine().reflow_root(&mut tree, Vec2::new(200.0, 100.0));
        let boxes = tree.computed_box(filler).unwrap();
        assert_eq!(boxes.margin.position(), Vec2::new(0.0, 30.0));
        assert_eq!(boxes.content.size(), Vec2::new(200.0, 70.0));
    }

    #[test]
    fn test_percentage_height_of_content_fit_parent_falls_back() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let parent = child_of(&mut tree, root, &[]);
        let child = child_of(&mut tree, parent, &[("width", "20px"), ("height", "50%")]);
        let grandchild = child_of(&mut tree, child, &[("height", "8px")]);
        engine().reflow_root(&mut tree, Vec2::new(200.0, 100.0));
        assert_eq!(tree.computed_box(child).unwrap().content.height, 8.0);
        assert!(tree.is_live(grandchild));
    }

    #[test]
    fn test_inline_block_rows() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let cells: Vec<NodeId> = (0..3)
            .map(|_| child_of(&mut tree, root, &[("display", "inline-block"), ("width", "80px"), ("height", "10px")]))
            .collect();
        engine().reflow_root(&mut tree, Vec2::new(200.0, 100.0));
        let origin = |id| tree.computed_box(id).unwrap().margin.position();
        assert_eq!(origin(cells[0]), Vec2::new(0.0, 0.0));
        assert_eq!(origin(cells[1]), Vec2::new(80.0, 0.0));
        assert_eq!(origin(cells[2]), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_display_none_and_absolute_are_out_of_flow() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let parent = child_of(&mut tree, root, &[]);
        let hidden = child_of(&mut tree, parent, &[("display", "none"), ("width", "50px"), ("height", "50px")]);
        let overlay = child_of(
            &mut tree,
            parent,
            &[("position", "absolute"), ("left", "15px"), ("top", "25px"), ("width", "500px"), ("height", "500px")],
        );
        child_of(&mut tree, parent, &[("width", "30px"), ("height", "30px")]);

        engine().reflow_root(&mut tree, Vec2::new(200.0, 100.0));
        assert_eq!(tree.computed_box(hidden).unwrap().margin.size(), Vec2::ZERO);
        assert_eq!(
            tree.computed_box(overlay).unwrap().margin.position(),
            Vec2::new(15.0, 25.0)
        );
        assert_eq!(tree.computed_box(parent).unwrap().content.size(), Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_auto_margins_center_blocks() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let child = child_of(
            &mut tree,
            root,
            &[("width", "100px"), ("margin-left", "auto"), ("margin-right", "auto")],
        );
        engine().reflow_root(&mut tree, Vec2::new(300.0, 100.0));
        assert_eq!(tree.computed_box(child).unwrap().border.x, 100.0);
    }

    #[test]
    fn test_replaced_uses_resource_size() {
        let mut resources = ResourceManager::new();
        resources.add_image("photo", "photo.png", Vec2::new(120.0, 60.0));
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let image = tree.create(WidgetKind::Image);
        tree.append(root, image).unwrap();
        tree.set_resource(image, "photo").unwrap();
        let scaled = tree.create(WidgetKind::Image);
        tree.append(root, scaled).unwrap();
        tree.set_resource(scaled, "photo").unwrap();
        tree.set_style_str(scaled, "width", "60px").unwrap();
        let missing = tree.create(WidgetKind::Image);
        tree.append(root, missing).unwrap();
        tree.set_resource(missing, "nowhere").unwrap();

        let mut engine = engine().with_resources(resources);
        engine.reflow_root(&mut tree, Vec2::new(300.0, 300.0));
        assert_eq!(tree.computed_box(image).unwrap().content.size(), Vec2::new(120.0, 60.0));
        assert_eq!(tree.computed_box(scaled).unwrap().content.size(), Vec2::new(60.0, 30.0));
        assert_eq!(tree.computed_box(missing).unwrap().content.size(), Vec2::ZERO);
    }

    #[test]
    fn test_negative_sizes_clamp_to_zero() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let child = child_of(&mut tree, root, &[("width", "-40px"), ("height", "-1px")]);
        engine().reflow_root(&mut tree, Vec2::new(300.0, 100.0));
        assert_eq!(tree.computed_box(child).unwrap().content.size(), Vec2::ZERO);
    }

    #[test]
    fn test_states_are_clean_after_pass() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let child = child_of(&mut tree, root, &[("width", "10px")]);
        let stats = engine().reflow_root(&mut tree, Vec2::new(100.0, 100.0));
        assert_eq!(stats.resolved, 2);
        for id in [root, child] {
            let node = tree.get(id).unwrap();
            assert_eq!(node.layout_state, LayoutState::Clean);
            assert!(!node.dirty.needs_layout());
        }
    }

    #[test]
    fn test_auto_margins_do_not_widen_content_fit_parent() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let parent = child_of(&mut tree, root, &[]);
        let centered = child_of(
            &mut tree,
            parent,
            &[("width", "100px"), ("height", "10px"), ("margin-left", "auto"), ("margin-right", "auto")],
        );
        let mut engine = engine();
        engine.reflow_root(&mut tree, Vec2::new(300.0, 100.0));
        assert_eq!(tree.computed_box(parent).unwrap().content.width, 100.0);
        assert_eq!(tree.computed_box(centered).unwrap().margin.width, 100.0);

        // A wider sibling gives the centered child room on both sides.
        child_of(&mut tree, parent, &[("width", "200px"), ("height", "10px")]);
        engine.reflow_root(&mut tree, Vec2::new(300.0, 100.0));
        assert_eq!(tree.computed_box(parent).unwrap().content.width, 200.0);
        let boxes = tree.computed_box(centered).unwrap();
        assert_eq!(boxes.content.x, 50.0);
        assert_eq!(boxes.margin.width, 200.0);
    }

    fn flex_row(tree: &mut WidgetTree, styles: &[(&str, &str)]) -> NodeId {
        let root = tree.root();
        let row = child_of(tree, root, &[("display", "flex")]);
        for (name, value) in styles {
            tree.set_style_str(row, name, value).unwrap();
        }
        row
    }

    fn items(tree: &mut WidgetTree, parent: NodeId, sizes: &[(&str, &str)]) -> Vec<NodeId> {
        sizes
            .iter()
            .map(|&(width, height)| child_of(tree, parent, &[("width", width), ("height", height)]))
            .collect()
    }

    #[test]
    fn test_flex_justify_content() {
        for (justify, expected) in [
            ("flex-start", [0.0, 50.0, 100.0]),
            ("flex-end", [150.0, 200.0, 250.0]),
            ("center", [75.0, 125.0, 175.0]),
            ("space-between", [0.0, 125.0, 250.0]),
            ("space-evenly", [37.5, 125.0, 212.5]),
        ] {
            let mut tree = WidgetTree::new();
            let row = flex_row(&mut tree, &[("width", "300px"), ("height", "40px"), ("justify-content", justify)]);
            let cells = items(&mut tree, row, &[("50px", "20px"); 3]);
            engine().reflow_root(&mut tree, Vec2::new(400.0, 100.0));
            let xs: Vec<f32> = cells
                .iter()
                .map(|&id| tree.computed_box(id).unwrap().margin.x)
                .collect();
            assert_eq!(xs, expected, "justify-content: {}", justify);
        }
    }

    #[test]
    fn test_flex_wrap_starts_new_line() {
        let mut tree = WidgetTree::new();
        let row = flex_row(&mut tree, &[("width", "100px"), ("flex-wrap", "wrap")]);
        let cells = items(&mut tree, row, &[("60px", "10px"), ("30px", "20px"), ("50px", "15px")]);
        engine().reflow_root(&mut tree, Vec2::new(300.0, 300.0));

        let origin = |id| tree.computed_box(id).unwrap().margin.position();
        assert_eq!(origin(cells[0]), Vec2::new(0.0, 0.0));
        assert_eq!(origin(cells[1]), Vec2::new(60.0, 0.0));
        assert_eq!(origin(cells[2]), Vec2::new(0.0, 20.0));
        assert_eq!(tree.computed_box(row).unwrap().content.size(), Vec2::new(100.0, 35.0));
    }

    #[test]
    fn test_nowrap_overflows_from_start() {
        let mut tree = WidgetTree::new();
        let row = flex_row(&mut tree, &[("width", "100px"), ("justify-content", "center")]);
        let cells = items(&mut tree, row, &[("80px", "10px"), ("80px", "10px")]);
        engine().reflow_root(&mut tree, Vec2::new(300.0, 300.0));
        assert_eq!(tree.computed_box(cells[0]).unwrap().margin.x, 0.0);
        assert_eq!(tree.computed_box(cells[1]).unwrap().margin.x, 80.0);
    }

    #[test]
    fn test_flex_column() {
        let mut tree = WidgetTree::new();
        let column = flex_row(
            &mut tree,
            &[
                ("flex-direction", "column"),
                ("width", "100px"),
                ("height", "200px"),
                ("justify-content", "flex-end"),
                ("align-items", "center"),
            ],
        );
        let cells = items(&mut tree, column, &[("40px", "30px"), ("60px", "50px")]);
        engine().reflow_root(&mut tree, Vec2::new(300.0, 300.0));

        let origin = |id| tree.computed_box(id).unwrap().margin.position();
        assert_eq!(origin(cells[0]), Vec2::new(30.0, 120.0));
        assert_eq!(origin(cells[1]), Vec2::new(20.0, 150.0));
    }

    #[test]
    fn test_flex_align_items() {
        let mut tree = WidgetTree::new();
        let row = flex_row(&mut tree, &[("width", "200px"), ("height", "60px")]);
        let fixed = child_of(&mut tree, row, &[("width", "50px"), ("height", "20px")]);
        let stretched = child_of(&mut tree, row, &[("width", "50px")]);
        engine().reflow_root(&mut tree, Vec2::new(300.0, 300.0));
        assert_eq!(tree.computed_box(fixed).unwrap().content.height, 20.0);
        assert_eq!(tree.computed_box(stretched).unwrap().content.height, 60.0);

        for (align, y) in [("flex-start", 0.0), ("center", 20.0), ("flex-end", 40.0)] {
            tree.set_style_str(row, "align-items", align).unwrap();
            engine().reflow_root(&mut tree, Vec2::new(300.0, 300.0));
            assert_eq!(tree.computed_box(fixed).unwrap().margin.y, y, "align-items: {}", align);
        }
    }

    #[test]
    fn test_content_fit_flex_container_wraps_items() {
        let mut tree = WidgetTree::new();
        let row = flex_row(&mut tree, &[]);
        let cells = items(&mut tree, row, &[("40px", "10px"), ("30px", "25px")]);
        engine().reflow_root(&mut tree, Vec2::new(300.0, 300.0));
        assert_eq!(tree.computed_box(row).unwrap().content.size(), Vec2::new(70.0, 25.0));
        assert_eq!(tree.computed_box(cells[1]).unwrap().margin.x, 40.0);
    }

    #[test]
    fn test_flex_auto_margin_takes_free_space() {
        let mut tree = WidgetTree::new();
        let row = flex_row(&mut tree, &[("width", "300px"), ("height", "20px"), ("justify-content", "center")]);
        let left = child_of(&mut tree, row, &[("width", "50px"), ("height", "20px")]);
        let right = child_of(&mut tree, row, &[("width", "50px"), ("height", "20px"), ("margin-left", "auto")]);
        engine().reflow_root(&mut tree, Vec2::new(400.0, 100.0));
        assert_eq!(tree.computed_box(left).unwrap().margin.x, 0.0);
        let boxes = tree.computed_box(right).unwrap();
        assert_eq!(boxes.margin.x, 50.0);
        assert_eq!(boxes.border.x, 250.0);
    }
}
