// crates/lattice-render/tests/frame_driver.rs
use glam::{Vec2, Vec4};
use lattice_core::{EventKind, NodeId, Propagation, WidgetKind, WidgetTree};
use lattice_layout::ReflowEngine;
use lattice_render::{
    Canvas, FrameDriver, InputEvent, MouseButton, RecordingCanvas, RenderCommand, RenderError,
    RenderResult,
};
use std::cell::RefCell;
use std::rc::Rc;

fn dialog_tree() -> (WidgetTree, NodeId, NodeId) {
    let mut tree = WidgetTree::new();
    let root = tree.root();
    let dialog = tree.create(WidgetKind::Container);
    tree.append(root, dialog).unwrap();
    tree.set_style_str(dialog, "background-color", "#eeeeee").unwrap();
    tree.set_style_str(dialog, "padding-top", "10px").unwrap();
    tree.set_style_str(dialog, "padding-left", "10px").unwrap();

    let close = tree.create(WidgetKind::Button);
    tree.append(dialog, close).unwrap();
    tree.set_style_str(close, "width", "30px").unwrap();
    tree.set_style_str(close, "height", "20px").unwrap();
    tree.set_style_str(close, "background-color", "#cc0000").unwrap();
    (tree, dialog, close)
}

fn driver() -> FrameDriver<RecordingCanvas> {
    FrameDriver::new(
        RecordingCanvas::new(Vec2::new(320.0, 240.0)),
        ReflowEngine::default(),
    )
}

fn painted(driver: &FrameDriver<RecordingCanvas>) -> Vec<NodeId> {
    driver
        .canvas()
        .last_frame()
        .map(|frame| frame.commands.iter().map(RenderCommand::node).collect())
        .unwrap_or_default()
}

#[test]
fn test_click_that_removes_its_own_parent_is_finalized_at_frame_end() {
    let (mut tree, dialog, close) = dialog_tree();
    let mut driver = driver();
    driver.render_frame(&mut tree).unwrap();
    assert_eq!(painted(&driver), vec![dialog, close]);

    let closed = Rc::new(RefCell::new(false));
    let flag = closed.clone();
    tree.set_destroy_hook(dialog, Box::new(move |_, _| *flag.borrow_mut() = true))
        .unwrap();
    tree.add_event_handler(
        close,
        EventKind::Click,
        Box::new(|tree, current, _| {
            if let Some(parent) = tree.parent(current) {
                tree.detach(parent).unwrap();
            }
            Propagation::Continue
        }),
    )
    .unwrap();

    let press = InputEvent::MousePress {
        position: Vec2::new(15.0, 15.0),
        button: MouseButton::Left,
    };
    assert_eq!(driver.handle_input(&mut tree, &press).unwrap(), 1);

    // Dead, but nothing freed until the frame's safe point.
    assert!(!tree.is_live(dialog));
    assert!(tree.is_trashed(dialog));
    assert!(!*closed.borrow());

    let stats = driver.render_frame(&mut tree).unwrap();
    assert_eq!(stats.finalized, 1);
    assert!(*closed.borrow());
    assert!(painted(&driver).is_empty());
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_clean_frames_skip_layout() {
    let (mut tree, _, close) = dialog_tree();
    let mut driver = driver();
    let first = driver.render_frame(&mut tree).unwrap();
    // the fitting dialog lays its button out twice: provisional and final
    assert_eq!(first.reflow.resolved, 4);

    let second = driver.render_frame(&mut tree).unwrap();
    assert_eq!(second.reflow.resolved, 0);
    assert_eq!(second.commands, first.commands);

    tree.set_style_str(close, "width", "60px").unwrap();
    let third = driver.render_frame(&mut tree).unwrap();
    assert!(third.reflow.resolved >= 3);
    assert_eq!(tree.computed_box(close).unwrap().content.width, 60.0);
}

#[test]
fn test_resize_input_relayouts_next_frame() {
    let mut tree = WidgetTree::new();
    let half = tree.create(WidgetKind::Container);
    tree.append(tree.root(), half).unwrap();
    tree.set_style_str(half, "width", "50%").unwrap();

    let mut driver = driver();
    driver.render_frame(&mut tree).unwrap();
    assert_eq!(tree.computed_box(half).unwrap().content.width, 160.0);

    let resize = InputEvent::Resize {
        size: Vec2::new(100.0, 100.0),
    };
    assert_eq!(driver.handle_input(&mut tree, &resize).unwrap(), 0);
    driver.render_frame(&mut tree).unwrap();
    assert_eq!(tree.computed_box(half).unwrap().content.width, 50.0);
}

#[test]
fn test_presses_outside_every_widget_are_ignored() {
    let (mut tree, _, _) = dialog_tree();
    let mut driver = driver();
    driver.render_frame(&mut tree).unwrap();
    let press = InputEvent::MousePress {
        position: Vec2::new(1000.0, 1000.0),
        button: MouseButton::Right,
    };
    assert_eq!(driver.handle_input(&mut tree, &press).unwrap(), 0);
}

#[test]
fn test_press_sends_mouse_down_before_click() {
    let (mut tree, dialog, close) = dialog_tree();
    let mut driver = driver();
    driver.render_frame(&mut tree).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    for kind in [EventKind::MouseDown, EventKind::Click, EventKind::MouseUp] {
        let log = seen.clone();
        tree.add_event_handler(
            dialog,
            kind,
            Box::new(move |_, _, event| {
                log.borrow_mut().push(event.kind);
                Propagation::Continue
            }),
        )
        .unwrap();
    }

    let position = tree.absolute_box(close).unwrap().content.position() + Vec2::new(1.0, 1.0);
    let press = InputEvent::MousePress {
        position,
        button: MouseButton::Left,
    };
    assert_eq!(driver.handle_input(&mut tree, &press).unwrap(), 2);
    let release = InputEvent::MouseRelease {
        position,
        button: MouseButton::Left,
    };
    assert_eq!(driver.handle_input(&mut tree, &release).unwrap(), 1);
    assert_eq!(
        *seen.borrow(),
        vec![EventKind::MouseDown, EventKind::Click, EventKind::MouseUp]
    );
}

/// Canvas whose device is gone: every frame fails to start.
struct LostCanvas;

impl Canvas for LostCanvas {
    fn begin_frame(&mut self, _clear_color: Vec4) -> RenderResult<()> {
        Err(RenderError::RenderFailed("device lost".to_string()))
    }

    fn execute_commands(&mut self, _commands: &[RenderCommand]) -> RenderResult<()> {
        Ok(())
    }

    fn end_frame(&mut self) -> RenderResult<()> {
        Ok(())
    }

    fn resize(&mut self, _new_size: Vec2) -> RenderResult<()> {
        Ok(())
    }

    fn viewport_size(&self) -> Vec2 {
        Vec2::new(320.0, 240.0)
    }
}

#[test]
fn test_trash_drains_when_canvas_fails() {
    let (mut tree, dialog, _) = dialog_tree();
    let mut driver = FrameDriver::new(LostCanvas, ReflowEngine::default());

    let finalized = Rc::new(RefCell::new(false));
    let flag = finalized.clone();
    tree.set_destroy_hook(dialog, Box::new(move |_, _| *flag.borrow_mut() = true))
        .unwrap();
    tree.detach(dialog).unwrap();

    let result = driver.render_frame(&mut tree);
    assert!(matches!(result, Err(RenderError::RenderFailed(_))));
    assert!(*finalized.borrow());
    assert!(tree.trash().is_empty());
    assert_eq!(tree.len(), 1);
}
