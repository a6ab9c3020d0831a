use super::*;
use crate::config::{CommitTrigger, Config};
use crate::draw::{Shape, ShapeKind};
use crate::surface::{EventSource, MemorySurface, RenderingSurface};
use crate::util::Point;
use std::time::{Duration, Instant};

fn create_test_controller() -> ToolController<MemorySurface> {
    ToolController::with_surface(&Config::default(), MemorySurface::new())
}

fn surface(controller: &ToolController<MemorySurface>) -> &MemorySurface {
    controller.surface().unwrap()
}

fn drag(controller: &mut ToolController<MemorySurface>, from: (f64, f64), to: (f64, f64)) {
    controller.dispatch_pointer(&PointerEvent::down(from.0, from.1));
    controller.dispatch_pointer(&PointerEvent::moved(to.0, to.1));
    controller.dispatch_pointer(&PointerEvent::up(to.0, to.1));
}

#[test]
fn test_initial_state_has_no_tool_and_selection_enabled() {
    let controller = create_test_controller();
    assert_eq!(controller.current_tool(), Tool::None);
    assert!(surface(&controller).selection_enabled());
    assert_eq!(surface(&controller).listener_count(), 0);
}

#[test]
fn test_toggle_same_tool_twice_deactivates() {
    let mut controller = create_test_controller();

    controller.toggle_tool(Tool::Circle);
    assert_eq!(controller.current_tool(), Tool::Circle);
    assert!(!surface(&controller).selection_enabled());
    assert!(surface(&controller).listener_count() > 0);

    controller.toggle_tool(Tool::Circle);
    assert_eq!(controller.current_tool(), Tool::None);
    assert!(surface(&controller).selection_enabled());
    assert_eq!(surface(&controller).listener_count(), 0);
}

#[test]
fn test_switching_tools_moves_listeners() {
    let mut controller = create_test_controller();
    controller.toggle_tool(Tool::Rect);
    controller.toggle_tool(Tool::Line);

    let surface = surface(&controller);
    let down = surface.listeners(PointerEventKind::Down);
    assert_eq!(down.len(), 1);
    assert!(!surface.selection_enabled());
}

#[test]
fn test_unknown_tool_name_deactivates() {
    let mut controller = create_test_controller();
    controller.toggle_tool(Tool::Rect);
    controller.toggle_tool(Tool::from("eraser"));
    assert_eq!(controller.current_tool(), Tool::None);
    assert_eq!(surface(&controller).listener_count(), 0);
}

#[test]
fn test_rect_drag_commits_selectable_rect() {
    let mut controller = create_test_controller();
    controller.toggle_tool(Tool::Rect);

    drag(&mut controller, (10.0, 10.0), (40.0, 50.0));

    let rects = surface(&controller).persistent_of(ShapeKind::Rect);
    assert_eq!(rects.len(), 1);
    assert_eq!(
        rects[0].shape,
        Shape::Rect {
            origin: Point::new(10.0, 10.0),
            width: 30.0,
            height: 40.0
        }
    );
    assert!(rects[0].selectable);
    assert!(rects[0].has_controls);
    assert!(!controller.has_active_gesture());
}

#[test]
fn test_tiny_circle_is_not_added() {
    let mut controller = create_test_controller();
    controller.toggle_tool(Tool::Circle);

    drag(&mut controller, (0.0, 0.0), (0.0, 3.0));
    assert_eq!(surface(&controller).object_count(), 0);
}

#[test]
fn test_line_endpoint_follows_pointer() {
    let mut controller = create_test_controller();
    controller.toggle_tool(Tool::Line);

    controller.dispatch_pointer(&PointerEvent::down(5.0, 5.0));
    controller.dispatch_pointer(&PointerEvent::moved(20.0, 5.0));
    assert!(controller.has_active_gesture());
    assert_eq!(surface(&controller).preview_count(), 1);
    controller.dispatch_pointer(&PointerEvent::up(25.0, 30.0));

    let lines = surface(&controller).persistent_of(ShapeKind::Line);
    assert_eq!(
        lines[0].shape,
        Shape::Line {
            start: Point::new(5.0, 5.0),
            end: Point::new(25.0, 30.0)
        }
    );
}

#[test]
fn test_double_click_line_mode_from_config() {
    let mut config = Config::default();
    config.line.commit_trigger = CommitTrigger::DoubleClick;
    let mut controller = ToolController::with_surface(&config, MemorySurface::new());
    controller.toggle_tool(Tool::Line);

    drag(&mut controller, (0.0, 0.0), (10.0, 0.0));
    assert!(controller.has_active_gesture());
    assert_eq!(surface(&controller).persistent_count(), 0);

    controller.dispatch_pointer(&PointerEvent::moved(60.0, 80.0));
    controller.dispatch_pointer(&PointerEvent::double_click(60.0, 80.0));
    assert!(!controller.has_active_gesture());
    assert_eq!(surface(&controller).persistent_of(ShapeKind::Line).len(), 1);
}

#[test]
fn test_switching_mid_drag_discards_preview() {
    let mut controller = create_test_controller();
    controller.toggle_tool(Tool::Circle);
    controller.dispatch_pointer(&PointerEvent::down(100.0, 100.0));
    controller.dispatch_pointer(&PointerEvent::moved(150.0, 100.0));
    assert_eq!(surface(&controller).preview_count(), 1);

    controller.toggle_tool(Tool::Rect);
    assert_eq!(surface(&controller).object_count(), 0);

    // only the rect engine hears the release, and it has no gesture to commit
    let outcome = controller.dispatch_pointer(&PointerEvent::up(160.0, 100.0));
    assert!(outcome.handled);
    assert_eq!(surface(&controller).object_count(), 0);
}

#[test]
fn test_stray_events_without_tool_are_ignored() {
    let mut controller = create_test_controller();
    let outcome = controller.dispatch_pointer(&PointerEvent::down(10.0, 10.0));
    assert_eq!(outcome, DispatchOutcome::default());

    controller.toggle_tool(Tool::Rect);
    controller.dispatch_pointer(&PointerEvent::moved(10.0, 10.0));
    controller.dispatch_pointer(&PointerEvent::up(10.0, 10.0));
    assert_eq!(surface(&controller).object_count(), 0);
}

#[test]
fn test_context_menu_is_suppressed_while_tool_active() {
    let mut controller = create_test_controller();
    let idle = controller.dispatch_pointer(&PointerEvent::context_menu(5.0, 5.0));
    assert!(!idle.prevent_default);

    controller.toggle_tool(Tool::Text);
    let outcome = controller.dispatch_pointer(&PointerEvent::context_menu(5.0, 5.0));
    assert!(outcome.prevent_default);
    assert!(!outcome.handled);
}

#[test]
fn test_right_click_cancels_shape_gesture() {
    let mut controller = create_test_controller();
    controller.toggle_tool(Tool::Rect);
    controller.dispatch_pointer(&PointerEvent::down(0.0, 0.0));
    controller.dispatch_pointer(&PointerEvent::moved(50.0, 50.0));

    let outcome = controller.dispatch_pointer(&PointerEvent::context_menu(50.0, 50.0));
    assert!(outcome.handled);
    assert!(outcome.prevent_default);
    assert_eq!(surface(&controller).object_count(), 0);
}

#[test]
fn test_style_changes_apply_to_next_shape() {
    let mut controller = create_test_controller();
    controller.toggle_tool(Tool::Rect);
    controller.style().set_stroke_width(7.0);

    drag(&mut controller, (0.0, 0.0), (30.0, 30.0));
    let rects = surface(&controller).persistent_of(ShapeKind::Rect);
    assert_eq!(rects[0].stroke.width, 7.0);
}

#[test]
fn test_text_placeholder_replaced_by_typing() {
    let mut config = Config::default();
    config.text.placeholder = "P".to_string();
    let mut controller = ToolController::with_surface(&config, MemorySurface::new());
    controller.toggle_tool(Tool::Text);

    controller.dispatch_pointer(&PointerEvent::down(10.0, 10.0));
    let id = controller.text_engine().editing_target().unwrap();
    controller.type_text("hi");

    assert_eq!(surface(&controller).text(id).unwrap().content, "hi");
}

#[test]
fn test_text_first_delete_clears_placeholder() {
    let mut controller = create_test_controller();
    controller.toggle_tool(Tool::Text);
    controller.dispatch_pointer(&PointerEvent::down(10.0, 10.0));
    let id = controller.text_engine().editing_target().unwrap();

    let outcome = controller.press_key(&KeyEvent::new(Key::Delete));
    assert_eq!(outcome, KeyOutcome::PreventDefault);
    assert_eq!(surface(&controller).text(id).unwrap().content, "");

    controller.type_text("ok");
    assert_eq!(surface(&controller).text(id).unwrap().content, "ok");
}

#[test]
fn test_text_uses_font_style() {
    let mut controller = create_test_controller();
    controller.style().set_font_size(32.0);
    controller.toggle_tool(Tool::Text);
    controller.dispatch_pointer(&PointerEvent::down(10.0, 10.0));

    let id = controller.text_engine().editing_target().unwrap();
    let text = surface(&controller).text(id).unwrap();
    assert_eq!(text.font_size, 32.0);
    assert_eq!(text.position, Point::new(10.0, 10.0));
}

#[test]
fn test_toggling_text_off_ends_editing() {
    let mut controller = create_test_controller();
    controller.toggle_tool(Tool::Text);
    controller.dispatch_pointer(&PointerEvent::down(10.0, 10.0));
    let id = controller.text_engine().editing_target().unwrap();

    controller.toggle_tool(Tool::Text);
    assert!(!surface(&controller).is_editing(id));
    assert!(!controller.text_engine().ticker().is_running());
    assert_eq!(surface(&controller).object_count(), 1);
}

#[test]
fn test_tick_requests_renders_only_while_editing() {
    let mut controller = create_test_controller();
    let later = Instant::now() + Duration::from_secs(1);
    assert!(!controller.tick(later));

    controller.toggle_tool(Tool::Text);
    controller.dispatch_pointer(&PointerEvent::down(10.0, 10.0));
    assert!(controller.tick(later));

    let id = controller.text_engine().editing_target().unwrap();
    controller.surface_mut().unwrap().exit_editing(id);
    controller.notify_editing_exited(id);
    assert!(!controller.tick(later + Duration::from_secs(1)));
}

#[test]
fn test_teardown_is_complete_and_idempotent() {
    let mut controller = create_test_controller();
    controller.toggle_tool(Tool::Circle);
    controller.dispatch_pointer(&PointerEvent::down(0.0, 0.0));
    controller.dispatch_pointer(&PointerEvent::moved(30.0, 0.0));

    controller.teardown();
    assert_eq!(controller.current_tool(), Tool::None);
    assert_eq!(surface(&controller).object_count(), 0);
    assert_eq!(surface(&controller).listener_count(), 0);
    assert!(surface(&controller).selection_enabled());

    controller.teardown();
    assert_eq!(controller.current_tool(), Tool::None);
}

#[test]
fn test_unmount_and_remount_reattaches_current_tool() {
    let mut controller = create_test_controller();
    controller.toggle_tool(Tool::Rect);
    controller.dispatch_pointer(&PointerEvent::down(0.0, 0.0));

    let old = controller.unmount().unwrap();
    assert_eq!(old.object_count(), 0);
    assert_eq!(old.listener_count(), 0);
    assert!(old.selection_enabled());

    // without a surface everything is a no-op
    assert!(!controller.dispatch_pointer(&PointerEvent::down(0.0, 0.0)).handled);
    controller.toggle_tool(Tool::Line);
    controller.toggle_tool(Tool::Rect);

    assert!(controller.mount(MemorySurface::new()).is_none());
    assert_eq!(controller.current_tool(), Tool::Rect);
    assert!(!surface(&controller).selection_enabled());
    drag(&mut controller, (0.0, 0.0), (20.0, 20.0));
    assert_eq!(surface(&controller).persistent_count(), 1);
}

#[test]
fn test_every_drawing_tool_toggles_cleanly() {
    let mut controller = create_test_controller();
    for tool in Tool::DRAWING {
        controller.toggle_tool(tool);
        assert_eq!(controller.current_tool(), tool);
        assert!(surface(&controller).listener_count() > 0, "{tool} attached");

        controller.toggle_tool(tool);
        assert_eq!(surface(&controller).listener_count(), 0, "{tool} detached");
        assert!(surface(&controller).selection_enabled());
    }
}

#[test]
fn test_clear_surface_mid_gesture_keeps_tool_usable() {
    let mut controller = create_test_controller();
    controller.toggle_tool(Tool::Rect);
    drag(&mut controller, (0.0, 0.0), (30.0, 30.0));
    controller.toggle_tool(Tool::Circle);
    controller.dispatch_pointer(&PointerEvent::down(100.0, 100.0));
    controller.dispatch_pointer(&PointerEvent::moved(140.0, 100.0));
    let listeners = surface(&controller).listener_count();

    controller.clear_surface();
    assert_eq!(surface(&controller).object_count(), 0);
    assert!(!controller.has_active_gesture());
    assert_eq!(controller.current_tool(), Tool::Circle);
    assert_eq!(surface(&controller).listener_count(), listeners);
    assert_eq!(surface(&controller).active_object(), None);

    drag(&mut controller, (0.0, 0.0), (20.0, 0.0));
    assert_eq!(surface(&controller).persistent_of(ShapeKind::Circle).len(), 1);
}

#[test]
fn test_clear_surface_mid_edit_ends_editing() {
    let mut controller = create_test_controller();
    controller.toggle_tool(Tool::Text);
    controller.dispatch_pointer(&PointerEvent::down(10.0, 10.0));
    controller.type_text("gone");
    let renders = surface(&controller).render_count();

    controller.clear_surface();
    assert_eq!(surface(&controller).object_count(), 0);
    assert!(surface(&controller).render_count() > renders);
    assert_eq!(controller.text_engine().editing_target(), None);
    assert!(!controller.text_engine().ticker().is_running());
    assert!(!controller.tick(Instant::now() + Duration::from_secs(1)));

    controller.dispatch_pointer(&PointerEvent::down(10.0, 10.0));
    assert!(controller.text_engine().is_override_armed());
    assert_eq!(surface(&controller).object_count(), 1);
}

#[test]
fn test_clear_surface_without_surface_is_noop() {
    let mut controller = ToolController::<MemorySurface>::new(&Config::default());
    controller.toggle_tool(Tool::Line);
    controller.clear_surface();
    assert_eq!(controller.current_tool(), Tool::Line);
}

#[test]
fn test_nan_stroke_width_still_guards_own_shapes() {
    let config = Config::from_toml_str("[drawing]\nstroke_width = nan\n").unwrap();
    let mut controller = ToolController::with_surface(&config, MemorySurface::new());
    controller.toggle_tool(Tool::Circle);
    drag(&mut controller, (50.0, 50.0), (70.0, 50.0));

    let circles = surface(&controller).persistent_of(ShapeKind::Circle);
    assert_eq!(circles[0].stroke.width, 2.0);

    controller.dispatch_pointer(&PointerEvent::down(55.0, 55.0));
    assert!(!controller.has_active_gesture());
    assert_eq!(surface(&controller).object_count(), 1);
}
