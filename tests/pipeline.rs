//! End-to-end behavior of the pipeline driven through the facade crate.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use tideui::prelude::*;

type Log = Rc<RefCell<Vec<&'static str>>>;

/// Pattern that dirties another node from its swap hook, once.
#[derive(Debug)]
struct Relay {
    name: &'static str,
    log: Log,
    target: Option<NodeId>,
}

impl Pattern for Relay {
    fn on_dirty_layout_wrapper_swap(
        &mut self,
        _dirty: &LayoutWrapper,
        config: DirtySwapConfig,
        ctx: &mut PatternContext<'_>,
    ) -> bool {
        if config.skipped_all() {
            return false;
        }
        self.log.borrow_mut().push(self.name);
        if let Some(target) = self.target.take() {
            ctx.mark_dirty_node(target, PropertyChangeFlag::MEASURE);
            let log = Rc::clone(&self.log);
            ctx.add_after_layout_task(move || log.borrow_mut().push("after"));
        }
        true
    }
}

fn settle(ctx: &mut PipelineContext) -> usize {
    let mut frames = 0;
    while ctx.flush_vsync(Instant::now()) == FrameResult::Presented {
        frames += 1;
        assert!(frames < 10, "pipeline does not settle");
    }
    frames
}

fn frame(ctx: &PipelineContext, id: NodeId) -> Rect {
    ctx.node(id).unwrap().geometry().frame()
}

#[test]
fn widgets_in_a_column_settle_in_one_frame() {
    let config = tideui::config::from_json_str(r#"{ "root_width": 400.0, "root_height": 800.0 }"#)
        .unwrap();
    let mut ctx = PipelineContext::new(config);

    let column = ctx.create_node("column", LinearPattern::column(10.0));
    ctx.mount_to_parent(ctx.root(), column).unwrap();

    let image = ctx.create_node("image", ImagePattern::new(ImageFit::Contain));
    let qrcode = ctx.create_node("qrcode", QrCodePattern::new("tideui"));
    let slider = ctx.create_node("slider", SliderPattern::default());
    for (id, size) in [(image, Some(100.0_f32)), (qrcode, Some(80.0)), (slider, None)] {
        if let Some(side) = size {
            ctx.update_layout_property(id, |property| {
                property.set_ideal_size(OptionalSize::new(side, side));
            });
        }
        ctx.mount_to_parent(column, id).unwrap();
    }

    assert_eq!(settle(&mut ctx), 1);
    assert_eq!(frame(&ctx, column).size(), Size::new(400.0, 216.0));
    assert_eq!(frame(&ctx, image), Rect::new(Point::zero(), Size::new(100.0, 100.0)));
    assert_eq!(frame(&ctx, qrcode), Rect::new(Point::new(0.0, 110.0), Size::new(80.0, 80.0)));
    assert_eq!(frame(&ctx, slider), Rect::new(Point::new(0.0, 200.0), Size::new(400.0, 16.0)));

    let scene = |id| ctx.node(id).unwrap().render_context().scene().commands().len();
    assert_eq!(scene(image), 0);
    assert_eq!(scene(qrcode), 1);
    assert_eq!(scene(slider), 2);
}

#[test]
fn image_load_relayouts_only_the_image() {
    let mut ctx = PipelineContext::default();
    let column = ctx.create_node("column", LinearPattern::column(0.0));
    ctx.mount_to_parent(ctx.root(), column).unwrap();
    let image = ctx.create_node("image", ImagePattern::new(ImageFit::Fill));
    ctx.update_layout_property(image, |property| {
        property.set_ideal_size(OptionalSize::new(64.0, 64.0));
    });
    ctx.mount_to_parent(column, image).unwrap();
    settle(&mut ctx);

    ctx.with_pattern::<ImagePattern, _>(image, |pattern| {
        pattern.on_image_loaded(ImageInfo::new("icon.png", Size::new(32.0, 32.0)));
    })
    .unwrap();
    ctx.mark_dirty_node(image, PropertyChangeFlag::MEASURE_SELF);
    assert_eq!(ctx.scheduler().dirty_layout_count(), 1);
    assert!(ctx.node(image).unwrap().is_layout_dirty_marked());

    assert_eq!(settle(&mut ctx), 1);
    assert_eq!(
        ctx.node(image).unwrap().render_context().scene().commands(),
        &[DrawCommand::Image {
            source: "icon.png".to_owned(),
            src: Rect::new(Point::zero(), Size::new(32.0, 32.0)),
            dst: Rect::new(Point::zero(), Size::new(64.0, 64.0)),
        }]
    );
}

#[test]
fn work_queued_by_a_hook_runs_in_the_next_frame() {
    let log = Log::default();
    let mut ctx = PipelineContext::default();
    let other = ctx.push_page("other", LinearPattern::row(0.0));
    let relay = ctx.create_node(
        "relay",
        Relay {
            name: "relay",
            log: Rc::clone(&log),
            target: None,
        },
    );
    ctx.mount_to_parent(ctx.root(), relay).unwrap();
    settle(&mut ctx);
    log.borrow_mut().clear();
    assert!(!ctx.take_frame_request());

    ctx.with_pattern::<Relay, _>(relay, |pattern| pattern.target = Some(other))
        .unwrap();
    ctx.mark_dirty_node(relay, PropertyChangeFlag::MEASURE_SELF);
    assert!(ctx.take_frame_request());

    assert_eq!(ctx.flush_vsync(Instant::now()), FrameResult::Presented);
    assert_eq!(*log.borrow(), vec!["relay", "after"]);
    assert!(ctx.scheduler().dirty_layout_nodes(1).unwrap().contains(other));
    assert!(ctx.take_frame_request());

    assert_eq!(ctx.flush_vsync(Instant::now()), FrameResult::Presented);
    assert!(ctx.scheduler().is_empty());
    assert_eq!(ctx.flush_vsync(Instant::now()), FrameResult::Idle);
}

#[test]
fn idle_time_runs_predict_tasks_in_order() {
    let mut ctx = PipelineContext::default();
    let order = Rc::new(RefCell::new(Vec::new()));
    for index in 0..3 {
        let order = Rc::clone(&order);
        ctx.add_predict_task(move |_, scheduler| {
            order.borrow_mut().push(index);
            if index == 0 {
                let order = Rc::clone(&order);
                scheduler.add_predict_task(move |_, _| order.borrow_mut().push(9));
            }
        });
    }

    ctx.on_idle(Instant::now() + Duration::from_secs(30));
    assert_eq!(*order.borrow(), vec![0, 1, 2, 9]);
    assert_eq!(ctx.scheduler().predict_task_count(), 0);
}

#[test]
fn destroy_discards_pending_callbacks() {
    let ran = Rc::new(Cell::new(false));
    let mut ctx = PipelineContext::default();
    let flag = Rc::clone(&ran);
    ctx.add_after_layout_task(move || flag.set(true));
    ctx.destroy();

    assert_eq!(ctx.flush_vsync(Instant::now()), FrameResult::Idle);
    assert!(!ran.get());
    assert!(ctx.tree().is_empty());
}

#[test]
fn tree_errors_convert_into_facade_error() {
    let mut ctx = PipelineContext::default();
    let node = ctx.create_node("row", LinearPattern::row(0.0));
    ctx.mount_to_parent(ctx.root(), node).unwrap();

    let err: tideui::Error = ctx.mount_to_parent(ctx.root(), node).unwrap_err().into();
    assert!(matches!(err, tideui::Error::Tree(_)));
    assert!(err.to_string().contains("already attached"));
}
