use std::sync::Arc;

use anyhow::Context as _;
use log::{debug, error, info};
use stroll_core::{DrawList, FrameRequester, InputState, Instant, Scheduler};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::builder::AppConfig;
use crate::context::AppContext;
use crate::presenter::Presenter;
use crate::traits::StrollApp;

/// Frames are pumped with winit redraw requests.
struct RedrawRequester(Arc<Window>);

impl FrameRequester for RedrawRequester {
    fn request_frame(&self) {
        self.0.request_redraw();
    }
}

/// What the scheduler's callbacks see each tick.
struct Frame<A> {
    app:            A,
    input:          InputState,
    window_size:    (u32, u32),
    exit_requested: bool,
}

struct Runner<A: StrollApp> {
    config:    AppConfig,
    window:    Option<Arc<Window>>,
    scheduler: Option<Scheduler<Frame<A>>>,
    frame:     Frame<A>,
    draw_list: DrawList,
    presenter: Box<dyn Presenter>,
    /// First fatal error; returned from `run_internal` once the loop exits.
    error:     Option<anyhow::Error>,
}

impl<A: StrollApp + 'static> Runner<A> {
    fn new(app: A, config: AppConfig, presenter: Box<dyn Presenter>) -> Self {
        let window_size = (config.width, config.height);
        Self {
            config,
            window: None,
            scheduler: None,
            frame: Frame {
                app,
                input: InputState::new(),
                window_size,
                exit_requested: false,
            },
            draw_list: DrawList::new(),
            presenter,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.stop();
        }
        event_loop.exit();
    }

    fn build_scheduler(window: Arc<Window>) -> Scheduler<Frame<A>> {
        let mut scheduler = Scheduler::new(RedrawRequester(window));

        scheduler.on_update(|frame: &mut Frame<A>, dt| {
            let mut ctx = AppContext::new(&frame.input, dt, frame.window_size);
            frame.app.update(&mut ctx);
            frame.exit_requested |= ctx.exit_requested;
        });

        scheduler.on_render(|frame: &Frame<A>, surface, dt| {
            let ctx = AppContext::new(&frame.input, dt, frame.window_size);
            frame.app.draw(surface, &ctx);
        });

        scheduler
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(scheduler) = self.scheduler.as_mut() else {
            return;
        };

        self.draw_list.clear();
        let ticked = scheduler.tick(Instant::now(), &mut self.frame, &mut self.draw_list);

        if ticked.is_some() {
            if let Err(err) = self.presenter.present(&self.draw_list, self.frame.window_size) {
                self.fail(event_loop, err.context("presenting frame"));
                return;
            }
        }

        // ── End-of-frame input cleanup ───────────────────────────────────────
        // Must happen AFTER every update/draw callback has read the edges.
        self.frame.input.end_frame();

        if self.frame.exit_requested {
            self.shutdown(event_loop);
        }
    }
}

impl<A: StrollApp + 'static> ApplicationHandler for Runner<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_resizable(self.config.resizable)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = match event_loop.create_window(attributes).context("creating window") {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err),
        };
        let size = window.inner_size();
        self.frame.window_size = (size.width, size.height);

        {
            let frame = &mut self.frame;
            let mut ctx = AppContext::new(&frame.input, 0.0, frame.window_size);
            frame.app.setup(&mut ctx);
            frame.exit_requested |= ctx.exit_requested;
        }

        let mut scheduler = Self::build_scheduler(window.clone());
        scheduler.start();
        info!("window ready at {}x{}", size.width, size.height);

        self.scheduler = Some(scheduler);
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::KeyboardInput { event: key, .. } => {
                if let PhysicalKey::Code(code) = key.physical_key {
                    self.frame
                        .input
                        .update_key(code, key.state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Right,
                ..
            } => self.frame.input.context_menu(),
            WindowEvent::Focused(false) => self.frame.input.focus_lost(),
            WindowEvent::Occluded(true) => self.frame.input.visibility_hidden(),
            _ => {}
        }

        // Forward to user callback
        {
            let frame = &mut self.frame;
            let mut ctx = AppContext::new(&frame.input, 0.0, frame.window_size);
            frame.app.on_window_event(&event, &mut ctx);
            frame.exit_requested |= ctx.exit_requested;
        }

        match event {
            WindowEvent::CloseRequested => {
                debug!("close requested");
                self.shutdown(event_loop);
            }
            WindowEvent::Resized(size) => {
                let frame = &mut self.frame;
                frame.window_size = (size.width, size.height);
                let mut ctx = AppContext::new(&frame.input, 0.0, frame.window_size);
                frame.app.on_resize(frame.window_size, &mut ctx);
                frame.exit_requested |= ctx.exit_requested;
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }

        if self.frame.exit_requested {
            self.shutdown(event_loop);
        }
    }
}

pub(crate) fn run_internal<A: StrollApp + 'static>(
    config: AppConfig,
    app: A,
    presenter: Box<dyn Presenter>,
) -> anyhow::Result<()> {
    let mut runner = Runner::new(app, config, presenter);
    let event_loop = EventLoop::new().context("creating event loop")?;
    // Frames are paced by redraw requests; Poll keeps the loop responsive
    // between them.
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut runner).context("running event loop")?;

    match runner.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
