use std::{sync::Arc, time::Duration};

use anyhow::Context;
use pixels::{wgpu::TextureFormat, Pixels, PixelsBuilder, SurfaceTexture};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowAttributes},
};

use super::{frame::RenderFrame, sleeper::Sleeper};

pub(super) struct RendererWindow {
    config: RendererWindowConfig,
    resumed_window: Option<ResumedWindow>,
    sleeper: Sleeper,
}

impl RendererWindow {
    pub fn new(config: RendererWindowConfig) -> Self {
        let sleeper = {
            let target_frame_time = Duration::from_micros(1_000_000 / config.target_fps.max(1));
            Sleeper::new(target_frame_time)
        };

        Self {
            config,
            resumed_window: None,
            sleeper,
        }
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<ResumedWindow> {
        let window = Arc::new({
            let window_size = LogicalSize::new(self.config.width as f64, self.config.height as f64);

            event_loop
                .create_window(
                    WindowAttributes::default()
                        .with_title(self.config.title.clone())
                        .with_inner_size(window_size),
                )
                .context("Creating window")?
        });

        let pixels = {
            let window_size = window.inner_size();

            let surface_texture =
                SurfaceTexture::new(window_size.width, window_size.height, window.clone());

            PixelsBuilder::new(window_size.width, window_size.height, surface_texture)
                .texture_format(TextureFormat::Rgba8UnormSrgb)
                .build()
                .context("Creating pixels buffer")?
        };

        log::info!(
            "Opened {}x{} window",
            window.inner_size().width,
            window.inner_size().height
        );

        Ok(ResumedWindow {
            window,
            pixels,
            title: self.config.title.clone(),
        })
    }
}

pub struct RendererWindowConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub target_fps: u64,

    /// Draws one frame, optionally returning a new window title.
    pub draw_callback: Box<dyn FnMut(RenderFrame) -> Option<String>>,
    pub event_callback: Option<Box<dyn FnMut(&WindowEvent)>>,
}

struct ResumedWindow {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    title: String,
}

impl ApplicationHandler for RendererWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.resumed_window.is_some() {
            return;
        }

        match self.create_window(event_loop) {
            Ok(resumed_window) => {
                resumed_window.window.request_redraw();
                self.resumed_window = Some(resumed_window);
            }
            Err(e) => {
                log::error!("{e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(ResumedWindow {
            window,
            pixels,
            title,
        }) = self.resumed_window.as_mut()
        else {
            return;
        };

        match event {
            WindowEvent::RedrawRequested => {
                let PhysicalSize { width, height } = window.inner_size();

                let next_frame = RenderFrame {
                    width,
                    height,
                    buffer: pixels.frame_mut(),
                };

                if let Some(new_title) = (self.config.draw_callback)(next_frame) {
                    if *title != new_title {
                        window.set_title(&new_title);
                        *title = new_title;
                    }
                }

                // Let pixels do the actual hard work
                if let Err(e) = pixels.render() {
                    log::error!("Rendering with pixels: {e}");
                    event_loop.exit();
                    return;
                }

                // FIXME: It isn't ideal that we're hanging the entire event loop just for the throttled redraw loop.
                //        This can make things such as resizing less responsive, since we're waiting here instead of handling the resize.
                self.sleeper.sleep();
                window.request_redraw();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                // Minimized windows report a zero size, which pixels can't hold.
                if width > 0 && height > 0 {
                    if let Err(e) = pixels
                        .resize_surface(width, height)
                        .and_then(|()| pixels.resize_buffer(width, height))
                    {
                        log::error!("Resizing pixels buffer: {e}");
                    }
                }
                window.request_redraw();
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            _ => {}
        }

        if let Some(event_callback) = &mut self.config.event_callback {
            event_callback(&event);
        }
    }
}
