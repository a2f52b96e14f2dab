use std::sync::Arc;

use log::info;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::gfx::RenderSurface;
use crate::scene::SceneGraph;
use crate::ui::{scene_outliner, GtagsTool, UiManager};

/// Standalone GTags application.
///
/// Owns the scene graph and the tool window, opens a winit window and runs
/// the UI on top of a cleared wgpu surface. Inside a host application the
/// tagging core would run against the host's scene instead; this harness
/// exists so the tool can be exercised on its own.
pub struct GtagsApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_surface: Option<RenderSurface>,
    ui_manager: Option<UiManager>,
    scene: SceneGraph,
    tool: GtagsTool,
}

impl GtagsApp {
    /// Create a new GTags application with an empty scene
    pub async fn new() -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_surface: None,
                ui_manager: None,
                scene: SceneGraph::new(),
                tool: GtagsTool::new(),
            },
        }
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.app_state.scene
    }

    pub fn tool_mut(&mut self) -> &mut GtagsTool {
        &mut self.app_state.tool
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("GTags")
                .with_inner_size(winit::dpi::LogicalSize::new(900, 640)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();

            let window_clone = window_handle.clone();
            let render_surface = pollster::block_on(async move {
                RenderSurface::new(window_clone, width, height).await
            });

            let ui_manager = UiManager::new(
                render_surface.device(),
                render_surface.queue(),
                render_surface.surface_format(),
                &window_handle,
            );

            self.ui_manager = Some(ui_manager);
            self.render_surface = Some(render_surface);
            info!("window up, scene has {} object(s)", self.scene.len());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(render_surface) = self.render_surface.as_mut() else {
            return;
        };

        let Some(window) = self.window.as_ref() else {
            return;
        };

        // UI gets first refusal on every input event.
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        ..
                    },
                ..
            } => {
                if matches!(key_code, winit::keyboard::KeyCode::Escape) {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                render_surface.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    let window_clone = window.clone();
                    let scene = &mut self.scene;
                    let tool = &mut self.tool;

                    render_surface.render_frame(|device, queue, encoder, color_attachment| {
                        ui_manager.draw(
                            device,
                            queue,
                            encoder,
                            &window_clone,
                            color_attachment,
                            |ui| {
                                scene_outliner(ui, scene);
                                tool.draw(ui, scene);
                                shelf_window(ui, tool);
                            },
                        );
                    });
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

/// Tiny launcher strip so a closed tool window can be reopened, the way a
/// shelf button would relaunch it inside a host application.
fn shelf_window(ui: &imgui::Ui, tool: &mut GtagsTool) {
    if tool.is_open() {
        return;
    }
    ui.window("Shelf")
        .size([120.0, 70.0], imgui::Condition::FirstUseEver)
        .position([460.0, 30.0], imgui::Condition::FirstUseEver)
        .build(|| {
            if ui.button("GTags") {
                tool.open();
            }
        });
}
