// License: MIT
//
// Layer-shell window for the docking widget. Pointer input is translated to
// screen coordinates and fed to the dock; window-level effects come back
// out and are applied here.

use eventline::{debug, info, warn};

use pinmark_core::Point;
use pinmark_dock::layout::{STAR_RADIUS, WIDGET_H, WIDGET_W};
use pinmark_dock::{Dock, DockEvent, Effect, ScreenSize};

use smithay_client_toolkit::{
    output::{OutputHandler, OutputState},
    registry::{ProvidesRegistryState, RegistryState},
    registry_handlers,
};

use wayland_client::{
    protocol::{
        wl_buffer, wl_callback, wl_compositor, wl_output, wl_pointer, wl_region, wl_seat, wl_shm,
        wl_shm_pool, wl_surface,
    },
    Connection, Dispatch, QueueHandle, WEnum,
};

use wayland_cursor::CursorTheme;

use wayland_protocols_wlr::layer_shell::v1::client::{
    zwlr_layer_shell_v1,
    zwlr_layer_surface_v1::{self, Anchor, KeyboardInteractivity},
};

use super::margin::Margins;
use super::render;
use super::shm::ShmBuffer;

const BTN_LEFT: u32 = 272;

pub const FALLBACK_SCREEN: ScreenSize = ScreenSize::new(1920, 1080);

pub struct App {
    // SCTK state
    pub registry_state: RegistryState,
    pub output_state: OutputState,

    // Wayland globals
    pub compositor: Option<wl_compositor::WlCompositor>,
    pub shm: Option<wl_shm::WlShm>,
    pub seat: Option<wl_seat::WlSeat>,
    pub layer_shell: Option<zwlr_layer_shell_v1::ZwlrLayerShellV1>,

    // Surface + buffer
    pub(crate) surface: Option<wl_surface::WlSurface>,
    pub(crate) layer_surface: Option<zwlr_layer_surface_v1::ZwlrLayerSurfaceV1>,
    pub(crate) shm_buf: Option<ShmBuffer>,
    pub(crate) configured: bool,

    pub pointer: Option<wl_pointer::WlPointer>,

    // Cursor
    pub cursor_surface: Option<wl_surface::WlSurface>,
    pub cursor_theme: Option<CursorTheme>,

    pub(crate) dock: Dock,
    pub(crate) margins: Margins,
    /// Last pointer position, screen coordinates.
    pointer_at: Point,

    pub(crate) pending_redraw: bool,
    pub closed: bool,
}

impl App {
    pub fn new(registry_state: RegistryState, output_state: OutputState, dock: Dock) -> Self {
        Self {
            registry_state,
            output_state,
            compositor: None,
            shm: None,
            seat: None,
            layer_shell: None,

            surface: None,
            layer_surface: None,
            shm_buf: None,
            configured: false,

            pointer: None,

            cursor_surface: None,
            cursor_theme: None,

            margins: Margins::new(dock.state().origin),
            dock,
            pointer_at: Point::default(),

            pending_redraw: true,
            closed: false,
        }
    }

    /// Logical size of the first output, if the compositor told us yet.
    pub fn screen_size(&self) -> Option<ScreenSize> {
        self.output_state
            .outputs()
            .find_map(|o| self.output_state.info(&o)?.logical_size)
            .map(|(w, h)| ScreenSize::new(w, h))
    }

    pub fn init_cursor(&mut self, conn: &Connection, qh: &QueueHandle<Self>) -> Result<(), String> {
        if self.cursor_theme.is_some() {
            return Ok(());
        }
        let compositor = self.compositor.as_ref().ok_or("no compositor")?;
        let shm = self.shm.as_ref().ok_or("no shm")?;

        let theme = CursorTheme::load(conn, shm.clone(), 24)
            .map_err(|e| format!("cursor: load theme: {e:?}"))?;
        let surf = compositor.create_surface(qh, ());

        self.cursor_theme = Some(theme);
        self.cursor_surface = Some(surf);
        Ok(())
    }

    fn set_cursor_image(&mut self, pointer: &wl_pointer::WlPointer, serial: u32) {
        let (Some(theme), Some(surf)) = (self.cursor_theme.as_mut(), self.cursor_surface.as_ref())
        else {
            return;
        };

        let name = if theme.get_cursor("left_ptr").is_some() { "left_ptr" } else { "default" };
        let Some(cursor) = theme.get_cursor(name)
        else {
            return;
        };

        let img = &cursor[0];
        let (hx, hy) = img.hotspot();
        pointer.set_cursor(serial, Some(surf), hx as i32, hy as i32);

        surf.attach(Some(&**img), 0, 0);
        surf.commit();
    }

    pub fn ensure_surface(&mut self, qh: &QueueHandle<Self>) -> Result<(), String> {
        if self.surface.is_some() {
            return Ok(());
        }

        let compositor = self.compositor.as_ref().ok_or("no compositor")?;
        let layer_shell = self.layer_shell.as_ref().ok_or("no layer_shell")?;
        let shm = self.shm.as_ref().ok_or("no shm")?;

        let surface = compositor.create_surface(qh, ());
        let layer_surface = layer_shell.get_layer_surface(
            &surface,
            None,
            zwlr_layer_shell_v1::Layer::Overlay,
            "pinmark-dock".into(),
            qh,
            (),
        );

        // Positioned absolutely from the top-left corner via margins
        layer_surface.set_anchor(Anchor::Top | Anchor::Left);
        let origin = self.dock.state().origin;
        self.margins.request(origin);
        layer_surface.set_margin(origin.y, 0, 0, origin.x);

        layer_surface.set_keyboard_interactivity(KeyboardInteractivity::None);

        // Ignore other surfaces' exclusive zones so margins are screen coordinates
        layer_surface.set_exclusive_zone(-1);

        layer_surface.set_size(WIDGET_W as u32, WIDGET_H as u32);

        self.shm_buf = Some(ShmBuffer::for_dock(shm, qh)?);

        self.surface = Some(surface.clone());
        self.layer_surface = Some(layer_surface);

        self.set_input_region(qh, false);
        surface.commit();
        self.margins.committed();
        Ok(())
    }

    pub fn request_redraw(&mut self) {
        let busy = self.shm_buf.as_ref().is_some_and(|b| b.busy);
        if busy || !self.configured {
            self.pending_redraw = true;
            return;
        }
        if let Err(e) = render::redraw(self) {
            warn!("redraw: {}", e);
        }
    }

    /// Retracted: only the star takes input, the rest passes through.
    /// Deployed: the whole rectangle does. Hidden: nothing does.
    fn set_input_region(&self, qh: &QueueHandle<Self>, deployed: bool) {
        let (Some(compositor), Some(surface)) = (self.compositor.as_ref(), self.surface.as_ref())
        else {
            return;
        };

        let region = compositor.create_region(qh, ());
        match (self.dock.is_hidden(), deployed) {
            (true, _) => {}
            (false, true) => region.add(0, 0, WIDGET_W, WIDGET_H),
            (false, false) => region.add(
                WIDGET_W / 2 - STAR_RADIUS,
                WIDGET_H / 2 - STAR_RADIUS,
                STAR_RADIUS * 2,
                STAR_RADIUS * 2,
            ),
        }
        surface.set_input_region(Some(&region));
        region.destroy();
    }

    /// Margins only take effect on commit, so commit now rather than wait
    /// for the next frame; the attached buffer stays as it is.
    fn move_to(&mut self, origin: Point) {
        self.margins.request(origin);
        let (Some(ls), Some(surface)) = (self.layer_surface.as_ref(), self.surface.as_ref()) else {
            return;
        };
        ls.set_margin(origin.y, 0, 0, origin.x);
        if self.configured {
            surface.commit();
            self.margins.committed();
        }
    }

    pub(crate) fn feed(&mut self, event: DockEvent, qh: &QueueHandle<Self>) {
        let effects = self.dock.handle(event);
        self.apply(effects, qh);
    }

    pub(crate) fn apply(&mut self, effects: Vec<Effect>, qh: &QueueHandle<Self>) {
        let mut repaint = false;
        for effect in effects {
            match effect {
                Effect::MoveTo(origin) => {
                    self.move_to(origin);
                    repaint = true;
                }
                Effect::SetDeployed(deployed) => self.set_input_region(qh, deployed),
                Effect::SetVisible(visible) => {
                    debug!("dock {}", if visible { "shown" } else { "hidden" });
                    self.set_input_region(qh, self.dock.state().is_deployed());
                    repaint = true;
                }
                Effect::Repaint => repaint = true,
                Effect::Persist(_) | Effect::Activate(_) => {}
            }
        }
        if repaint {
            self.request_redraw();
        }
    }

    fn to_screen(&self, surface_x: f64, surface_y: f64) -> Point {
        self.margins.to_screen(surface_x, surface_y)
    }

    /// A view process exited; the dock may have been waiting on it.
    fn refresh_views(&mut self, qh: &QueueHandle<Self>) {
        let effects = self.dock.refresh_views();
        self.apply(effects, qh);
    }

    fn refresh_screen_size(&mut self, qh: &QueueHandle<Self>) {
        if let Some(screen) = self.screen_size() {
            let effects = self.dock.resize(screen);
            if !effects.is_empty() {
                info!("output size {}x{}", screen.width, screen.height);
            }
            self.apply(effects, qh);
        }
    }
}

impl ProvidesRegistryState for App {
    fn registry(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }
    registry_handlers![OutputState];
}

impl OutputHandler for App {
    fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    fn new_output(
        &mut self,
        _conn: &Connection,
        qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
        self.refresh_screen_size(qh);
    }

    fn update_output(
        &mut self,
        _conn: &Connection,
        qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
        self.refresh_screen_size(qh);
    }

    fn output_destroyed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
    }
}

// Dispatch impls
impl Dispatch<wl_compositor::WlCompositor, ()> for App {
    fn event(
        _: &mut Self,
        _: &wl_compositor::WlCompositor,
        _: wl_compositor::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}
impl Dispatch<wl_shm::WlShm, ()> for App {
    fn event(
        _: &mut Self,
        _: &wl_shm::WlShm,
        _: wl_shm::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}
impl Dispatch<wl_shm_pool::WlShmPool, ()> for App {
    fn event(
        _: &mut Self,
        _: &wl_shm_pool::WlShmPool,
        _: wl_shm_pool::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}
impl Dispatch<wl_surface::WlSurface, ()> for App {
    fn event(
        _: &mut Self,
        _: &wl_surface::WlSurface,
        _: wl_surface::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}
impl Dispatch<wl_region::WlRegion, ()> for App {
    fn event(
        _: &mut Self,
        _: &wl_region::WlRegion,
        _: wl_region::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}
impl Dispatch<wl_callback::WlCallback, ()> for App {
    fn event(
        state: &mut Self,
        _: &wl_callback::WlCallback,
        event: wl_callback::Event,
        _: &(),
        _: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        // Only display syncs sent by view watchers use this.
        if let wl_callback::Event::Done { .. } = event {
            state.refresh_views(qh);
        }
    }
}
impl Dispatch<zwlr_layer_shell_v1::ZwlrLayerShellV1, ()> for App {
    fn event(
        _: &mut Self,
        _: &zwlr_layer_shell_v1::ZwlrLayerShellV1,
        _: zwlr_layer_shell_v1::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}

impl Dispatch<zwlr_layer_surface_v1::ZwlrLayerSurfaceV1, ()> for App {
    fn event(
        state: &mut Self,
        proxy: &zwlr_layer_surface_v1::ZwlrLayerSurfaceV1,
        event: zwlr_layer_surface_v1::Event,
        _: &(),
        conn: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        match event {
            zwlr_layer_surface_v1::Event::Configure { serial, width, height } => {
                proxy.ack_configure(serial);
                debug!("layer surface configured {}x{}", width, height);

                state.configured = true;
                if let Err(e) = state.init_cursor(conn, qh) {
                    warn!("{}", e);
                }

                state.pending_redraw = true;
                state.request_redraw();
            }
            zwlr_layer_surface_v1::Event::Closed => {
                info!("layer surface closed by compositor");
                state.closed = true;
            }
            _ => {}
        }
    }
}

impl Dispatch<wl_seat::WlSeat, ()> for App {
    fn event(
        state: &mut Self,
        seat: &wl_seat::WlSeat,
        event: wl_seat::Event,
        _: &(),
        _: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        if let wl_seat::Event::Capabilities { capabilities: WEnum::Value(caps) } = event {
            if caps.contains(wl_seat::Capability::Pointer) && state.pointer.is_none() {
                state.pointer = Some(seat.get_pointer(qh, ()));
            }
        }
    }
}

impl Dispatch<wl_pointer::WlPointer, ()> for App {
    fn event(
        state: &mut Self,
        pointer: &wl_pointer::WlPointer,
        event: wl_pointer::Event,
        _: &(),
        _: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        match event {
            wl_pointer::Event::Enter { serial, surface_x, surface_y, .. } => {
                state.set_cursor_image(pointer, serial);
                state.pointer_at = state.to_screen(surface_x, surface_y);
                state.feed(DockEvent::Enter, qh);
                state.feed(DockEvent::Move(state.pointer_at), qh);
            }
            wl_pointer::Event::Leave { .. } => {
                state.feed(DockEvent::Exit, qh);
            }
            wl_pointer::Event::Motion { surface_x, surface_y, .. } => {
                state.pointer_at = state.to_screen(surface_x, surface_y);
                state.feed(DockEvent::Move(state.pointer_at), qh);
            }
            wl_pointer::Event::Button { button, state: btn_state, .. } => {
                if button != BTN_LEFT {
                    return;
                }
                let at = state.pointer_at;
                match btn_state {
                    WEnum::Value(wl_pointer::ButtonState::Pressed) => {
                        state.feed(DockEvent::Press(at), qh)
                    }
                    WEnum::Value(wl_pointer::ButtonState::Released) => {
                        state.feed(DockEvent::Release(at), qh)
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

impl Dispatch<wl_buffer::WlBuffer, ()> for App {
    fn event(
        state: &mut Self,
        buffer: &wl_buffer::WlBuffer,
        event: wl_buffer::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        if let wl_buffer::Event::Release = event {
            if let Some(sb) = state.shm_buf.as_mut() {
                if &sb.buffer == buffer {
                    sb.busy = false;
                }
            }
            if state.pending_redraw {
                state.request_redraw();
            }
        }
    }
}

// SCTK delegates
smithay_client_toolkit::delegate_output!(App);
smithay_client_toolkit::delegate_registry!(App);
