// License: MIT

use eventline::{info, warn};

use pinmark_dock::Dock;

use smithay_client_toolkit::{output::OutputState, registry::RegistryState};

use wayland_client::{
    globals::registry_queue_init,
    protocol::{wl_compositor, wl_seat, wl_shm},
    Connection,
};

use wayland_protocols_wlr::layer_shell::v1::client::zwlr_layer_shell_v1;

use crate::views::ExitSignal;

use super::app::App;

/// Shows the dock until the compositor closes its surface. The dock may be
/// built for a guessed screen size; it is re-docked once outputs report in.
///
/// View processes exit on their own threads; `exits` is wired to a display
/// sync so the loop wakes and the dock can react.
pub fn run_dock(dock: Dock, exits: &ExitSignal) -> Result<(), String> {
    let conn = Connection::connect_to_env().map_err(|e| format!("wayland connect: {e}"))?;

    let (globals, mut queue) =
        registry_queue_init(&conn).map_err(|e| format!("registry init: {e}"))?;
    let qh = queue.handle();

    let registry_state = RegistryState::new(&globals);
    let output_state = OutputState::new(&globals, &qh);

    let mut app = App::new(registry_state, output_state, dock);

    {
        let conn = conn.clone();
        let qh = qh.clone();
        exits.install(move || {
            conn.display().sync(&qh, ());
            let _ = conn.flush();
        });
    }

    app.compositor = globals
        .bind::<wl_compositor::WlCompositor, _, _>(&qh, 1..=6, ())
        .ok();
    app.shm = globals.bind::<wl_shm::WlShm, _, _>(&qh, 1..=1, ()).ok();
    app.seat = globals.bind::<wl_seat::WlSeat, _, _>(&qh, 1..=7, ()).ok();
    app.layer_shell = globals
        .bind::<zwlr_layer_shell_v1::ZwlrLayerShellV1, _, _>(&qh, 1..=4, ())
        .ok();

    queue.roundtrip(&mut app).map_err(|e| format!("roundtrip: {e}"))?;

    if app.compositor.is_none() {
        return Err("wl_compositor not available".into());
    }
    if app.layer_shell.is_none() {
        return Err("zwlr_layer_shell_v1 not available".into());
    }
    if app.shm.is_none() {
        return Err("wl_shm not available".into());
    }
    if app.seat.is_none() {
        return Err("wl_seat not available".into());
    }

    // Output geometry arrives over the first roundtrips.
    queue.roundtrip(&mut app).map_err(|e| format!("roundtrip2: {e}"))?;
    match app.screen_size() {
        Some(s) => info!("screen {}x{}", s.width, s.height),
        None => {
            let s = app.dock.state().screen;
            warn!("no output size reported; assuming {}x{}", s.width, s.height);
        }
    }

    app.ensure_surface(&qh)?;
    app.init_cursor(&conn, &qh)?;

    queue.roundtrip(&mut app).map_err(|e| format!("roundtrip3: {e}"))?;

    while !app.closed {
        queue
            .blocking_dispatch(&mut app)
            .map_err(|e| format!("dispatch: {e}"))?;
        let _ = conn.flush();
    }

    info!("dock closed");
    Ok(())
}
