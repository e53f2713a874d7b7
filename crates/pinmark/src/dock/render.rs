// License: MIT

use eventline::warn;

use pinmark_dock::layout::{WIDGET_H, WIDGET_W};

use super::app::App;
use super::pixels;

pub(crate) fn redraw(app: &mut App) -> Result<(), String> {
    if !app.configured {
        app.pending_redraw = true;
        return Ok(());
    }

    let sb = app.shm_buf.as_mut().ok_or("no shm buffer")?;
    if sb.busy {
        app.pending_redraw = true;
        return Ok(());
    }

    let frame = match app.dock.render() {
        Ok(f) => f,
        Err(e) => {
            warn!("dock render failed: {}", e);
            return Err(e.to_string());
        }
    };

    pixels::copy_rgba_to_argb(frame.data(), sb.pixels_mut());

    let surface = app.surface.as_ref().ok_or("no surface")?;
    surface.attach(Some(&sb.buffer), 0, 0);
    surface.damage_buffer(0, 0, WIDGET_W, WIDGET_H);
    surface.commit();
    sb.busy = true;
    app.margins.committed();

    app.pending_redraw = false;
    Ok(())
}
