// License: MIT

use std::fs::File;
use std::os::fd::AsFd;

use memmap2::MmapMut;
use tempfile::tempfile;

use wayland_client::protocol::{wl_buffer, wl_shm, wl_shm_pool};
use wayland_client::QueueHandle;

use pinmark_dock::layout::{WIDGET_H, WIDGET_W};

use super::app::App;

const STRIDE: i32 = WIDGET_W * 4;
const LEN: usize = (STRIDE * WIDGET_H) as usize;

/// One widget-sized ARGB8888 buffer in an anonymous file. The dock never
/// resizes, so a single buffer plus a busy flag is enough.
pub struct ShmBuffer {
    _file: File,
    mmap: MmapMut,
    _pool: wl_shm_pool::WlShmPool,
    pub buffer: wl_buffer::WlBuffer,
    pub busy: bool,
}

impl ShmBuffer {
    pub fn for_dock(shm: &wl_shm::WlShm, qh: &QueueHandle<App>) -> Result<Self, String> {
        let file = tempfile().map_err(|e| format!("shm tempfile: {e}"))?;
        file.set_len(LEN as u64)
            .map_err(|e| format!("shm set_len: {e}"))?;

        // SAFETY: the file is private to this process and never truncated.
        let mmap = unsafe { MmapMut::map_mut(&file).map_err(|e| format!("shm mmap: {e}"))? };

        let pool = shm.create_pool(file.as_fd(), LEN as i32, qh, ());
        let buffer = pool.create_buffer(
            0,
            WIDGET_W,
            WIDGET_H,
            STRIDE,
            wl_shm::Format::Argb8888,
            qh,
            (),
        );

        Ok(Self {
            _file: file,
            mmap,
            _pool: pool,
            buffer,
            busy: false,
        })
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.mmap[..LEN]
    }
}
