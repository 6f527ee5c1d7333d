use gtk4 as gtk;
use ringprogress::TickHandle;

/// Frame clock callback registered with `add_tick_callback`.
pub struct FrameTicker(gtk::TickCallbackId);

impl FrameTicker {
    pub fn new(id: gtk::TickCallbackId) -> Self {
        Self(id)
    }
}

impl TickHandle for FrameTicker {
    fn cancel(self: Box<Self>) {
        self.0.remove();
    }
}
