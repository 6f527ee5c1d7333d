use crate::cli::Cli;
use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::canvas::CairoCanvas;
use crate::gui::theme;
use crate::gui::ticker::FrameTicker;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use ringprogress::{MeasureSpec, RingProgress, TickOutcome};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub struct AppModel {
    pub rings: Rc<RefCell<RingProgress>>,
    pub config: Config,
    pub cli: Cli,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Replay,
    SweepFinished,
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, Cli, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Rings"),
            set_default_size: (360, 480),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Escape => sender.input(AppMsg::Quit),
                        gtk::gdk::Key::r | gtk::gdk::Key::R => sender.input(AppMsg::Replay),
                        _ => return glib::Propagation::Proceed,
                    }
                    glib::Propagation::Stop
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: theme::DRAWING_AREA_CLASS,
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, cli, rx) = init;

        theme::load_css();

        let model = AppModel {
            rings: Rc::new(RefCell::new(config.build_view())),
            config,
            cli,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let rings_resize = model.rings.clone();
        widgets.drawing_area.connect_resize(move |_, width, height| {
            rings_resize
                .borrow_mut()
                .measure(MeasureSpec::at_most(width as f64, height as f64));
        });

        let rings_draw = model.rings.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let mut canvas = CairoCanvas::new(cr, width as f64, height as f64);
                if let Err(e) = rings_draw.borrow_mut().draw(&mut canvas) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        sender.input(AppMsg::Replay);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Replay => self.replay(sender),
            AppMsg::SweepFinished => log::info!("Sweep finished"),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.config = self.cli.apply_to(new_config);
                    self.config.apply(&mut self.rings.borrow_mut());
                    log::info!("Configuration reloaded");
                    self.replay(sender);
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Quit => relm4::main_application().quit(),
        }
    }
}

impl AppModel {
    /// Restarts the sweep toward the configured values, driven by the
    /// drawing area's frame clock.
    fn replay(&self, sender: ComponentSender<Self>) {
        {
            let mut rings = self.rings.borrow_mut();
            rings.set_progress_list(self.config.progress_values());
            rings.redraw_with(Some(Box::new(move || {
                sender.input(AppMsg::SweepFinished)
            })));
        }

        let rings_tick = self.rings.clone();
        let id = self.drawing_area.add_tick_callback(move |area, clock| {
            let now = Duration::from_micros(clock.frame_time().max(0) as u64);
            let outcome = rings_tick.borrow_mut().tick(now);
            area.queue_draw();
            match outcome {
                TickOutcome::Continue => glib::ControlFlow::Continue,
                TickOutcome::Finished | TickOutcome::Idle => glib::ControlFlow::Break,
            }
        });
        self.rings
            .borrow_mut()
            .attach_ticker(Box::new(FrameTicker::new(id)));
    }
}
