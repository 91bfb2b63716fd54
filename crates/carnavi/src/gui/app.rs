use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::bitmaps::Bitmaps;
use crate::gui::canvas::CairoCanvas;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use gtk::prelude::*;
use gtk4 as gtk;
use navring::{CarNavigationView, PartColors, ScriptedDriver, StateKind};
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct AppModel {
    pub view: Rc<RefCell<CarNavigationView>>,
    pub driver: Rc<RefCell<Option<ScriptedDriver>>>,
    pub bitmaps: Rc<RefCell<Bitmaps>>,
    pub config: Config,
    pub visible: bool,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Progress(f64),
    SwitchState(StateKind),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Progress(p) => AppMsg::Progress(p),
            AppEvent::SwitchState(kind) => AppMsg::SwitchState(kind),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    /// Manual control takes over from the demo route.
    fn stop_driver(&self) {
        if let Some(driver) = self.driver.borrow_mut().as_mut()
            && !driver.is_finished()
        {
            driver.cancel();
            log::info!("Demo route cancelled by external command");
        }
    }

    fn part_colors(&self) -> PartColors {
        ThemeColors::from_context(&self.drawing_area.style_context(), &self.config.colors)
    }

    fn redraw_if_needed(&self) {
        if self.view.borrow().take_redraw() {
            self.drawing_area.queue_draw();
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, bool, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            #[watch]
            set_visible: model.visible,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Hide);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                set_content_width: initial_size.width,
                set_content_height: initial_size.height,
                add_css_class: "carnavi-drawing-area",
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, demo, rx) = init;

        theme::load_css();
        window::init_window(&root, config.width);

        let mut view = CarNavigationView::new(config.dimens, PartColors::default());
        let initial_size = view.on_measure(config.width);

        let driver = (demo && config.driver.enabled).then(|| ScriptedDriver::new(&config.driver));
        if driver.is_none() {
            view.set_state(config.initial_state);
        }

        let model = AppModel {
            view: Rc::new(RefCell::new(view)),
            driver: Rc::new(RefCell::new(driver)),
            bitmaps: Rc::new(RefCell::new(Bitmaps::load(&config.dimens))),
            config,
            visible: true,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        let colors = model.part_colors();
        model.view.borrow_mut().set_colors(colors);

        let view_draw = model.view.clone();
        let bitmaps_draw = model.bitmaps.clone();
        widgets.drawing_area.set_draw_func(move |_, cr, _, _| {
            let bitmaps = bitmaps_draw.borrow();
            let mut canvas = CairoCanvas::new(cr, &bitmaps);
            if let Err(e) = view_draw.borrow().draw(&mut canvas) {
                log::error!("Drawing error: {}", e);
            }
        });

        let view_resize = model.view.clone();
        widgets.drawing_area.connect_resize(move |area, width, _| {
            let size = view_resize.borrow_mut().on_measure(width);
            window::apply_view_size(area, size);
        });

        let view_tick = model.view.clone();
        let driver_tick = model.driver.clone();
        let origin = Cell::new(None);
        widgets.drawing_area.add_tick_callback(move |area, clock| {
            let now = window::frame_elapsed(clock, &origin);
            let mut view = view_tick.borrow_mut();
            match driver_tick.borrow_mut().as_mut() {
                Some(driver) if !driver.is_finished() => driver.advance(now, &mut view),
                _ => view.tick(now),
            }
            if view.take_redraw() {
                area.queue_draw();
            }
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                self.visible = true;
                self.drawing_area.queue_draw();
            }
            AppMsg::Hide => {
                self.visible = false;
            }
            AppMsg::Progress(progress) => {
                self.stop_driver();
                let mut view = self.view.borrow_mut();
                if view.state().is_none() {
                    view.set_state(self.config.initial_state);
                }
                view.set_progress(progress);
            }
            AppMsg::SwitchState(kind) => {
                self.stop_driver();
                self.view.borrow_mut().set_state(kind);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.config = new_config;
                    *self.bitmaps.borrow_mut() = Bitmaps::load(&self.config.dimens);
                    let colors = self.part_colors();
                    let size = {
                        let mut view = self.view.borrow_mut();
                        view.set_dimens(self.config.dimens);
                        view.set_colors(colors);
                        view.dimens().view_size
                    };
                    window::apply_view_size(&self.drawing_area, size);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
        self.redraw_if_needed();
    }
}
