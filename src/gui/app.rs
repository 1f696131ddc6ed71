use crate::carousel::{Carousel, CarouselHooks, FrameScheduler, PointerKind};
use crate::config::{self, Category, Config, Lang};
use crate::events::AppEvent;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::{CAROUSEL_HEIGHT, FOOTER_HEIGHT, HERO_HEIGHT, view};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// The category cards plus the language they render in. Shared between
/// the component and the draw closure.
pub struct Deck {
    pub lang: Lang,
    pub categories: Vec<Category>,
}

pub struct AppModel {
    pub carousel: Rc<RefCell<Carousel>>,
    pub deck: Rc<RefCell<Deck>>,
    pub active_title: String,
    pub drawing_area: gtk::DrawingArea,
    pub scroller: gtk::ScrolledWindow,
}

#[derive(Debug)]
pub enum AppMsg {
    Tick,
    DragBegin(f64, PointerKind),
    DragMove(f64),
    DragEnd,
    CategorySelected(usize),
    LeaveCarousel,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// [`FrameScheduler`] backed by the widget frame clock. Each request
/// arms a one-shot tick callback that feeds [`AppMsg::Tick`] back into
/// the component, so engine frames stay aligned with paint frames.
struct WidgetFrameClock {
    area: gtk::DrawingArea,
    sender: relm4::Sender<AppMsg>,
    live: Rc<Cell<bool>>,
}

impl WidgetFrameClock {
    fn new(area: gtk::DrawingArea, sender: relm4::Sender<AppMsg>) -> Self {
        Self {
            area,
            sender,
            live: Rc::new(Cell::new(true)),
        }
    }
}

impl FrameScheduler for WidgetFrameClock {
    fn request_tick(&self) {
        if !self.live.get() {
            return;
        }
        let sender = self.sender.clone();
        let live = self.live.clone();
        self.area.add_tick_callback(move |_, _| {
            if live.get() {
                let _ = sender.send(AppMsg::Tick);
            }
            glib::ControlFlow::Break
        });
    }

    fn cancel(&self) {
        self.live.set(false);
    }
}

fn title_of(deck: &Deck, index: usize) -> String {
    deck.categories
        .get(index)
        .map(|c| c.title(deck.lang).to_string())
        .unwrap_or_default()
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Moukhtalif"),
            set_default_size: (1100, 760),
            add_css_class: "gyre-window",

            connect_close_request[carousel] => move |_| {
                carousel.borrow_mut().teardown();
                glib::Propagation::Proceed
            },

            #[local_ref]
            scroller -> gtk::ScrolledWindow {
                set_hscrollbar_policy: gtk::PolicyType::Never,

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_valign: gtk::Align::Center,
                        set_height_request: HERO_HEIGHT,
                        set_spacing: 12,
                        add_css_class: "gyre-hero",

                        gtk::Label {
                            set_label: "Moukhtalif",
                            add_css_class: "gyre-hero-title",
                        },
                        gtk::Label {
                            set_label: "A creative agency for brands that move",
                            add_css_class: "gyre-hero-sub",
                        },
                    },

                    gtk::Label {
                        #[watch]
                        set_label: &model.active_title,
                        add_css_class: "gyre-section-title",
                    },

                    #[local_ref]
                    drawing_area -> gtk::DrawingArea {
                        set_height_request: CAROUSEL_HEIGHT,
                        set_hexpand: true,
                        add_css_class: "gyre-carousel",

                        add_controller = gtk::EventControllerScroll::new(
                            gtk::EventControllerScrollFlags::VERTICAL,
                        ) {
                            connect_scroll[carousel] => move |_, _dx, dy| {
                                // the engine decides who owns the event;
                                // Stop suppresses the page scroll
                                if carousel.borrow_mut().wheel(dy) {
                                    glib::Propagation::Stop
                                } else {
                                    glib::Propagation::Proceed
                                }
                            }
                        },

                        add_controller = gtk::GestureDrag {
                            connect_drag_begin[sender] => move |gesture, x, _| {
                                let kind = if gesture
                                    .device()
                                    .is_some_and(|d| d.source() == gdk4::InputSource::Touchscreen)
                                {
                                    PointerKind::Touch
                                } else {
                                    PointerKind::Mouse
                                };
                                sender.input(AppMsg::DragBegin(x, kind));
                            },
                            connect_drag_update[sender] => move |gesture, dx, _| {
                                if let Some((start_x, _)) = gesture.start_point() {
                                    sender.input(AppMsg::DragMove(start_x + dx));
                                }
                            },
                            connect_drag_end[sender] => move |_, _, _| {
                                sender.input(AppMsg::DragEnd);
                            }
                        }
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_valign: gtk::Align::Center,
                        set_height_request: FOOTER_HEIGHT,
                        set_spacing: 8,
                        add_css_class: "gyre-footer",

                        gtk::Label {
                            set_label: "hello@moukhtalif.example",
                            add_css_class: "gyre-footer-line",
                        },
                        gtk::Label {
                            set_label: "Riyadh · Dubai · Cairo",
                            add_css_class: "gyre-footer-line",
                        },
                    },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (cfg, rx) = init;

        theme::load_css();

        let drawing_area = gtk::DrawingArea::default();
        let scroller = gtk::ScrolledWindow::default();
        let deck = Rc::new(RefCell::new(Deck {
            lang: cfg.language,
            categories: cfg.categories,
        }));

        let clock =
            WidgetFrameClock::new(drawing_area.clone(), sender.input_sender().clone());

        let hooks = CarouselHooks::new()
            .on_select({
                let sender = sender.input_sender().clone();
                move |i| {
                    let _ = sender.send(AppMsg::CategorySelected(i));
                }
            })
            .on_swap_right({
                let sender = sender.input_sender().clone();
                move || {
                    let _ = sender.send(AppMsg::LeaveCarousel);
                }
            });

        let item_count = deck.borrow().categories.len().max(1);
        let carousel = Carousel::new(item_count, hooks, Box::new(clock))
            .expect("item count is at least one");
        let carousel = Rc::new(RefCell::new(carousel));

        let active_title = title_of(&deck.borrow(), 0);

        let model = AppModel {
            carousel: carousel.clone(),
            deck: deck.clone(),
            active_title,
            drawing_area: drawing_area.clone(),
            scroller: scroller.clone(),
        };

        let widgets = view_output!();

        let draw_carousel = carousel.clone();
        let draw_deck = deck.clone();
        drawing_area.set_draw_func(move |area, cr, w, h| {
            let colors = ThemeColors::from_context(&area.style_context());
            let frame = draw_carousel.borrow().snapshot();
            if let Err(e) = view::draw(cr, &frame, &draw_deck.borrow(), &colors, w as f64, h as f64)
            {
                log::error!("Drawing error: {}", e);
            }
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
            AppMsg::Tick => {
                self.carousel.borrow_mut().tick();
                self.drawing_area.queue_draw();
            }
            AppMsg::DragBegin(x, kind) => {
                self.carousel.borrow_mut().pointer_down(x, kind);
            }
            AppMsg::DragMove(x) => {
                self.carousel.borrow_mut().pointer_move(x);
            }
            AppMsg::DragEnd => {
                self.carousel.borrow_mut().pointer_up();
            }
            AppMsg::CategorySelected(index) => {
                self.active_title = title_of(&self.deck.borrow(), index);
            }
            AppMsg::LeaveCarousel => {
                // escape past the first card returns the page to the hero
                self.scroller.vadjustment().set_value(0.0);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new) if !new.categories.is_empty() => {
                    let count = new.categories.len();
                    {
                        let mut deck = self.deck.borrow_mut();
                        deck.lang = new.language;
                        deck.categories = new.categories;
                    }
                    if let Err(e) = self.carousel.borrow_mut().set_item_count(count) {
                        log::error!("Failed to apply reloaded categories: {}", e);
                        return;
                    }
                    self.active_title = title_of(&self.deck.borrow(), 0);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded ({} categories)", count);
                }
                Ok(_) => log::warn!("Ignoring reloaded config with no categories"),
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
