use crate::error::Result;
use crate::ui::host::EguiHost;
use crate::ui::input::PointerTracker;
use crate::widget::{AnimatedButton, ButtonProps, WidgetSettings};
use egui::{Align2, Color32, FontId, Rect, Sense, Stroke, StrokeKind, pos2, vec2};
use log::{error, info};
use std::time::Instant;

const ANCHOR_FONT_SIZE: f32 = 28.0;
const LABEL_FONT_SIZE: f32 = 16.0;

/// Desktop window hosting one widget.
pub struct ButtonApp {
    host: EguiHost,
    button: AnimatedButton,
    tracker: PointerTracker,
    last_frame: Instant,
}

impl ButtonApp {
    pub fn new(cc: &eframe::CreationContext<'_>, props: ButtonProps, settings: WidgetSettings) -> Result<Self> {
        let mut host = EguiHost::new(cc.egui_ctx.clone());
        let button = AnimatedButton::mount(props, settings, &mut host)?;
        Ok(Self {
            host,
            button,
            tracker: PointerTracker::new(),
            last_frame: Instant::now(),
        })
    }

    /// Paints the surface, anchor and pulse label; returns whether the anchor is hovered.
    fn draw(&self, ui: &mut egui::Ui) -> bool {
        let props = self.button.props();
        let size = vec2(props.width() as f32, props.height() as f32);
        let rect = Rect::from_center_size(ui.max_rect().center(), size);
        let painter = ui.painter_at(rect);

        // 1. 3D surface
        if let Some(texture) = self.host.texture() {
            painter.image(
                texture.id(),
                rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        // 2. Anchor
        let galley = painter.layout_no_wrap(
            props.text().to_string(),
            FontId::proportional(ANCHOR_FONT_SIZE),
            Color32::from_gray(20),
        );
        let anchor_rect = Rect::from_center_size(rect.center(), galley.size() + vec2(48.0, 20.0));
        let hovered = ui
            .interact(anchor_rect, ui.id().with("button_anchor"), Sense::hover())
            .hovered();
        painter.rect_stroke(anchor_rect, 6.0, Stroke::new(1.5, Color32::from_gray(20)), StrokeKind::Inside);
        painter.galley(anchor_rect.center() - galley.size() / 2.0, galley, Color32::from_gray(20));

        // 3. Pulse label
        let label = self.button.label();
        painter.text(
            anchor_rect.center_bottom() + vec2(0.0, 24.0),
            Align2::CENTER_CENTER,
            &label.text,
            FontId::proportional(LABEL_FONT_SIZE * label.scale),
            Color32::from_rgb(0xf2, 0x05, 0x6f),
        );

        hovered
    }
}

impl eframe::App for ButtonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let hovered = egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(Color32::WHITE))
            .show(ctx, |ui| self.draw(ui))
            .inner;

        for event in self.tracker.collect(ctx, hovered) {
            if self.host.is_subscribed(event.kind()) {
                self.button.handle_event(event);
            }
        }

        if self.host.take_frame_request() {
            let now = Instant::now();
            let dt = (now - self.last_frame).as_secs_f32();
            self.last_frame = now;

            let window = ctx.input(|i| i.screen_rect().size());
            if let Err(e) = self.button.on_frame(dt, (window.x, window.y), &mut self.host) {
                error!("Frame failed: {}", e);
            }
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.button.unmount(&mut self.host);
        info!("Window closed");
    }
}
