// filepath: src/app.rs
//! Host application state for initials-badge

use initials_badge::config::{BadgeConfig, ResolvedBadgeConfig};
use initials_badge::{Canvas, Color, PlaceholderBadgeView, RedrawFlag};
use log::{debug, info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    shell::{
        wlr_layer::{Anchor, KeyboardInteractivity, LayerSurface},
        WaylandSurface,
    },
    shm::{slot::SlotPool, Shm},
};
use wayland_client::protocol::wl_shm;

pub struct AppData {
    registry_state: RegistryState,
    output_state: OutputState,
    _compositor_state: CompositorState,
    shm_state: Shm,
    layer_surface: Option<LayerSurface>,
    pool: SlotPool,
    configured: bool,
    config: ResolvedBadgeConfig,
    badge: PlaceholderBadgeView<RedrawFlag>,
    redraw: RedrawFlag,
    pub(crate) exit: bool,
}

impl AppData {
    pub fn new(
        registry_state: RegistryState,
        output_state: OutputState,
        compositor_state: CompositorState,
        shm_state: Shm,
        layer_surface: LayerSurface,
        pool: SlotPool,
        config: ResolvedBadgeConfig,
    ) -> Self {
        let redraw = RedrawFlag::new();
        let mut badge = PlaceholderBadgeView::new(config.diameter, redraw.clone());
        badge.batch_update(
            Some(&config.initials),
            Some(config.circle_color),
            Some(config.text_color),
            config.load_font(),
        );

        info!("Configuring layer surface");
        layer_surface.set_anchor(Anchor::TOP | Anchor::RIGHT);
        layer_surface.set_keyboard_interactivity(KeyboardInteractivity::None);
        layer_surface.set_size(config.diameter, config.diameter);
        layer_surface.set_exclusive_zone(-1);
        layer_surface.set_margin(config.margin, config.margin, config.margin, config.margin);
        info!("Committing layer surface configuration");
        layer_surface.wl_surface().commit();

        Self {
            registry_state,
            output_state,
            _compositor_state: compositor_state,
            shm_state,
            layer_surface: Some(layer_surface),
            pool,
            configured: false,
            config,
            badge,
            redraw,
            exit: false,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn set_configured(&mut self, configured: bool) {
        self.configured = configured;
    }

    /// Draw once if the badge asked for a redraw since the last call
    pub fn flush_redraw(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if self.configured && self.redraw.is_pending() {
            self.draw()?;
        }
        Ok(())
    }

    pub fn draw(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.configured {
            debug!("draw() called before surface is configured, skipping");
            return Ok(());
        }
        self.redraw.take();
        let Some(layer_surface) = &self.layer_surface else {
            return Ok(());
        };

        let frame = self.badge.frame();
        let (width, height) = (frame.width, frame.height);
        let stride = i32::try_from(width)
            .ok()
            .and_then(|w| w.checked_mul(4))
            .ok_or("badge too large for an shm buffer")?;
        debug!("Drawing badge {}x{}", width, height);

        let (buffer, pixels) = self.pool.create_buffer(
            width as i32,
            height as i32,
            stride,
            wl_shm::Format::Argb8888,
        )?;

        let mut canvas = Canvas::new(pixels, width, height);
        canvas.clear(Color::TRANSPARENT);
        self.badge.draw(&mut canvas, frame);

        buffer
            .attach_to(layer_surface.wl_surface())
            .map_err(|e| format!("buffer attach: {:?}", e))?;
        layer_surface
            .wl_surface()
            .damage_buffer(0, 0, width as i32, height as i32);
        layer_surface.wl_surface().commit();

        Ok(())
    }

    /// Re-read the config file and apply it with a single batch update
    pub fn reload_config(&mut self) {
        let config = match BadgeConfig::load_from_file() {
            Ok(config) => config.resolved(),
            Err(e) => {
                warn!("Ignoring config change, failed to load: {}", e);
                return;
            }
        };
        if config == self.config {
            debug!("Config unchanged");
            return;
        }
        if config.diameter != self.config.diameter {
            warn!(
                "Diameter changed from {} to {}; restart to apply",
                self.config.diameter, config.diameter
            );
        }

        let font = if config.font_path != self.config.font_path {
            Some(config.load_font().unwrap_or_default())
        } else {
            None
        };
        info!("Applying reloaded config");
        self.badge.batch_update(
            Some(&config.initials),
            Some(config.circle_color),
            Some(config.text_color),
            font,
        );
        self.config = config;
    }

    pub fn registry_state(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }

    pub fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    pub fn shm_state(&mut self) -> &mut Shm {
        &mut self.shm_state
    }

    pub fn close_layer_surface(&mut self) {
        self.layer_surface = None;
        self.exit = true;
        info!("Layer surface closed");
    }
}
