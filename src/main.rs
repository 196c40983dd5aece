// filepath: src/main.rs

mod app;
mod config_watch;
mod wayland;

use app::AppData;
use calloop::{channel, EventLoop};
use calloop_wayland_source::WaylandSource;
use initials_badge::config::BadgeConfig;
use log::{info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    shell::wlr_layer::{Layer, LayerShell},
    shm::{slot::SlotPool, Shm},
};
use wayland_client::{globals::registry_queue_init, Connection};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting initials-badge");

    let config = BadgeConfig::load_from_file()
        .unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {}", e);
            BadgeConfig::default()
        })
        .resolved();
    info!("Configuration loaded");

    let conn = Connection::connect_to_env()?;
    let (globals, event_queue) = registry_queue_init(&conn)?;
    let qh = event_queue.handle();

    let compositor = CompositorState::bind(&globals, &qh)?;
    let layer_shell = LayerShell::bind(&globals, &qh)?;
    let shm = Shm::bind(&globals, &qh)?;

    let side = config.diameter.max(1) as usize;
    let pool_size = side
        .checked_mul(side)
        .and_then(|n| n.checked_mul(4))
        .ok_or("badge diameter too large for an shm pool")?;
    let pool = SlotPool::new(pool_size, &shm)?;

    let surface = compositor.create_surface(&qh);
    let layer_surface =
        layer_shell.create_layer_surface(&qh, surface, Layer::Top, Some("initials-badge"), None);

    let mut app_data = AppData::new(
        RegistryState::new(&globals),
        OutputState::new(&globals, &qh),
        compositor,
        shm,
        layer_surface,
        pool,
        config,
    );

    let mut event_loop: EventLoop<AppData> = EventLoop::try_new()?;
    WaylandSource::new(conn.clone(), event_queue)
        .insert(event_loop.handle())
        .map_err(|e| e.error)?;

    let (tx, rx) = channel::channel();
    let _watcher = match config_watch::setup_config_watcher(tx) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!("Config hot reload disabled: {}", e);
            None
        }
    };
    event_loop
        .handle()
        .insert_source(rx, |event, _, app: &mut AppData| {
            if let channel::Event::Msg(event) = event {
                log::debug!("Config file event: {:?}", event.kind);
                app.reload_config();
            }
        })
        .map_err(|e| e.error)?;

    info!("Entering event loop");
    while !app_data.exit {
        event_loop.dispatch(None, &mut app_data)?;
        app_data.flush_redraw()?;
    }

    info!("Exiting");
    Ok(())
}
