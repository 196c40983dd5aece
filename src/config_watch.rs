// filepath: src/config_watch.rs
use calloop::channel::Sender;
use initials_badge::config::BadgeConfig;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

/// Watch the config directory and forward events touching the config file.
///
/// The returned watcher must be kept alive for events to keep flowing.
pub fn setup_config_watcher(
    tx: Sender<notify::Event>,
) -> Result<RecommendedWatcher, Box<dyn std::error::Error>> {
    let config_path = BadgeConfig::get_config_path();
    let parent = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let file_name = config_path.file_name().map(|name| name.to_os_string());

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: notify::Result<notify::Event>| {
            if let Ok(event) = res {
                if touches_config(&event, file_name.as_deref()) {
                    let _ = tx.send(event);
                }
            }
        },
        notify::Config::default(),
    )?;
    watcher.watch(&parent, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

fn touches_config(event: &notify::Event, file_name: Option<&std::ffi::OsStr>) -> bool {
    let relevant_kind = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_));
    relevant_kind
        && event
            .paths
            .iter()
            .any(|p: &PathBuf| p.file_name() == file_name)
}
