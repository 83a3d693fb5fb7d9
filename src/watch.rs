use std::path::PathBuf;
use std::sync::mpsc::{Receiver, channel};

/// Watches a single config file on a background thread. Each change event
/// becomes one `()` on the returned channel.
pub fn watch_file(path: PathBuf) -> Receiver<()> {
    let (tx, rx) = channel::<()>();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        let watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        });
        let mut watcher = match watcher {
            Ok(w) => w,
            Err(e) => {
                log::warn!("config watcher unavailable: {}", e);
                return;
            }
        };
        if let Err(e) = watcher.watch(&path, RecursiveMode::NonRecursive) {
            log::warn!("cannot watch {}: {}", path.display(), e);
            return;
        }
        log::info!("watching {} for changes", path.display());
        loop {
            std::thread::sleep(std::time::Duration::from_secs(3600));
        }
    });
    rx
}
