use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use ringprogress::{Explanation, HexColor, LayoutConfig, PaintRole, RingProgress};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RingConfig {
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub explain: Explanation,
    #[serde(default)]
    pub colors: HashMap<PaintRole, HexColor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_ring_count")]
    pub ring_count: usize,
    #[serde(default)]
    pub ring_thickness: Option<f64>,
    #[serde(default)]
    pub ring_spacing: Option<f64>,
    #[serde(default)]
    pub show_progress_hint: bool,
    #[serde(default = "default_show_legend")]
    pub show_legend: bool,
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
    #[serde(default)]
    pub rings: Vec<RingConfig>,
}

fn default_ring_count() -> usize {
    1
}

fn default_show_legend() -> bool {
    true
}

fn default_scale_factor() -> f64 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ring_count: default_ring_count(),
            ring_thickness: None,
            ring_spacing: None,
            show_progress_hint: false,
            show_legend: default_show_legend(),
            scale_factor: default_scale_factor(),
            rings: Vec::new(),
        }
    }
}

impl Config {
    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            thickness: self.ring_thickness.into(),
            spacing: self.ring_spacing.into(),
            show_progress_hint: self.show_progress_hint,
            show_legend: self.show_legend,
        }
    }

    /// Target value of every ring, zero-padded to `ring_count`.
    pub fn progress_values(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.rings.iter().map(|r| r.progress).collect();
        values.resize(self.ring_count, 0.0);
        values
    }

    pub fn explanations(&self) -> Vec<Explanation> {
        let mut explanations: Vec<Explanation> =
            self.rings.iter().map(|r| r.explain.clone()).collect();
        explanations.resize(self.ring_count, Explanation::default());
        explanations
    }

    pub fn build_view(&self) -> RingProgress {
        let mut view = RingProgress::new(self.ring_count, self.scale_factor);
        self.apply(&mut view);
        view
    }

    /// Pushes ring count, layout options, values and colors into `view`.
    pub fn apply(&self, view: &mut RingProgress) {
        if self.rings.len() > self.ring_count {
            log::warn!(
                "{} rings configured but ring_count is {}; extra entries ignored",
                self.rings.len(),
                self.ring_count
            );
        }

        view.set_ring_count(self.ring_count);
        match self.ring_thickness {
            Some(thickness) => view.pin_thickness(thickness),
            None => view.release_thickness(),
        }
        match self.ring_spacing {
            Some(spacing) => view.pin_spacing(spacing),
            None => view.release_spacing(),
        }
        view.set_show_progress_hint(self.show_progress_hint);
        view.set_show_legend(self.show_legend);
        view.set_progress_list(self.progress_values());
        view.set_explain_list(self.explanations());

        for (index, ring) in self.rings.iter().enumerate().take(self.ring_count) {
            for (&role, &color) in &ring.colors {
                if let Err(e) = view.set_color(index, role, *color) {
                    log::warn!("Skipping {} color for ring {}: {}", role, index, e);
                }
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "ringprogress", "ringview")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("RINGS").try_parsing(true))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// True for create/modify/remove events on `config_path`.
fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

fn watch_dir(
    dir: &Path,
    bridge_tx: Sender<notify::Result<notify::Event>>,
) -> Result<RecommendedWatcher, ConfigError> {
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Watches the config directory and sends `ConfigReload` whenever the config
/// file changes. Returns when the receiving side hangs up.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    // Dropping the watcher stops the notifications.
    let _watcher = match watch_dir(&config_dir, bridge_tx) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to watch {}: {}", config_dir.display(), e);
            return;
        }
    };
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if is_config_change(&event, &config_path) => {
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use ringprogress::{Dimension, MeasureSpec};

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config_parses() {
        let config = parse(DEFAULT_CONFIG);
        assert_eq!(config.ring_count, config.rings.len());
        assert!(config.show_legend);
        assert!(config.rings.iter().all(|r| (0.0..=1.0).contains(&r.progress)));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("");
        assert_eq!(config.ring_count, 1);
        assert_eq!(config.layout(), LayoutConfig::default());
        assert_eq!(config.scale_factor, 1.0);
    }

    #[test]
    fn test_apply_to_view() {
        let config = parse(
            r##"
            ring_count = 3
            ring_thickness = 12
            show_progress_hint = true

            [[rings]]
            progress = 0.25
            explain = "cpu"
            colors = { fill = "#ff0000", Outline = "#00ff0080" }

            [[rings]]
            progress = 0.75
            "##,
        );
        assert_eq!(config.layout().thickness, Dimension::Pinned(12.0));
        assert_eq!(config.layout().spacing, Dimension::Auto);

        let mut view = config.build_view();
        view.measure(MeasureSpec::exactly(300.0, 300.0));

        assert_eq!(view.ring_count(), 3);
        assert_eq!(view.thickness(), Some(12.0));
        assert!(view.layout().show_progress_hint);
        assert_eq!(view.rings().progress(), &[0.25, 0.75, 0.0]);
        let explanations: Vec<&str> = view
            .rings()
            .explanations()
            .iter()
            .map(|e| e.as_str())
            .collect();
        assert_eq!(explanations, vec!["cpu", "", ""]);

        let style = view.rings().styles().get(0).unwrap();
        assert_eq!(style.fill.color.red, 1.0);
        assert_eq!(style.stroke.color.green, 1.0);
        assert!((style.stroke.color.alpha - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_extra_rings_are_ignored() {
        let config = parse(
            r##"
            ring_count = 1

            [[rings]]
            progress = 0.5

            [[rings]]
            progress = 0.9
            colors = { fill = "#000000" }
            "##,
        );
        let view = config.build_view();
        assert_eq!(view.rings().progress(), &[0.5]);
    }

    #[test]
    fn test_ring_config_from_json() {
        let ring: RingConfig =
            serde_json::from_str(r##"{"progress": 0.4, "colors": {"text": "#102030"}}"##)
                .unwrap();
        assert_eq!(ring.progress, 0.4);
        assert!(ring.explain.is_empty());
        assert!(ring.colors.contains_key(&PaintRole::Hint));
    }

    #[test]
    fn test_config_change_filter() {
        let path = Path::new("/tmp/ringview/config.toml");
        let modify = notify::Event::new(EventKind::Modify(notify::event::ModifyKind::Any))
            .add_path(path.to_path_buf());
        assert!(is_config_change(&modify, path));

        let other = notify::Event::new(EventKind::Create(notify::event::CreateKind::File))
            .add_path(Path::new("/tmp/ringview/notes.txt").to_path_buf());
        assert!(!is_config_change(&other, path));

        let access = notify::Event::new(EventKind::Access(notify::event::AccessKind::Any))
            .add_path(path.to_path_buf());
        assert!(!is_config_change(&access, path));
    }

    #[test]
    fn test_watch_missing_dir_fails() {
        let (bridge_tx, _bridge_rx) = async_channel::unbounded();
        let missing = Path::new("/nonexistent/ringview-config-dir");
        let err = watch_dir(missing, bridge_tx).unwrap_err();
        assert!(matches!(err, ConfigError::Notify(_)));
        assert!(err.to_string().starts_with("Notify error:"));
    }

    #[test]
    fn test_bad_role_is_rejected() {
        let result = config::Config::builder()
            .add_source(config::File::from_str(
                "[[rings]]\ncolors = { border = \"#000000\" }",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize::<Config>();
        assert!(result.is_err());
    }
}
