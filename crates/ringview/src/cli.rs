use crate::config::{Config, RingConfig};
use clap::Parser;
use ringprogress::Explanation;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "ringview", version, about = "Concentric ring progress viewer", long_about = None)]
pub struct Cli {
    /// Number of concentric rings
    #[arg(short = 'n', long)]
    pub rings: Option<usize>,

    /// Progress of each ring, outermost first (e.g. 0.8,0.5,0.3)
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    pub progress: Vec<f64>,

    /// Legend text of each ring, outermost first
    #[arg(short, long, value_delimiter = ',')]
    pub explain: Vec<String>,

    /// Ring thickness in pixels (derived from the window size when omitted)
    #[arg(long)]
    pub thickness: Option<f64>,

    /// Gap between rings in pixels (derived from the window size when omitted)
    #[arg(long)]
    pub spacing: Option<f64>,

    /// Show the percentage on each ring
    #[arg(long)]
    pub hint: bool,

    /// Hide the legend below the rings
    #[arg(long)]
    pub no_legend: bool,

    /// Write the default config file, print its path and exit
    #[arg(long)]
    pub init_config: bool,
}

impl Cli {
    /// Layers the command-line flags over a loaded config.
    pub fn apply_to(&self, mut config: Config) -> Config {
        let longest = self.progress.len().max(self.explain.len());
        if let Some(rings) = self.rings {
            config.ring_count = rings;
        } else if longest > config.ring_count {
            config.ring_count = longest;
        }
        if config.rings.len() < longest {
            config.rings.resize_with(longest, RingConfig::default);
        }

        for (ring, &progress) in config.rings.iter_mut().zip(&self.progress) {
            ring.progress = progress;
        }
        for (ring, explain) in config.rings.iter_mut().zip(&self.explain) {
            ring.explain = Explanation::new(explain.as_str());
        }

        if self.thickness.is_some() {
            config.ring_thickness = self.thickness;
        }
        if self.spacing.is_some() {
            config.ring_spacing = self.spacing;
        }
        config.show_progress_hint |= self.hint;
        if self.no_legend {
            config.show_legend = false;
        }
        config
    }
}
